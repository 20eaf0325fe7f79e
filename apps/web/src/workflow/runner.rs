//! Drives the state machine and performs its effects.
//!
//! Flow: Submit → extract PDF text → field extraction → FieldsExtracted
//!       GenerateProposal → arity check → proposal generation → ProposalGenerated
//!
//! The two remote calls are strictly sequential and never retried.

use anyhow::anyhow;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::extraction::fields::{extract_fields, ExtractedFields};
use crate::generation::proposal::{generate_proposal, ProposalRequest};
use crate::intake::inputs::ProposalInputs;
use crate::intake::logo::ClientLogo;
use crate::intake::pdf::extract_text_blocking;
use crate::llm_client::CompletionClient;
use crate::workflow::machine::{transition, Effect, Event, Trigger, WorkflowState};
use crate::workflow::snapshot::{LogoSnapshot, WorkflowSnapshot};

/// Result of the Submit trigger.
#[derive(Debug, Clone)]
pub enum SubmitOutcome {
    /// An input was missing; nothing was sent to the model.
    Blocked,
    FieldsExtracted(WorkflowSnapshot),
}

/// Result of the Generate Proposal trigger.
#[derive(Debug, Clone)]
pub struct GeneratedProposal {
    pub extracted_info: Vec<String>,
    pub proposal: String,
    pub client_logo: ClientLogo,
}

pub struct Workflow<'a> {
    llm: &'a dyn CompletionClient,
}

impl<'a> Workflow<'a> {
    pub fn new(llm: &'a dyn CompletionClient) -> Self {
        Self { llm }
    }

    pub async fn submit(&self, inputs: ProposalInputs) -> Result<SubmitOutcome, AppError> {
        let presence = inputs.presence();
        let collected = transition(
            &WorkflowState::Idle,
            &presence,
            Event::Trigger(Trigger::Submit),
        );

        match collected.effect {
            Effect::ExtractFields => {}
            Effect::ShowWarning => {
                warn!(
                    "Submission blocked, missing inputs: {}",
                    presence.missing().join(", ")
                );
                return Ok(SubmitOutcome::Blocked);
            }
            other => return Err(unexpected(other, &collected.state)),
        }

        let inputs = inputs
            .into_complete()
            .ok_or_else(|| AppError::Internal(anyhow!("inputs incomplete after collection")))?;
        info!(
            "Inputs collected: document={} bytes, article={} chars, budget={}",
            inputs.document.len(),
            inputs.disaster_article.chars().count(),
            inputs.yearly_budget
        );

        let document_text = extract_text_blocking(inputs.document).await?;
        let lines = extract_fields(&document_text, self.llm).await?;

        let extracted = transition(&collected.state, &presence, Event::FieldsReady(lines));
        let lines = match extracted.state {
            WorkflowState::FieldsExtracted { lines } => lines,
            other => return Err(unexpected(extracted.effect, &other)),
        };

        Ok(SubmitOutcome::FieldsExtracted(WorkflowSnapshot {
            document_text,
            disaster_article: inputs.disaster_article,
            yearly_budget: inputs.yearly_budget,
            client_logo: LogoSnapshot::from(&inputs.client_logo),
            extracted_info: lines,
        }))
    }

    pub async fn generate(
        &self,
        snapshot: &WorkflowSnapshot,
    ) -> Result<GeneratedProposal, AppError> {
        let presence = snapshot.presence();
        let started = transition(
            &snapshot.state(),
            &presence,
            Event::Trigger(Trigger::GenerateProposal),
        );

        match started.effect {
            Effect::GenerateProposal => {}
            Effect::ShowWarning => return Err(AppError::MissingInputs),
            other => return Err(unexpected(other, &started.state)),
        }

        let client_logo = snapshot.client_logo()?;
        let fields = ExtractedFields::from_lines(&snapshot.extracted_info)?;

        info!("Generating proposal");
        let proposal = generate_proposal(
            &ProposalRequest {
                document_text: &snapshot.document_text,
                disaster_article: &snapshot.disaster_article,
                yearly_budget: snapshot.yearly_budget,
                fields: &fields,
            },
            self.llm,
        )
        .await?;

        let finished = transition(&started.state, &presence, Event::ProposalReady(proposal));
        let (extracted_info, proposal) = match finished.state {
            WorkflowState::ProposalGenerated { lines, proposal } => (lines, proposal),
            other => return Err(unexpected(finished.effect, &other)),
        };

        Ok(GeneratedProposal {
            extracted_info,
            proposal,
            client_logo,
        })
    }
}

fn unexpected(effect: Effect, state: &WorkflowState) -> AppError {
    AppError::Internal(anyhow!(
        "unexpected workflow step: effect {effect:?} in state {}",
        state.name()
    ))
}
