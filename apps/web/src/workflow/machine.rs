//! The proposal workflow as an explicit state machine.
//!
//! `transition` is pure: it decides the next state and which side effect the
//! caller must run. Completion of an effect is fed back in as an event.
//!
//! ```text
//! Idle ──Submit──▶ InputsCollected ──FieldsReady──▶ FieldsExtracted
//!   │                                                   │
//!   └─Submit (inputs missing)─▶ Blocked                 GenerateProposal
//!                                                       ▼
//!             ProposalGenerated ◀──ProposalReady── GeneratingProposal
//! ```

use crate::intake::inputs::InputPresence;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum WorkflowState {
    #[default]
    Idle,
    /// A submission was refused because an input was missing.
    Blocked,
    InputsCollected,
    FieldsExtracted {
        lines: Vec<String>,
    },
    GeneratingProposal {
        lines: Vec<String>,
    },
    ProposalGenerated {
        lines: Vec<String>,
        proposal: String,
    },
}

impl WorkflowState {
    pub fn name(&self) -> &'static str {
        match self {
            WorkflowState::Idle => "idle",
            WorkflowState::Blocked => "blocked",
            WorkflowState::InputsCollected => "inputs_collected",
            WorkflowState::FieldsExtracted { .. } => "fields_extracted",
            WorkflowState::GeneratingProposal { .. } => "generating_proposal",
            WorkflowState::ProposalGenerated { .. } => "proposal_generated",
        }
    }
}

/// User-initiated events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Submit,
    GenerateProposal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Trigger(Trigger),
    FieldsReady(Vec<String>),
    ProposalReady(String),
}

/// Work the caller must perform after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    ShowWarning,
    /// Extract the PDF text, then run field extraction.
    ExtractFields,
    GenerateProposal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: WorkflowState,
    pub effect: Effect,
}

impl Transition {
    fn to(state: WorkflowState, effect: Effect) -> Self {
        Self { state, effect }
    }

    fn stay(state: &WorkflowState) -> Self {
        Self::to(state.clone(), Effect::None)
    }
}

pub fn transition(state: &WorkflowState, inputs: &InputPresence, event: Event) -> Transition {
    match (state, event) {
        // Submit restarts the workflow from whatever state the page was in.
        (_, Event::Trigger(Trigger::Submit)) => {
            if inputs.is_complete() {
                Transition::to(WorkflowState::InputsCollected, Effect::ExtractFields)
            } else {
                Transition::to(WorkflowState::Blocked, Effect::ShowWarning)
            }
        }

        (
            WorkflowState::FieldsExtracted { lines }
            | WorkflowState::ProposalGenerated { lines, .. },
            Event::Trigger(Trigger::GenerateProposal),
        ) => {
            if inputs.is_complete() {
                Transition::to(
                    WorkflowState::GeneratingProposal {
                        lines: lines.clone(),
                    },
                    Effect::GenerateProposal,
                )
            } else {
                Transition::to(WorkflowState::Blocked, Effect::ShowWarning)
            }
        }

        // The generate control only exists once fields have been extracted.
        (_, Event::Trigger(Trigger::GenerateProposal)) => Transition::stay(state),

        (WorkflowState::InputsCollected, Event::FieldsReady(lines)) => {
            Transition::to(WorkflowState::FieldsExtracted { lines }, Effect::None)
        }

        (WorkflowState::GeneratingProposal { lines }, Event::ProposalReady(proposal)) => {
            Transition::to(
                WorkflowState::ProposalGenerated {
                    lines: lines.clone(),
                    proposal,
                },
                Effect::None,
            )
        }

        // Stale completions are dropped.
        (_, Event::FieldsReady(_) | Event::ProposalReady(_)) => Transition::stay(state),
    }
}
