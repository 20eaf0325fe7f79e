//! Proposal Generation — drafts the six-section proposal from the document,
//! the disaster article, the extracted fields and the yearly budget.

use tracing::info;

use crate::extraction::fields::ExtractedFields;
use crate::generation::budget::format_budget;
use crate::generation::prompts::{
    DISASTER_EXCERPT_CHARS, DOCUMENT_EXCERPT_CHARS, PROPOSAL_MAX_TOKENS,
    PROPOSAL_PROMPT_TEMPLATE, PROPOSAL_SYSTEM,
};
use crate::llm_client::prompts::{fill_template, truncate_chars};
use crate::llm_client::{CompletionClient, CompletionRequest, LlmError};

/// Everything the proposal prompt is built from.
#[derive(Debug, Clone)]
pub struct ProposalRequest<'a> {
    pub document_text: &'a str,
    pub disaster_article: &'a str,
    pub yearly_budget: u64,
    pub fields: &'a ExtractedFields,
}

pub fn build_proposal_prompt(request: &ProposalRequest<'_>) -> String {
    let yearly_budget = format_budget(request.yearly_budget);
    fill_template(
        PROPOSAL_PROMPT_TEMPLATE,
        &[
            (
                "document",
                truncate_chars(request.document_text, DOCUMENT_EXCERPT_CHARS),
            ),
            (
                "disaster_article",
                truncate_chars(request.disaster_article, DISASTER_EXCERPT_CHARS),
            ),
            ("purchasing_manager", request.fields.purchasing_manager()),
            ("scope_of_work", request.fields.scope_of_work()),
            ("yearly_budget", yearly_budget.as_str()),
        ],
    )
}

/// Sends the proposal prompt and returns the model's text verbatim.
pub async fn generate_proposal(
    request: &ProposalRequest<'_>,
    llm: &dyn CompletionClient,
) -> Result<String, LlmError> {
    let prompt = build_proposal_prompt(request);
    let proposal = llm
        .complete(CompletionRequest {
            system: PROPOSAL_SYSTEM,
            prompt: &prompt,
            max_tokens: PROPOSAL_MAX_TOKENS,
        })
        .await?;

    info!("Proposal generated: {} chars", proposal.chars().count());
    Ok(proposal)
}
