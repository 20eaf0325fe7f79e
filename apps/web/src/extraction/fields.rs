//! Field Extraction Client — pulls the purchasing manager and scope of work
//! out of the document text via a single completion call.

use thiserror::Error;
use tracing::info;

use crate::extraction::prompts::{
    DOCUMENT_EXCERPT_CHARS, FIELD_EXTRACTION_MAX_TOKENS, FIELD_EXTRACTION_PROMPT_TEMPLATE,
    FIELD_EXTRACTION_SYSTEM,
};
use crate::llm_client::prompts::{fill_template, truncate_chars};
use crate::llm_client::{CompletionClient, CompletionRequest, LlmError};

/// Number of lines the extraction prompt asks the model for.
pub const EXPECTED_FIELD_COUNT: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unexpected field count: expected {expected} extracted lines, found {found}")]
pub struct FieldCountError {
    pub expected: usize,
    pub found: usize,
}

/// The two fields the proposal needs, taken positionally from the model's lines.
///
/// The lines are advisory text: nothing checks that they actually start with
/// "Purchasing Manager:" or "Scope of Work:".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedFields {
    purchasing_manager: String,
    scope_of_work: String,
}

impl ExtractedFields {
    /// Requires exactly two lines: first the purchasing manager, then the scope of work.
    pub fn from_lines(lines: &[String]) -> Result<Self, FieldCountError> {
        match lines {
            [purchasing_manager, scope_of_work] => Ok(Self {
                purchasing_manager: purchasing_manager.clone(),
                scope_of_work: scope_of_work.clone(),
            }),
            _ => Err(FieldCountError {
                expected: EXPECTED_FIELD_COUNT,
                found: lines.len(),
            }),
        }
    }

    pub fn purchasing_manager(&self) -> &str {
        &self.purchasing_manager
    }

    pub fn scope_of_work(&self) -> &str {
        &self.scope_of_work
    }
}

pub fn build_extraction_prompt(document_text: &str) -> String {
    fill_template(
        FIELD_EXTRACTION_PROMPT_TEMPLATE,
        &[("text", truncate_chars(document_text, DOCUMENT_EXCERPT_CHARS))],
    )
}

/// Splits a model response into lines on `'\n'`, keeping empty lines.
/// An empty response yields a single empty line.
pub fn split_lines(response: &str) -> Vec<String> {
    response.split('\n').map(str::to_string).collect()
}

/// Sends the extraction prompt and returns the response split into lines.
pub async fn extract_fields(
    document_text: &str,
    llm: &dyn CompletionClient,
) -> Result<Vec<String>, LlmError> {
    let prompt = build_extraction_prompt(document_text);
    let response = llm
        .complete(CompletionRequest {
            system: FIELD_EXTRACTION_SYSTEM,
            prompt: &prompt,
            max_tokens: FIELD_EXTRACTION_MAX_TOKENS,
        })
        .await?;

    let lines = split_lines(&response);
    info!("Field extraction returned {} lines", lines.len());
    Ok(lines)
}
