use std::sync::Arc;

use crate::llm_client::CompletionClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Completion endpoint used by both the extraction and the proposal calls.
    /// Production: `LlmClient` (Groq). Tests swap in a stub.
    pub llm: Arc<dyn CompletionClient>,
}
