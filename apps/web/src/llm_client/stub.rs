//! Deterministic in-process `CompletionClient` for tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{CompletionClient, CompletionRequest, LlmError};

/// A request as seen by the stub, owned so tests can inspect it afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub system: String,
    pub prompt: String,
    pub max_tokens: u32,
}

/// Replies with queued responses in order; when the queue runs dry it keeps
/// returning the fallback reply.
pub struct StubClient {
    replies: Mutex<VecDeque<Result<String, u16>>>,
    fallback: String,
    recorded: Mutex<Vec<RecordedRequest>>,
}

impl StubClient {
    pub fn new(fallback: &str) -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            fallback: fallback.to_string(),
            recorded: Mutex::new(Vec::new()),
        }
    }

    /// Queues `replies` to be returned one per call, in order.
    pub fn with_replies(replies: &[&str]) -> Self {
        let stub = Self::new("");
        stub.replies
            .lock()
            .unwrap()
            .extend(replies.iter().map(|r| Ok(r.to_string())));
        stub
    }

    pub fn push_error(&self, status: u16) {
        self.replies.lock().unwrap().push_back(Err(status));
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.recorded.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionClient for StubClient {
    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String, LlmError> {
        self.recorded.lock().unwrap().push(RecordedRequest {
            system: request.system.to_string(),
            prompt: request.prompt.to_string(),
            max_tokens: request.max_tokens,
        });

        match self.replies.lock().unwrap().pop_front() {
            Some(Ok(text)) => Ok(text),
            Some(Err(status)) => Err(LlmError::Api {
                status,
                message: "stubbed failure".to_string(),
            }),
            None => Ok(self.fallback.clone()),
        }
    }
}
