use base64::{engine::general_purpose::STANDARD, engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::intake::inputs::{InputPresence, MAX_REQUEST_BYTES};
use crate::intake::logo::{ClientLogo, ImageFormat};
use crate::workflow::machine::WorkflowState;

/// Longest token that still fits a generate request, leaving room for the
/// form field name or JSON wrapper around it.
pub const MAX_TOKEN_BYTES: usize = MAX_REQUEST_BYTES - 4 * 1024;

/// Everything the second trigger needs, handed to the client after field
/// extraction and sent back with "Generate Proposal". The server keeps nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowSnapshot {
    pub document_text: String,
    pub disaster_article: String,
    pub yearly_budget: u64,
    pub client_logo: LogoSnapshot,
    pub extracted_info: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogoSnapshot {
    pub format: ImageFormat,
    /// Standard base64 of the image bytes.
    pub data: String,
}

impl From<&ClientLogo> for LogoSnapshot {
    fn from(logo: &ClientLogo) -> Self {
        Self {
            format: logo.format,
            data: STANDARD.encode(&logo.bytes),
        }
    }
}

impl WorkflowSnapshot {
    /// The state this snapshot was taken in.
    pub fn state(&self) -> WorkflowState {
        WorkflowState::FieldsExtracted {
            lines: self.extracted_info.clone(),
        }
    }

    /// Input presence as it was at submission. The document was necessarily
    /// uploaded, even if its extracted text is empty.
    pub fn presence(&self) -> InputPresence {
        InputPresence {
            document: true,
            disaster_article: !self.disaster_article.is_empty(),
            client_logo: !self.client_logo.data.is_empty(),
            yearly_budget: self.yearly_budget > 0,
        }
    }

    pub fn client_logo(&self) -> Result<ClientLogo, AppError> {
        let bytes = STANDARD
            .decode(&self.client_logo.data)
            .map_err(|e| AppError::InvalidSession(format!("client logo is not base64: {e}")))?;
        let logo = ClientLogo::from_bytes(Bytes::from(bytes)).ok_or_else(|| {
            AppError::InvalidSession("client logo is not a PNG or JPEG image".to_string())
        })?;
        if logo.format != self.client_logo.format {
            return Err(AppError::InvalidSession(
                "client logo format does not match its contents".to_string(),
            ));
        }
        Ok(logo)
    }

    /// Opaque token: URL-safe base64 of the JSON snapshot.
    ///
    /// Fails with a validation error when the token could not be sent back
    /// within the request body limit.
    pub fn encode(&self) -> Result<String, AppError> {
        let json = serde_json::to_vec(self)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize snapshot: {e}")))?;
        let token = URL_SAFE_NO_PAD.encode(json);
        if token.len() > MAX_TOKEN_BYTES {
            return Err(AppError::Validation(format!(
                "Submission is too large to generate a proposal from ({} byte session, limit {MAX_TOKEN_BYTES})",
                token.len()
            )));
        }
        Ok(token)
    }

    pub fn decode(token: &str) -> Result<Self, AppError> {
        let json = URL_SAFE_NO_PAD
            .decode(token.trim())
            .map_err(|e| AppError::InvalidSession(format!("session is not base64: {e}")))?;
        serde_json::from_slice(&json)
            .map_err(|e| AppError::InvalidSession(format!("session is not readable: {e}")))
    }
}
