use axum::extract::Multipart;
use bytes::Bytes;
use tracing::debug;

use crate::errors::AppError;
use crate::intake::logo::ClientLogo;

/// Multipart field names shared by the HTML form and the JSON API.
pub const FIELD_DOCUMENT: &str = "document";
pub const FIELD_DISASTER_ARTICLE: &str = "disaster_article";
pub const FIELD_CLIENT_LOGO: &str = "client_logo";
pub const FIELD_YEARLY_BUDGET: &str = "yearly_budget";

/// Request body cap for every route. Uploads carry a PDF and an image, and the
/// session token sent back to generate carries the logo again.
pub const MAX_REQUEST_BYTES: usize = 25 * 1024 * 1024;

/// Largest accepted logo. The session token encodes it twice over (about 1.8x),
/// so this keeps the generate request well under `MAX_REQUEST_BYTES`.
pub const MAX_LOGO_BYTES: usize = 5 * 1024 * 1024;

/// The four user inputs as submitted. Any of them may be absent.
#[derive(Debug, Clone, Default)]
pub struct ProposalInputs {
    pub document: Option<Bytes>,
    pub disaster_article: Option<String>,
    pub client_logo: Option<ClientLogo>,
    pub yearly_budget: Option<u64>,
}

/// Which inputs count as present. Empty uploads, an empty article and a zero
/// budget (the budget control's default) all count as missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputPresence {
    pub document: bool,
    pub disaster_article: bool,
    pub client_logo: bool,
    pub yearly_budget: bool,
}

impl InputPresence {
    #[cfg(test)]
    pub fn all() -> Self {
        Self {
            document: true,
            disaster_article: true,
            client_logo: true,
            yearly_budget: true,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.document && self.disaster_article && self.client_logo && self.yearly_budget
    }

    /// Field names of the missing inputs, in form order.
    pub fn missing(&self) -> Vec<&'static str> {
        [
            (self.document, FIELD_DOCUMENT),
            (self.disaster_article, FIELD_DISASTER_ARTICLE),
            (self.client_logo, FIELD_CLIENT_LOGO),
            (self.yearly_budget, FIELD_YEARLY_BUDGET),
        ]
        .into_iter()
        .filter(|(present, _)| !present)
        .map(|(_, name)| name)
        .collect()
    }
}

/// All four inputs, present and non-empty.
#[derive(Debug, Clone)]
pub struct CompleteInputs {
    pub document: Bytes,
    pub disaster_article: String,
    pub client_logo: ClientLogo,
    pub yearly_budget: u64,
}

impl ProposalInputs {
    pub fn presence(&self) -> InputPresence {
        InputPresence {
            document: self.document.as_ref().is_some_and(|d| !d.is_empty()),
            disaster_article: self
                .disaster_article
                .as_ref()
                .is_some_and(|a| !a.is_empty()),
            client_logo: self.client_logo.is_some(),
            yearly_budget: self.yearly_budget.is_some_and(|b| b > 0),
        }
    }

    pub fn into_complete(self) -> Option<CompleteInputs> {
        if !self.presence().is_complete() {
            return None;
        }
        Some(CompleteInputs {
            document: self.document?,
            disaster_article: self.disaster_article?,
            client_logo: self.client_logo?,
            yearly_budget: self.yearly_budget?,
        })
    }

    /// Reads the four inputs from a multipart form. Unknown fields are ignored.
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut inputs = ProposalInputs::default();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                FIELD_DOCUMENT => inputs.document = non_empty(field.bytes().await?),
                FIELD_DISASTER_ARTICLE => inputs.disaster_article = Some(field.text().await?),
                FIELD_CLIENT_LOGO => {
                    if let Some(bytes) = non_empty(field.bytes().await?) {
                        if bytes.len() > MAX_LOGO_BYTES {
                            return Err(AppError::Validation(format!(
                                "Client logo is {} bytes; the limit is {MAX_LOGO_BYTES} bytes",
                                bytes.len()
                            )));
                        }
                        let logo = ClientLogo::from_bytes(bytes).ok_or_else(|| {
                            AppError::Validation(
                                "Client logo must be a PNG or JPEG image".to_string(),
                            )
                        })?;
                        inputs.client_logo = Some(logo);
                    }
                }
                FIELD_YEARLY_BUDGET => {
                    inputs.yearly_budget = parse_budget(&field.text().await?)?;
                }
                other => debug!("Ignoring unexpected form field '{other}'"),
            }
        }

        Ok(inputs)
    }
}

// Browsers send an empty part when a file picker is left blank.
fn non_empty(bytes: Bytes) -> Option<Bytes> {
    (!bytes.is_empty()).then_some(bytes)
}

/// Parses the budget control's value. Blank means "not entered".
pub fn parse_budget(raw: &str) -> Result<Option<u64>, AppError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<u64>().map(Some).map_err(|_| {
        AppError::Validation(format!(
            "Yearly budget must be a non-negative whole number, got '{raw}'"
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intake::logo::TINY_PNG;

    fn full_inputs() -> ProposalInputs {
        ProposalInputs {
            document: Some(Bytes::from_static(b"%PDF-1.5")),
            disaster_article: Some("A flood destroyed...".to_string()),
            client_logo: ClientLogo::from_bytes(Bytes::from_static(TINY_PNG)),
            yearly_budget: Some(50_000),
        }
    }

    #[test]
    fn test_full_inputs_are_complete() {
        let inputs = full_inputs();
        assert!(inputs.presence().is_complete());
        assert!(inputs.presence().missing().is_empty());
        let complete = inputs.into_complete().unwrap();
        assert_eq!(complete.yearly_budget, 50_000);
    }

    #[test]
    fn test_missing_logo_is_incomplete() {
        let inputs = ProposalInputs {
            client_logo: None,
            ..full_inputs()
        };
        assert!(!inputs.presence().is_complete());
        assert_eq!(inputs.presence().missing(), vec![FIELD_CLIENT_LOGO]);
        assert!(inputs.into_complete().is_none());
    }

    #[test]
    fn test_empty_article_and_zero_budget_count_as_missing() {
        let inputs = ProposalInputs {
            disaster_article: Some(String::new()),
            yearly_budget: Some(0),
            ..full_inputs()
        };
        assert_eq!(
            inputs.presence().missing(),
            vec![FIELD_DISASTER_ARTICLE, FIELD_YEARLY_BUDGET]
        );
    }

    #[test]
    fn test_empty_document_counts_as_missing() {
        let inputs = ProposalInputs {
            document: Some(Bytes::new()),
            ..full_inputs()
        };
        assert!(!inputs.presence().document);
    }

    #[test]
    fn test_nothing_submitted() {
        let presence = ProposalInputs::default().presence();
        assert_eq!(presence.missing().len(), 4);
    }

    #[test]
    fn test_parse_budget() {
        assert_eq!(parse_budget("50000").unwrap(), Some(50_000));
        assert_eq!(parse_budget(" 0 ").unwrap(), Some(0));
        assert_eq!(parse_budget("").unwrap(), None);
        assert!(parse_budget("-1000").is_err());
        assert!(parse_budget("lots").is_err());
    }
}
