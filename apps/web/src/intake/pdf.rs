//! Document Text Extractor — raw text of an uploaded PDF, page by page.

use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Malformed PDF: {0}")]
    Malformed(String),

    /// The blocking task was cancelled. Panics inside the PDF parser are
    /// reported as `Malformed` instead.
    #[error("PDF extraction task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Extracts the text of every page and concatenates it in page order.
///
/// Any page failure fails the whole document; there is no partial result.
pub fn extract_text(pdf_bytes: &[u8]) -> Result<String, ExtractError> {
    if pdf_bytes.is_empty() {
        return Err(ExtractError::Malformed("document is empty".to_string()));
    }

    let pages = pdf_extract::extract_text_from_mem_by_pages(pdf_bytes)
        .map_err(|e| ExtractError::Malformed(e.to_string()))?;

    debug!("Extracted text from {} PDF pages", pages.len());
    Ok(concat_pages(pages))
}

/// Runs `extract_text` on the blocking pool so the async runtime is not stalled.
///
/// `pdf-extract` panics on some malformed documents (e.g. a content stream
/// naming a font the page does not define); those panics become `Malformed`.
pub async fn extract_text_blocking(pdf_bytes: bytes::Bytes) -> Result<String, ExtractError> {
    let text = match tokio::task::spawn_blocking(move || extract_text(&pdf_bytes)).await {
        Ok(result) => result?,
        Err(e) if e.is_panic() => {
            let reason = panic_message(e.into_panic());
            warn!("PDF parser panicked: {reason}");
            return Err(ExtractError::Malformed(reason));
        }
        Err(e) => return Err(e.into()),
    };
    info!("PDF text extracted: {} chars", text.chars().count());
    Ok(text)
}

fn panic_message(payload: Box<dyn std::any::Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "PDF parser failed".to_string()
    }
}

/// Joins page texts in order with no separator.
pub fn concat_pages<I>(pages: I) -> String
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    pages.into_iter().fold(String::new(), |mut acc, page| {
        acc.push_str(page.as_ref());
        acc
    })
}
