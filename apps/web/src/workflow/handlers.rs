//! Axum route handlers for the JSON API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::intake::inputs::ProposalInputs;
use crate::state::AppState;
use crate::workflow::runner::{SubmitOutcome, Workflow};
use crate::workflow::snapshot::WorkflowSnapshot;

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub state: &'static str,
    pub extracted_info: Vec<String>,
    /// Opaque token to send back to the generate endpoint.
    pub session: String,
}

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub session: String,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub state: &'static str,
    pub extracted_info: Vec<String>,
    pub proposal: String,
    /// `data:` URL of the uploaded logo.
    pub client_logo: String,
}

/// POST /api/v1/proposals/extract
///
/// Submit trigger. Multipart fields: document, disaster_article, client_logo, yearly_budget.
pub async fn handle_extract(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ExtractResponse>, AppError> {
    let inputs = ProposalInputs::from_multipart(multipart).await?;

    match Workflow::new(state.llm.as_ref()).submit(inputs).await? {
        SubmitOutcome::Blocked => Err(AppError::MissingInputs),
        SubmitOutcome::FieldsExtracted(snapshot) => Ok(Json(ExtractResponse {
            state: "fields_extracted",
            session: snapshot.encode()?,
            extracted_info: snapshot.extracted_info,
        })),
    }
}

/// POST /api/v1/proposals/generate
///
/// Generate Proposal trigger. Only valid with a session from the extract endpoint.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    let snapshot = WorkflowSnapshot::decode(&request.session)?;
    let generated = Workflow::new(state.llm.as_ref())
        .generate(&snapshot)
        .await?;

    Ok(Json(GenerateResponse {
        state: "proposal_generated",
        client_logo: generated.client_logo.data_url(),
        extracted_info: generated.extracted_info,
        proposal: generated.proposal,
    }))
}
