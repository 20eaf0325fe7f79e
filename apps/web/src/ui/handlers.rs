//! Axum route handlers for the HTML form.
//!
//! Errors are rendered into the page rather than returned as JSON.

use axum::{
    extract::{Multipart, State},
    response::{Html, IntoResponse, Response},
    Form,
};
use serde::Deserialize;

use crate::errors::{AppError, MISSING_INPUTS_WARNING};
use crate::intake::inputs::ProposalInputs;
use crate::state::AppState;
use crate::ui::page::{render_page, PageBody};
use crate::workflow::runner::{SubmitOutcome, Workflow};
use crate::workflow::snapshot::WorkflowSnapshot;

#[derive(Debug, Deserialize)]
pub struct GenerateForm {
    pub session: String,
}

/// GET /
pub async fn handle_index() -> Html<String> {
    Html(render_page(&PageBody::Empty))
}

/// POST /submit
pub async fn handle_submit(State(state): State<AppState>, multipart: Multipart) -> Response {
    match submit(&state, multipart).await {
        Ok(html) => Html(html).into_response(),
        Err(err) => error_page(err),
    }
}

/// POST /generate
pub async fn handle_generate(
    State(state): State<AppState>,
    Form(form): Form<GenerateForm>,
) -> Response {
    match generate(&state, &form.session).await {
        Ok(html) => Html(html).into_response(),
        Err(err) => error_page(err),
    }
}

async fn submit(state: &AppState, multipart: Multipart) -> Result<String, AppError> {
    let inputs = ProposalInputs::from_multipart(multipart).await?;

    match Workflow::new(state.llm.as_ref()).submit(inputs).await? {
        SubmitOutcome::Blocked => {
            Ok(render_page(&PageBody::Warning(MISSING_INPUTS_WARNING)))
        }
        SubmitOutcome::FieldsExtracted(snapshot) => {
            let session = snapshot.encode()?;
            Ok(render_page(&PageBody::Extracted {
                lines: &snapshot.extracted_info,
                session: &session,
            }))
        }
    }
}

async fn generate(state: &AppState, session: &str) -> Result<String, AppError> {
    let snapshot = WorkflowSnapshot::decode(session)?;
    let generated = Workflow::new(state.llm.as_ref())
        .generate(&snapshot)
        .await?;

    Ok(render_page(&PageBody::Proposal {
        lines: &generated.extracted_info,
        proposal: &generated.proposal,
        logo_url: &generated.client_logo.data_url(),
    }))
}

fn error_page(err: AppError) -> Response {
    err.log();
    let (status, _) = err.status_and_code();
    let message = err.to_string();
    let body = match err {
        AppError::MissingInputs => PageBody::Warning(&message),
        _ => PageBody::Error(&message),
    };
    (status, Html(render_page(&body))).into_response()
}

