use axum::{extract::State, Json};

use crate::app::AppState;
use crate::database::Lead;
use crate::error::ApiError;

/// GET /api/leads - Every lead, newest first
///
/// No filtering or pagination happens here; the dashboard works on the full
/// list. Store failures are logged and surface as a fixed 500 payload:
///
/// ```json
/// { "error": "Internal Server Error" }
/// ```
///
/// This path sits under the guard's `/api` exemption, so it answers without
/// a session cookie.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Lead>>, ApiError> {
    let leads = state.leads.list_newest_first().await?;
    tracing::debug!("Fetched {} leads", leads.len());
    Ok(Json(leads))
}
