use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use serde_json::json;

use crate::app::AppState;
use crate::dashboard::{DashboardClient, Navigation, RepositoryLeadSource};
use crate::error::ApiError;
use crate::handlers::session;
use crate::middleware::LOGIN_PATH;
use crate::templates;

#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    pub page: Option<usize>,
    pub start: Option<String>,
    pub end: Option<String>,
}

/// Mount a dashboard view over the lead store for this request's session
pub(super) async fn mount(state: &AppState, jar: &CookieJar) -> Option<DashboardClient<RepositoryLeadSource>> {
    let session = session::from_jar(jar, &state.config.security);
    let mut view = DashboardClient::new(RepositoryLeadSource::new(state.leads.clone()), session);
    match view.mount().await {
        Navigation::Stay => Some(view),
        Navigation::Login => None,
    }
}

/// GET /dashboard?page=N - One page of the full lead list
///
/// Row numbers run on across pages. `start`/`end` are only echoed back into
/// the export form; the table is never filtered.
pub async fn dashboard(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<DashboardQuery>,
) -> Result<Response, ApiError> {
    let Some(mut view) = mount(&state, &jar).await else {
        return Ok(Redirect::to(LOGIN_PATH).into_response());
    };
    view.set_page(query.page.unwrap_or(1));

    let rows: Vec<_> = view
        .visible_rows()
        .into_iter()
        .map(|(number, lead)| {
            json!({
                "number": number,
                "name": lead.name,
                "mobile": lead.mobile,
                "email": lead.email,
                "model": lead.model,
                "date": lead.created_at.format("%Y-%m-%d").to_string(),
            })
        })
        .collect();

    let page = view.page();
    let data = json!({
        "rows": rows,
        "page": page,
        "page_count": view.page_count(),
        "total": view.leads().len(),
        "has_prev": view.has_prev(),
        "prev_page": page.saturating_sub(1),
        "has_next": view.has_next(),
        "next_page": page + 1,
        "start": query.start.unwrap_or_default(),
        "end": query.end.unwrap_or_default(),
        "notice": view.last_error().map(|_| "Failed to load data."),
    });

    let html = state.templates.render(templates::DASHBOARD, &data).map_err(|e| {
        tracing::error!("Failed to render dashboard: {}", e);
        ApiError::internal_server_error("Internal Server Error")
    })?;
    Ok(Html(html).into_response())
}
