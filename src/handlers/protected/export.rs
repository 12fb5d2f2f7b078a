use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use crate::app::AppState;
use crate::dashboard::{write_workbook, DateRange};
use crate::error::ApiError;
use crate::middleware::LOGIN_PATH;

pub const XLSX_CONTENT_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

#[derive(Debug, Default, Deserialize)]
pub struct ExportQuery {
    pub start: Option<String>,
    pub end: Option<String>,
}

/// GET /dashboard/export?start=YYYY-MM-DD&end=YYYY-MM-DD - Spreadsheet download
///
/// Filters the full lead list by inclusive calendar date and returns a
/// single-sheet workbook. An empty list or empty range returns 404 with the
/// notice text instead of a file.
pub async fn export(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<ExportQuery>,
) -> Result<Response, ApiError> {
    let range = DateRange::parse(query.start.as_deref(), query.end.as_deref())?;

    let Some(mut view) = super::dashboard::mount(&state, &jar).await else {
        return Ok(Redirect::to(LOGIN_PATH).into_response());
    };
    view.set_filter(range);

    let rows = view.export()?;
    let dashboard = &state.config.dashboard;
    let bytes = write_workbook(&rows, &dashboard.export_sheet_name)?;
    tracing::info!("Exported {} leads", rows.len());

    let disposition = format!("attachment; filename=\"{}\"", dashboard.export_file_name);
    Ok((
        [
            (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}
