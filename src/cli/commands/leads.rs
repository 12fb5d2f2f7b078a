use serde_json::json;
use std::path::Path;

use crate::cli::config::load_session;
use crate::cli::utils::{output_lead_page, output_notice, output_success};
use crate::cli::OutputFormat;
use crate::dashboard::{DashboardClient, DateRange, ExportError, HttpLeadSource, Navigation};

async fn mount(server: &str) -> anyhow::Result<Option<DashboardClient<HttpLeadSource>>> {
    let file = load_session()?;
    let mut view = DashboardClient::new(HttpLeadSource::new(server)?, file.session);
    match view.mount().await {
        Navigation::Stay => Ok(Some(view)),
        Navigation::Login => Ok(None),
    }
}

pub async fn list(server: &str, page: usize, output_format: OutputFormat) -> anyhow::Result<()> {
    let Some(mut view) = mount(server).await? else {
        return output_notice(&output_format, "Not logged in; run `leads login <email>` first");
    };

    if view.last_error().is_some() {
        output_notice(&output_format, "Failed to load data.")?;
    }

    view.set_page(page);
    let rows = view.visible_rows();
    output_lead_page(&output_format, &rows, view.page(), view.page_count(), view.leads().len())
}

pub async fn export(
    server: &str,
    start: Option<&str>,
    end: Option<&str>,
    out: &Path,
    sheet: &str,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    let range = DateRange::parse(start, end)?;

    let Some(mut view) = mount(server).await? else {
        return output_notice(&output_format, "Not logged in; run `leads login <email>` first");
    };
    view.set_filter(range);

    match view.export_to(sheet, out) {
        Ok(count) => output_success(
            &output_format,
            &format!("Exported {} leads to {}", count, out.display()),
            Some(json!({ "rows": count, "file": out.display().to_string() })),
        ),
        // Aborted exports are notices, not failures.
        Err(e @ (ExportError::NoData | ExportError::EmptyRange)) => output_notice(&output_format, &e.to_string()),
        Err(e) => Err(e.into()),
    }
}
