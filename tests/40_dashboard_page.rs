mod common;

use anyhow::Result;
use calamine::{open_workbook_from_rs, Reader, Xlsx};
use reqwest::header::{CONTENT_DISPOSITION, CONTENT_TYPE, COOKIE};
use reqwest::StatusCode;
use serde_json::json;
use std::io::Cursor;

async fn page_html(server: &common::TestServer, query: &str) -> Result<String> {
    let res = reqwest::Client::new()
        .get(server.url(&format!("/dashboard{}", query)))
        .header(COOKIE, "token=t")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    Ok(res.text().await?)
}

#[tokio::test]
async fn pages_have_continuous_row_numbers() -> Result<()> {
    let server = common::spawn_server(common::generated_leads(120)).await?;

    let first = page_html(&server, "").await?;
    assert!(first.contains("<td>1</td>"));
    assert!(first.contains("<td>50</td>"));
    assert!(!first.contains("<td>51</td>"));
    assert!(first.contains("Page 1 of 3 (120 leads)"));
    assert!(!first.contains(">Previous</a>"));
    // Newest lead first.
    assert!(first.contains("lead 119"));

    let third = page_html(&server, "?page=3").await?;
    assert!(third.contains("<td>101</td>"));
    assert!(third.contains("<td>120</td>"));
    assert!(third.contains("Page 3 of 3"));
    assert!(!third.contains(">Next</a>"));
    assert!(third.contains("href=\"/dashboard?page=2\""));

    let clamped = page_html(&server, "?page=99").await?;
    assert!(clamped.contains("Page 3 of 3"));
    Ok(())
}

#[tokio::test]
async fn store_failure_renders_an_empty_table() -> Result<()> {
    let server = common::spawn_server(common::generated_leads(5)).await?;
    server.store.set_failing(true);

    let html = page_html(&server, "").await?;
    assert!(html.contains("Failed to load data."));
    assert!(!html.contains("<td>1</td>"));
    Ok(())
}

#[tokio::test]
async fn export_filters_by_inclusive_calendar_range() -> Result<()> {
    let leads = vec![
        common::lead_on("december", 2023, 12, 31),
        common::lead_on("january", 2024, 1, 15),
        common::lead_on("february", 2024, 2, 1),
    ];
    let server = common::spawn_server(leads).await?;

    let res = reqwest::Client::new()
        .get(server.url("/dashboard/export?start=2024-01-01&end=2024-01-31"))
        .header(COOKIE, "token=t")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.headers()[CONTENT_TYPE],
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    );
    assert_eq!(res.headers()[CONTENT_DISPOSITION], "attachment; filename=\"Leads.xlsx\"");

    let bytes = res.bytes().await?;
    assert_eq!(&bytes[..2], b"PK");

    let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes.to_vec()))?;
    let sheet = workbook.worksheet_range("Leads Data")?;
    let rows: Vec<Vec<String>> = sheet
        .rows()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .collect();
    assert_eq!(
        rows,
        vec![
            vec!["ID", "Name", "Phone", "Email", "Model", "Date"],
            vec!["1", "january", "9800000007", "january@example.com", "Creta", "2024-01-15"],
        ]
    );
    Ok(())
}

#[tokio::test]
async fn empty_exports_are_aborted_with_a_notice() -> Result<()> {
    let client = reqwest::Client::new();

    let empty = common::spawn_server(vec![]).await?;
    let res = client
        .get(empty.url("/dashboard/export"))
        .header(COOKIE, "token=t")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.json::<serde_json::Value>().await?, json!({ "error": "No data to export." }));

    let server = common::spawn_server(vec![common::lead_on("a", 2024, 1, 15)]).await?;
    let res = client
        .get(server.url("/dashboard/export?start=2025-01-01&end="))
        .header(COOKIE, "token=t")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        res.json::<serde_json::Value>().await?,
        json!({ "error": "No data found for selected date range." })
    );
    Ok(())
}

#[tokio::test]
async fn malformed_export_dates_are_rejected() -> Result<()> {
    let server = common::spawn_server(vec![common::lead_on("a", 2024, 1, 15)]).await?;

    let res = reqwest::Client::new()
        .get(server.url("/dashboard/export?start=15/01/2024"))
        .header(COOKIE, "token=t")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}
