#![allow(dead_code)]

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use chrono::{DateTime, TimeZone, Utc};
use lead_dashboard::config::AppConfig;
use lead_dashboard::database::{Lead, MemoryLeadRepository};
use lead_dashboard::{app, AppState};
use reqwest::StatusCode;

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "admin";

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub store: Arc<MemoryLeadRepository>,
    handle: tokio::task::JoinHandle<()>,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            if let Ok(resp) = client.get(self.url("/health")).send().await {
                if resp.status() == StatusCode::OK || resp.status() == StatusCode::SERVICE_UNAVAILABLE {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }
}

/// Serve the app in-process on a free port, backed by an in-memory store
pub async fn spawn_server(leads: Vec<Lead>) -> Result<TestServer> {
    spawn_server_with(AppConfig::development(), leads).await
}

pub async fn spawn_server_with(config: AppConfig, leads: Vec<Lead>) -> Result<TestServer> {
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let base_url = format!("http://127.0.0.1:{}", port);

    let store = Arc::new(MemoryLeadRepository::new(leads));
    let state = AppState::new(config, store.clone())?;

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
        .await
        .context("failed to bind test listener")?;
    let handle = tokio::spawn(async move {
        let _ = axum::serve(listener, app(state)).await;
    });

    let server = TestServer {
        port,
        base_url,
        store,
        handle,
    };
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}

/// Client that reports redirects instead of following them
pub fn no_redirect_client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("client")
}

pub fn lead_at(name: &str, created_at: DateTime<Utc>) -> Lead {
    Lead {
        id: 0,
        name: name.to_string(),
        mobile: format!("98{:08}", name.len()),
        email: format!("{}@example.com", name.replace(' ', ".")),
        model: "Creta".to_string(),
        created_at,
    }
}

pub fn lead_on(name: &str, y: i32, m: u32, d: u32) -> Lead {
    lead_at(name, Utc.with_ymd_and_hms(y, m, d, 11, 30, 0).unwrap())
}

/// `n` leads one hour apart, shuffled so the store has to sort them
pub fn generated_leads(n: usize) -> Vec<Lead> {
    let base = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
    let mut leads: Vec<Lead> = (0..n)
        .map(|i| {
            let mut lead = lead_at(&format!("lead {:03}", i), base + chrono::Duration::hours(i as i64));
            lead.id = i as i64 + 1;
            lead
        })
        .collect();
    leads.reverse();
    leads.rotate_left(n / 3);
    leads
}
