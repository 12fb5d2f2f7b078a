use async_trait::async_trait;
use reqwest::header::COOKIE;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use url::Url;

use crate::dashboard::export::{build_export, save_workbook, ExportError, ExportRow};
use crate::dashboard::filter::DateRange;
use crate::dashboard::pagination::Pagination;
use crate::dashboard::session::Session;
use crate::database::{DatabaseError, Lead, LeadRepository};

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid server url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("server responded with status {0}")]
    Status(u16),

    #[error("malformed lead payload: {0}")]
    Malformed(String),

    #[error("store error: {0}")]
    Store(#[from] DatabaseError),
}

/// Where the dashboard gets its lead list from
#[async_trait]
pub trait LeadSource: Send + Sync {
    async fn fetch_leads(&self, session: &Session) -> Result<Vec<Lead>, FetchError>;
}

/// Fetches `GET /api/leads`, presenting the session as the `token` cookie
pub struct HttpLeadSource {
    client: reqwest::Client,
    leads_url: Url,
}

impl HttpLeadSource {
    pub fn new(base_url: &str) -> Result<Self, FetchError> {
        let leads_url = Url::parse(base_url)?.join("/api/leads")?;
        Ok(Self {
            client: reqwest::Client::new(),
            leads_url,
        })
    }
}

#[async_trait]
impl LeadSource for HttpLeadSource {
    async fn fetch_leads(&self, session: &Session) -> Result<Vec<Lead>, FetchError> {
        let mut request = self.client.get(self.leads_url.clone());
        if let Some(cookie) = session.cookie_header() {
            request = request.header(COOKIE, cookie);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let payload: serde_json::Value = response
            .json()
            .await
            .map_err(|e| FetchError::Malformed(e.to_string()))?;
        if !payload.is_array() {
            return Err(FetchError::Malformed("expected a JSON array".to_string()));
        }
        serde_json::from_value(payload).map_err(|e| FetchError::Malformed(e.to_string()))
    }
}

/// Reads straight from the lead store; used by the server-rendered page
pub struct RepositoryLeadSource {
    repository: Arc<dyn LeadRepository>,
}

impl RepositoryLeadSource {
    pub fn new(repository: Arc<dyn LeadRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl LeadSource for RepositoryLeadSource {
    async fn fetch_leads(&self, _session: &Session) -> Result<Vec<Lead>, FetchError> {
        Ok(self.repository.list_newest_first().await?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewState {
    CheckingSession,
    Unauthenticated,
    LoadingLeads,
    Ready,
}

/// Where the view wants to go after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Stay,
    Login,
}

/// Dashboard view state machine.
///
/// `checking-session -> unauthenticated | loading-leads -> ready`, with page,
/// filter, export and logout events handled while ready. Each `mount` issues
/// exactly one fetch and swaps the whole lead list in once it resolves, so a
/// mount future dropped mid-fetch leaves the previous list untouched.
pub struct DashboardClient<S: LeadSource> {
    source: S,
    session: Session,
    state: ViewState,
    leads: Vec<Lead>,
    pagination: Pagination,
    range: DateRange,
    last_error: Option<String>,
}

impl<S: LeadSource> DashboardClient<S> {
    pub fn new(source: S, session: Session) -> Self {
        Self {
            source,
            session,
            state: ViewState::CheckingSession,
            leads: Vec::new(),
            pagination: Pagination::default(),
            range: DateRange::default(),
            last_error: None,
        }
    }

    pub async fn mount(&mut self) -> Navigation {
        self.state = ViewState::CheckingSession;
        if !self.session.is_present() {
            self.state = ViewState::Unauthenticated;
            return Navigation::Login;
        }

        self.state = ViewState::LoadingLeads;
        let leads = match self.source.fetch_leads(&self.session).await {
            Ok(leads) => {
                self.last_error = None;
                leads
            }
            Err(e) => {
                // Degrade to an empty table; no retry.
                tracing::warn!("Failed to load leads: {}", e);
                self.last_error = Some(e.to_string());
                Vec::new()
            }
        };

        self.leads = leads;
        self.pagination.clamp(self.leads.len());
        self.state = ViewState::Ready;
        Navigation::Stay
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn leads(&self) -> &[Lead] {
        &self.leads
    }

    /// Reason the last fetch came back empty, if it failed
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn page(&self) -> usize {
        self.pagination.page()
    }

    pub fn page_count(&self) -> usize {
        self.pagination.page_count(self.leads.len())
    }

    /// Current page rows paired with their continuous display numbers
    pub fn visible_rows(&self) -> Vec<(usize, &Lead)> {
        self.pagination
            .slice(&self.leads)
            .iter()
            .enumerate()
            .map(|(i, lead)| (self.pagination.row_number(i), lead))
            .collect()
    }

    pub fn has_prev(&self) -> bool {
        self.pagination.has_prev()
    }

    pub fn has_next(&self) -> bool {
        self.pagination.has_next(self.leads.len())
    }

    pub fn next_page(&mut self) {
        self.pagination.next(self.leads.len());
    }

    pub fn prev_page(&mut self) {
        self.pagination.prev();
    }

    pub fn set_page(&mut self, page: usize) {
        self.pagination.set_page(page, self.leads.len());
    }

    /// Update the export date range; the table itself is not filtered
    pub fn set_filter(&mut self, range: DateRange) {
        self.range = range;
    }

    /// Rows the export would contain for the current filter
    pub fn export(&self) -> Result<Vec<ExportRow>, ExportError> {
        build_export(&self.leads, &self.range)
    }

    /// Export into a workbook file, returning the number of rows written
    pub fn export_to(&self, sheet_name: &str, path: &Path) -> Result<usize, ExportError> {
        let rows = self.export()?;
        save_workbook(&rows, sheet_name, path)?;
        Ok(rows.len())
    }

    /// Forget the session locally; nothing is sent to the server
    pub fn logout(&mut self) -> Navigation {
        self.session.clear();
        self.leads.clear();
        self.pagination = Pagination::default();
        self.state = ViewState::Unauthenticated;
        Navigation::Login
    }
}
