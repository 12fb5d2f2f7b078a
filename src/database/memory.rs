use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

use crate::database::manager::DatabaseError;
use crate::database::models::Lead;
use crate::database::repository::LeadRepository;

/// In-process lead store for tests and database-less local runs
#[derive(Default)]
pub struct MemoryLeadRepository {
    leads: RwLock<Vec<Lead>>,
    failing: AtomicBool,
}

impl MemoryLeadRepository {
    pub fn new(leads: Vec<Lead>) -> Self {
        Self {
            leads: RwLock::new(leads),
            failing: AtomicBool::new(false),
        }
    }

    /// Make every subsequent read fail as if the store were down
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), DatabaseError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(DatabaseError::Unavailable("memory store switched off".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl LeadRepository for MemoryLeadRepository {
    async fn list_newest_first(&self) -> Result<Vec<Lead>, DatabaseError> {
        self.check_available()?;
        let mut leads = self.leads.read().await.clone();
        // Stable sort keeps insertion order for identical timestamps.
        leads.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(leads)
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        self.check_available()
    }
}
