use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::Lead;

/// Read access to the lead store.
///
/// Implementations always return leads newest-first by `created_at`.
#[async_trait]
pub trait LeadRepository: Send + Sync {
    async fn list_newest_first(&self) -> Result<Vec<Lead>, DatabaseError>;

    async fn ping(&self) -> Result<(), DatabaseError>;
}

/// PostgreSQL-backed lead repository
pub struct PgLeadRepository {
    select_sql: String,
    pool: PgPool,
}

impl PgLeadRepository {
    pub fn new(table_name: &str, pool: PgPool) -> Result<Self, DatabaseError> {
        let table = DatabaseManager::quoted_table(table_name)?;
        let select_sql = format!(
            "SELECT id, name, mobile, email, model, created_at FROM {} ORDER BY created_at DESC",
            table
        );
        Ok(Self { select_sql, pool })
    }
}

#[async_trait]
impl LeadRepository for PgLeadRepository {
    async fn list_newest_first(&self) -> Result<Vec<Lead>, DatabaseError> {
        let rows = sqlx::query_as::<_, Lead>(&self.select_sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
