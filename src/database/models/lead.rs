use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;

/// A prospective-customer record captured by the intake process.
///
/// Serialized with camelCase keys (`createdAt`) to match the wire shape of
/// `GET /api/leads`. When read back from the wire the identifier is ignored,
/// since clients number rows by position, and missing or `null` text fields
/// become empty strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    #[serde(default, skip_deserializing)]
    pub id: i64,
    #[serde(default, deserialize_with = "empty_if_null")]
    pub name: String,
    #[serde(default, deserialize_with = "empty_if_null")]
    pub mobile: String,
    #[serde(default, deserialize_with = "empty_if_null")]
    pub email: String,
    #[serde(default, deserialize_with = "empty_if_null")]
    pub model: String,
    pub created_at: DateTime<Utc>,
}

fn empty_if_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
