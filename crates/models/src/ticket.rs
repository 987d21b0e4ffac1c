use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::record::{self, Record};

pub const CREATED_AT_FIELD: &str = "createdAt";
pub const USER_ID_FIELD: &str = "userId";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TicketStatus {
    Open,
    InProgress,
    Closed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

/// Owner reference. Clients send it either as a number or as a string; it is
/// never checked against the users collection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserRef {
    Number(u64),
    Text(String),
}

/// Typed view of a ticket record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub description: String,
    pub status: TicketStatus,
    pub priority: Priority,
    pub user_id: UserRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Ticket {
    pub fn to_record(&self) -> Result<Record, ModelError> {
        record::to_record(self)
    }
}

/// Current time as ISO-8601 UTC with millisecond precision,
/// e.g. `2024-01-14T14:20:00.000Z`.
pub fn created_at_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
