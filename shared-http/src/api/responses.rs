use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::{Member, Role};

/// A user as returned by `GET /allUsers`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub is_admin: Option<bool>,
    #[serde(default)]
    pub has_create_access: bool,
    #[serde(default)]
    pub create_access_expiry: Option<DateTime<Utc>>,
}

impl From<UserRecord> for Member {
    fn from(record: UserRecord) -> Self {
        Self {
            role: Role::from_label(record.role.as_deref(), record.is_admin.unwrap_or(false)),
            id: record.id,
            username: record.username,
            email: record.email,
            has_create_access: record.has_create_access,
            create_access_expiry: record.create_access_expiry,
        }
    }
}

/// Body of `GET /allUsers`. Accepts a bare array or an object wrapping it.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AllUsersResponse {
    List(Vec<UserRecord>),
    Wrapped { users: Vec<UserRecord> },
}

impl AllUsersResponse {
    pub fn into_users(self) -> Vec<UserRecord> {
        match self {
            AllUsersResponse::List(users) | AllUsersResponse::Wrapped { users } => users,
        }
    }
}

/// Body returned by the grant and revoke endpoints
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccessChangeResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub user: Option<UserRecord>,
}

/// Response body for successful login
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    /// Bearer token for subsequent requests
    pub token: String,
    #[serde(default)]
    pub username: Option<String>,
}

// Error response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            message: None,
            error: Some(error.into()),
        }
    }

    /// Human-readable reason, preferring `message` over `error`.
    pub fn reason(&self) -> Option<&str> {
        [self.message.as_deref(), self.error.as_deref()]
            .into_iter()
            .flatten()
            .find(|s| !s.trim().is_empty())
    }
}
