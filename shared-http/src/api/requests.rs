use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::expiry::format_date;

/// Request body for login endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Request body for `POST /grant-create-access/:id`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrantCreateAccessRequest {
    /// `YYYY-MM-DD`, as produced by a date input
    pub expiry_date: String,
}

impl GrantCreateAccessRequest {
    pub fn new(expiry: NaiveDate) -> Self {
        Self {
            expiry_date: format_date(expiry),
        }
    }
}
