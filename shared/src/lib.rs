// shared/src/lib.rs

use chrono::NaiveDate;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("user not found: {0}")]
    UserNotFound(String),
    #[error("a request is already in progress for user {0}")]
    AlreadyProcessing(String),
    #[error("invalid date: {0}")]
    InvalidDate(String),
    #[error("expiry date {date} is before {min}")]
    ExpiryInPast { date: NaiveDate, min: NaiveDate },
}

pub type Result<T> = std::result::Result<T, Error>;

pub mod access;
pub mod expiry;
pub mod roster;

pub use access::{AccessStatus, StatusFilter};
pub use expiry::ExpiryWindow;
pub use roster::{Member, Role, Roster, StatusCounts};
