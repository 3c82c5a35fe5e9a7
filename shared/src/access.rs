use chrono::{DateTime, NaiveDate, Utc};
use strum_macros::{Display, EnumIter};

/// Display status of a user's create access, derived from the stored flag
/// and expiry at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessStatus {
    /// Flag set and either no expiry or an expiry still ahead.
    Active { expires_at: Option<DateTime<Utc>> },
    /// Flag set but the expiry day is over.
    Expired { expired_at: DateTime<Utc> },
    NoAccess,
}

impl AccessStatus {
    /// Expiries are compared by UTC calendar day: a grant expiring on a
    /// given date stays active until that date is over.
    pub fn derive(
        has_access: bool,
        expiry: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Self {
        if !has_access {
            return AccessStatus::NoAccess;
        }
        match expiry {
            Some(at) if at.date_naive() < now.date_naive() => {
                AccessStatus::Expired { expired_at: at }
            }
            expires_at => AccessStatus::Active { expires_at },
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AccessStatus::Active { .. } => "Active",
            AccessStatus::Expired { .. } => "Expired",
            AccessStatus::NoAccess => "No access",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            AccessStatus::Active { .. } => "status-badge active",
            AccessStatus::Expired { .. } => "status-badge expired",
            AccessStatus::NoAccess => "status-badge none",
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, AccessStatus::Active { .. })
    }

    /// Whole days left before an active grant lapses. `None` for grants
    /// without an expiry and for any non-active status.
    pub fn days_remaining(&self, today: NaiveDate) -> Option<i64> {
        match self {
            AccessStatus::Active {
                expires_at: Some(at),
            } => Some((at.date_naive() - today).num_days()),
            _ => None,
        }
    }

    pub fn matches(&self, filter: StatusFilter) -> bool {
        match filter {
            StatusFilter::All => true,
            StatusFilter::Active => matches!(self, AccessStatus::Active { .. }),
            StatusFilter::Expired => matches!(self, AccessStatus::Expired { .. }),
            StatusFilter::NoAccess => matches!(self, AccessStatus::NoAccess),
        }
    }
}

/// Tabs above the user table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumIter, Display)]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Expired,
    #[strum(to_string = "No access")]
    NoAccess,
}
