use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, Utc};
use tracing::debug;

use crate::access::{AccessStatus, StatusFilter};
use crate::expiry::expiry_instant;
use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Role {
    Admin,
    User,
    Other(String),
}

impl Role {
    pub fn from_label(label: Option<&str>, is_admin: bool) -> Self {
        if is_admin {
            return Role::Admin;
        }
        match label.map(str::trim) {
            None | Some("") => Role::User,
            Some(l) if l.eq_ignore_ascii_case("admin") => Role::Admin,
            Some(l) if l.eq_ignore_ascii_case("user") => Role::User,
            Some(l) => Role::Other(l.to_string()),
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub has_create_access: bool,
    pub create_access_expiry: Option<DateTime<Utc>>,
}

impl Member {
    pub fn status(&self, now: DateTime<Utc>) -> AccessStatus {
        AccessStatus::derive(self.has_create_access, self.create_access_expiry, now)
    }

    /// Case-insensitive substring match on username or email. `needle`
    /// must already be lowercased.
    fn matches_query(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.username.to_lowercase().contains(needle)
            || self.email.to_lowercase().contains(needle)
    }
}

/// Per-status totals shown on the filter tabs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub all: usize,
    pub active: usize,
    pub expired: usize,
    pub no_access: usize,
}

impl StatusCounts {
    pub fn get(&self, filter: StatusFilter) -> usize {
        match filter {
            StatusFilter::All => self.all,
            StatusFilter::Active => self.active,
            StatusFilter::Expired => self.expired,
            StatusFilter::NoAccess => self.no_access,
        }
    }
}

/// Client-side state of the access table: the non-admin users from the
/// last successful fetch plus the rows with a request in flight.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Roster {
    members: Vec<Member>,
    processing: HashSet<String>,
}

impl Roster {
    pub fn new(members: impl IntoIterator<Item = Member>) -> Self {
        let mut roster = Self::default();
        roster.replace_all(members);
        roster
    }

    /// Reloads the table from a fresh fetch. In-flight flags survive for
    /// rows that are still present.
    pub fn replace_all(&mut self, members: impl IntoIterator<Item = Member>) {
        self.members = members.into_iter().filter(|m| !m.role.is_admin()).collect();
        let ids: HashSet<&str> = self.members.iter().map(|m| m.id.as_str()).collect();
        self.processing.retain(|id| ids.contains(id.as_str()));
        debug!(count = self.members.len(), "roster reloaded");
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.id == id)
    }

    pub fn search<'a>(&'a self, query: &str) -> impl Iterator<Item = &'a Member> + use<'a> {
        let needle = query.trim().to_lowercase();
        self.members
            .iter()
            .filter(move |m| m.matches_query(&needle))
    }

    pub fn visible(&self, query: &str, filter: StatusFilter, now: DateTime<Utc>) -> Vec<Member> {
        self.search(query)
            .filter(|m| m.status(now).matches(filter))
            .cloned()
            .collect()
    }

    pub fn counts(&self, query: &str, now: DateTime<Utc>) -> StatusCounts {
        self.search(query)
            .fold(StatusCounts::default(), |mut counts, member| {
                counts.all += 1;
                match member.status(now) {
                    AccessStatus::Active { .. } => counts.active += 1,
                    AccessStatus::Expired { .. } => counts.expired += 1,
                    AccessStatus::NoAccess => counts.no_access += 1,
                }
                counts
            })
    }

    pub fn is_processing(&self, id: &str) -> bool {
        self.processing.contains(id)
    }

    /// Marks a row busy before its request is sent. Only one request per
    /// row may be in flight.
    pub fn begin(&mut self, id: &str) -> Result<()> {
        if self.get(id).is_none() {
            return Err(Error::UserNotFound(id.to_string()));
        }
        if !self.processing.insert(id.to_string()) {
            return Err(Error::AlreadyProcessing(id.to_string()));
        }
        Ok(())
    }

    pub fn finish(&mut self, id: &str) {
        self.processing.remove(id);
    }

    /// Records a successful grant. The server's copy of the user wins over
    /// the locally requested expiry.
    pub fn apply_grant(
        &mut self,
        id: &str,
        expiry: NaiveDate,
        server_member: Option<Member>,
    ) -> Result<()> {
        let member = self.get_mut(id)?;
        match server_member {
            Some(updated) => *member = updated,
            None => {
                member.has_create_access = true;
                member.create_access_expiry = Some(expiry_instant(expiry));
            }
        }
        Ok(())
    }

    pub fn apply_revoke(&mut self, id: &str, server_member: Option<Member>) -> Result<()> {
        let member = self.get_mut(id)?;
        match server_member {
            Some(updated) => *member = updated,
            None => {
                member.has_create_access = false;
                member.create_access_expiry = None;
            }
        }
        Ok(())
    }

    fn get_mut(&mut self, id: &str) -> Result<&mut Member> {
        self.members
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| Error::UserNotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expiry::{ExpiryWindow, format_date};
    use chrono::{Duration, TimeZone};
    use fake::Fake;
    use fake::faker::internet::en::{SafeEmail, Username};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 9, 30, 0).unwrap()
    }

    fn member(id: &str, username: &str, email: &str) -> Member {
        Member {
            id: id.to_string(),
            username: username.to_string(),
            email: email.to_string(),
            role: Role::User,
            has_create_access: false,
            create_access_expiry: None,
        }
    }

    fn sample() -> Roster {
        let mut admin = member("0", "root", "root@example.com");
        admin.role = Role::Admin;

        let mut active = member("1", "alice", "alice@example.com");
        active.has_create_access = true;
        active.create_access_expiry = Some(now() + Duration::days(3));

        let mut expired = member("2", "bob", "bob@corp.io");
        expired.has_create_access = true;
        expired.create_access_expiry = Some(now() - Duration::days(3));

        Roster::new(vec![admin, active, expired, member("3", "carol", "CAROL@corp.io")])
    }

    #[test]
    fn test_role_from_label() {
        assert_eq!(Role::from_label(Some("Admin"), false), Role::Admin);
        assert_eq!(Role::from_label(Some("user"), false), Role::User);
        assert_eq!(Role::from_label(None, false), Role::User);
        assert_eq!(Role::from_label(Some("user"), true), Role::Admin);
        assert_eq!(
            Role::from_label(Some("moderator"), false),
            Role::Other("moderator".to_string())
        );
    }

    #[test]
    fn test_admins_are_excluded() {
        let roster = sample();
        assert_eq!(roster.len(), 3);
        assert!(roster.get("0").is_none());
    }

    #[test]
    fn test_search_on_username_and_email() {
        let roster = sample();

        let ids = |q: &str| roster.search(q).map(|m| m.id.clone()).collect::<Vec<_>>();
        assert_eq!(ids(""), vec!["1", "2", "3"]);
        assert_eq!(ids("  "), vec!["1", "2", "3"]);
        assert_eq!(ids("ALI"), vec!["1"]);
        assert_eq!(ids("corp.io"), vec!["2", "3"]);
        assert_eq!(ids("carol@"), vec!["3"]);
        assert!(ids("zed").is_empty());
    }

    #[test]
    fn test_visible_applies_status_filter() {
        let roster = sample();

        let active = roster.visible("", StatusFilter::Active, now());
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].username, "alice");

        let no_access = roster.visible("corp", StatusFilter::NoAccess, now());
        assert_eq!(no_access.len(), 1);
        assert_eq!(no_access[0].username, "carol");
    }

    #[test]
    fn test_counts() {
        let roster = sample();
        let counts = roster.counts("", now());

        assert_eq!(
            counts,
            StatusCounts {
                all: 3,
                active: 1,
                expired: 1,
                no_access: 1
            }
        );
        assert_eq!(roster.counts("bob", now()).get(StatusFilter::Expired), 1);
        assert_eq!(roster.counts("bob", now()).get(StatusFilter::Active), 0);
    }

    #[test]
    fn test_single_request_in_flight_per_row() {
        let mut roster = sample();

        roster.begin("1").unwrap();
        assert!(roster.is_processing("1"));
        assert_eq!(
            roster.begin("1"),
            Err(Error::AlreadyProcessing("1".to_string()))
        );

        // Other rows are independent
        roster.begin("2").unwrap();

        roster.finish("1");
        assert!(!roster.is_processing("1"));
        assert!(roster.begin("1").is_ok());
    }

    #[test]
    fn test_begin_unknown_user() {
        let mut roster = sample();
        assert_eq!(roster.begin("0"), Err(Error::UserNotFound("0".to_string())));
    }

    #[test]
    fn test_apply_grant_without_server_copy() {
        let mut roster = sample();
        let expiry = NaiveDate::from_ymd_opt(2026, 11, 17).unwrap();

        roster.apply_grant("3", expiry, None).unwrap();

        let carol = roster.get("3").unwrap();
        assert!(carol.has_create_access);
        assert_eq!(carol.create_access_expiry, Some(expiry_instant(expiry)));
        assert!(carol.status(now()).is_active());
    }

    #[test]
    fn test_grant_on_earliest_date_stays_active() {
        let mut roster = sample();
        let window = ExpiryWindow::at(now());
        let expiry = window.parse(&format_date(window.min())).unwrap();

        roster.apply_grant("3", expiry, None).unwrap();

        let carol = roster.get("3").unwrap();
        assert!(carol.status(now()).is_active());
        assert_eq!(roster.counts("", now()).active, 2);

        let end_of_day = Utc.with_ymd_and_hms(2026, 10, 18, 23, 59, 59).unwrap();
        assert!(carol.status(end_of_day).is_active());
        assert!(!carol.status(now() + Duration::days(1)).is_active());
    }

    #[test]
    fn test_apply_grant_prefers_server_copy() {
        let mut roster = sample();
        let expiry = NaiveDate::from_ymd_opt(2026, 11, 17).unwrap();

        let mut updated = roster.get("3").unwrap().clone();
        updated.has_create_access = true;
        updated.create_access_expiry = Some(now() + Duration::days(60));

        roster.apply_grant("3", expiry, Some(updated.clone())).unwrap();
        assert_eq!(roster.get("3"), Some(&updated));
    }

    #[test]
    fn test_apply_revoke_clears_expiry() {
        let mut roster = sample();

        roster.apply_revoke("1", None).unwrap();

        let alice = roster.get("1").unwrap();
        assert!(!alice.has_create_access);
        assert_eq!(alice.create_access_expiry, None);
        assert_eq!(alice.status(now()), AccessStatus::NoAccess);
    }

    #[test]
    fn test_apply_to_missing_user() {
        let mut roster = sample();
        assert!(roster.apply_revoke("42", None).is_err());
        assert!(
            roster
                .apply_grant("42", NaiveDate::from_ymd_opt(2026, 11, 1).unwrap(), None)
                .is_err()
        );
    }

    #[test]
    fn test_replace_all_keeps_processing_for_present_rows() {
        let mut roster = sample();
        roster.begin("1").unwrap();
        roster.begin("2").unwrap();

        let alice = roster.get("1").unwrap().clone();
        roster.replace_all(vec![alice]);

        assert!(roster.is_processing("1"));
        assert!(!roster.is_processing("2"));
        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn test_search_over_generated_users() {
        let members: Vec<Member> = (0..25)
            .map(|i| {
                let username: String = Username().fake();
                let email: String = SafeEmail().fake();
                member(&i.to_string(), &username, &email)
            })
            .collect();
        let roster = Roster::new(members.clone());

        for m in &members {
            let hits: Vec<&Member> = roster.search(&m.username.to_uppercase()).collect();
            assert!(hits.iter().any(|hit| hit.id == m.id));
        }
        assert_eq!(roster.search("").count(), members.len());
    }
}
