use chrono::{NaiveDate, Utc};
use dioxus::prelude::*;
use dioxus_primitives::toast::{ToastOptions, use_toast};
use shared::expiry::format_date;
use shared::{AccessStatus, ExpiryWindow, Member, Roster, StatusFilter};
use strum::IntoEnumIterator;

use crate::Route;
use crate::api::ApiClient;
use crate::components::button::{Button, ButtonVariant};
use crate::components::input::Input;
use crate::session::Session;
use crate::widgets::empty_state::EmptyState;
use crate::widgets::grant_dialog::GrantDialog;
use crate::widgets::header::Header;
use crate::widgets::tabs::{TabItem, Tabs};

/// Text for the "Expires" column.
fn expiry_text(status: &AccessStatus, today: NaiveDate) -> String {
    match status {
        AccessStatus::Active { expires_at: None } => "No expiry".to_string(),
        AccessStatus::Active {
            expires_at: Some(at),
        } => {
            let date = format_date(at.date_naive());
            match status.days_remaining(today) {
                Some(0) => format!("{date} (today)"),
                Some(1) => format!("{date} (1 day left)"),
                Some(days) => format!("{date} ({days} days left)"),
                None => date,
            }
        }
        AccessStatus::Expired { expired_at } => {
            format!("Expired {}", format_date(expired_at.date_naive()))
        }
        AccessStatus::NoAccess => "-".to_string(),
    }
}

#[component]
pub fn AccessManagement() -> Element {
    let mut session = use_context::<Session>();
    let client = use_context::<ApiClient>();
    let toaster = use_toast();
    let nav = navigator();

    let mut roster = use_signal(Roster::default);
    let mut query = use_signal(String::new);
    let mut active_tab = use_signal(StatusFilter::default);
    let mut grant_target = use_signal(|| Option::<Member>::None);

    // Re-fetches whenever the session token changes
    let mut users = use_resource({
        let client = client.clone();
        move || {
            let client = client.clone();
            let token = session.token();
            async move { client.list_users(token.as_deref()).await }
        }
    });

    use_effect(move || {
        let rejected = match &*users.read() {
            Some(Ok(records)) => {
                roster
                    .write()
                    .replace_all(records.iter().cloned().map(Member::from));
                false
            }
            Some(Err(err)) => err.needs_sign_in(),
            None => false,
        };
        // A rejected token must not survive, or Login bounces straight back here
        if rejected {
            session.expire();
        }
    });

    let grant = use_callback({
        let client = client.clone();
        move |(member, expiry): (Member, NaiveDate)| {
            grant_target.set(None);
            if let Err(e) = roster.write().begin(&member.id) {
                toaster.error(e.to_string(), ToastOptions::new());
                return;
            }
            let client = client.clone();
            let token = session.token();

            spawn(async move {
                match client
                    .grant_create_access(token.as_deref(), &member.id, expiry)
                    .await
                {
                    Ok(change) => {
                        let server_copy = change.user.map(Member::from);
                        let applied = roster.write().apply_grant(&member.id, expiry, server_copy);
                        if let Err(e) = applied {
                            warn!("Granted access but could not update the table: {}", e);
                        }
                        let message = change.message.unwrap_or_else(|| {
                            format!(
                                "Create access granted to {} until {}",
                                member.username,
                                format_date(expiry)
                            )
                        });
                        toaster.success(message, ToastOptions::new());
                    }
                    Err(err) => {
                        warn!("Grant for {} failed: {}", member.id, err);
                        session.sign_out_if_rejected(&err);
                        toaster.error(
                            format!("Could not grant access to {}: {}", member.username, err),
                            ToastOptions::new(),
                        );
                    }
                }
                roster.write().finish(&member.id);
            });
        }
    });

    let revoke = use_callback({
        let client = client.clone();
        move |member: Member| {
            if let Err(e) = roster.write().begin(&member.id) {
                toaster.error(e.to_string(), ToastOptions::new());
                return;
            }
            let client = client.clone();
            let token = session.token();

            spawn(async move {
                match client
                    .revoke_create_access(token.as_deref(), &member.id)
                    .await
                {
                    Ok(change) => {
                        let server_copy = change.user.map(Member::from);
                        let applied = roster.write().apply_revoke(&member.id, server_copy);
                        if let Err(e) = applied {
                            warn!("Revoked access but could not update the table: {}", e);
                        }
                        let message = change.message.unwrap_or_else(|| {
                            format!("Create access revoked from {}", member.username)
                        });
                        toaster.success(message, ToastOptions::new());
                    }
                    Err(err) => {
                        warn!("Revoke for {} failed: {}", member.id, err);
                        session.sign_out_if_rejected(&err);
                        toaster.error(
                            format!("Could not revoke access from {}: {}", member.username, err),
                            ToastOptions::new(),
                        );
                    }
                }
                roster.write().finish(&member.id);
            });
        }
    });

    let now = Utc::now();
    let today = now.date_naive();
    let search = query();
    let counts = roster.read().counts(&search, now);
    let visible = roster.read().visible(&search, active_tab(), now);
    let tabs: Vec<TabItem> = StatusFilter::iter()
        .map(|filter| TabItem {
            filter,
            count: counts.get(filter),
        })
        .collect();
    let empty_description = if roster.read().is_empty() {
        "There are no non-admin users yet."
    } else {
        "No users match the current search and filter."
    };

    rsx! {
        Header {}
        div { class: "page-container",
            div { class: "page-header",
                h1 { "Create Access" }
                p { class: "page-subtitle",
                    "Grant or revoke time-limited permission to create content."
                }
            }

            div { class: "toolbar",
                Input {
                    r#type: "search",
                    name: "search",
                    placeholder: "Search by username or email",
                    value: "{search}",
                    oninput: move |e: FormEvent| query.set(e.value()),
                }
                Button {
                    variant: ButtonVariant::Outline,
                    r#type: "button",
                    onclick: move |_| users.restart(),
                    "Refresh"
                }
            }

            Tabs {
                items: tabs,
                active_tab: active_tab(),
                on_tab_change: move |filter| active_tab.set(filter),
            }

            div { class: "tab-content",
                match users.read().as_ref() {
                    None => rsx! {
                        div { class: "loading", "Loading users..." }
                    },
                    Some(Err(err)) if err.needs_sign_in() => rsx! {
                        EmptyState {
                            icon: "🔒".to_string(),
                            title: "Sign in required".to_string(),
                            description: err.to_string(),
                            is_error: true,
                            action_label: Some("Sign in".to_string()),
                            on_action: Some(EventHandler::new(move |_| {
                                session.clear();
                                nav.push(Route::Login {});
                            })),
                        }
                    },
                    Some(Err(err)) => rsx! {
                        EmptyState {
                            icon: "⚠️".to_string(),
                            title: "Could not load users".to_string(),
                            description: err.to_string(),
                            is_error: true,
                            action_label: Some("Retry".to_string()),
                            on_action: Some(EventHandler::new(move |_| users.restart())),
                        }
                    },
                    Some(Ok(_)) if visible.is_empty() => rsx! {
                        EmptyState {
                            icon: "👤".to_string(),
                            title: "No users found".to_string(),
                            description: empty_description.to_string(),
                            action_label: None,
                            on_action: None,
                        }
                    },
                    Some(Ok(_)) => rsx! {
                        table { class: "access-table",
                            thead {
                                tr {
                                    th { "User" }
                                    th { "Email" }
                                    th { "Status" }
                                    th { "Expires" }
                                    th { class: "actions", "Actions" }
                                }
                            }
                            tbody {
                                for member in visible.iter().cloned() {
                                    {
                                        let id = member.id.clone();
                                        let processing = roster.read().is_processing(&id);
                                        let status = member.status(now);
                                        rsx! {
                                            AccessRow {
                                                key: "{id}",
                                                member,
                                                status,
                                                today,
                                                processing,
                                                on_grant: move |m: Member| grant_target.set(Some(m)),
                                                on_revoke: revoke,
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    },
                }
            }
        }

        if let Some(member) = grant_target() {
            GrantDialog {
                key: "{member.id}",
                member: member.clone(),
                window: ExpiryWindow::at(now),
                on_confirm: grant,
                on_cancel: move |_| grant_target.set(None),
            }
        }
    }
}

#[component]
fn AccessRow(
    member: Member,
    status: AccessStatus,
    today: NaiveDate,
    processing: bool,
    on_grant: EventHandler<Member>,
    on_revoke: EventHandler<Member>,
) -> Element {
    let label = status.label();
    let expires = expiry_text(&status, today);
    let grant_label = if status.is_active() { "Extend" } else { "Grant" };
    let grant_member = member.clone();
    let revoke_member = member.clone();

    rsx! {
        tr { class: if processing { "access-row processing" } else { "access-row" },
            td { class: "user-cell", "{member.username}" }
            td { class: "email-cell", "{member.email}" }
            td {
                span { class: status.css_class(), "{label}" }
            }
            td { class: "expiry-cell", "{expires}" }
            td { class: "actions",
                Button {
                    r#type: "button",
                    disabled: processing,
                    onclick: move |_| on_grant.call(grant_member.clone()),
                    if processing { "Working..." } else { "{grant_label}" }
                }
                if member.has_create_access {
                    Button {
                        variant: ButtonVariant::Destructive,
                        r#type: "button",
                        disabled: processing,
                        onclick: move |_| on_revoke.call(revoke_member.clone()),
                        "Revoke"
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone};

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    #[test]
    fn test_expiry_text_for_active_grants() {
        let soon = AccessStatus::Active {
            expires_at: Some(at(2026, 10, 19)),
        };
        assert_eq!(expiry_text(&soon, today()), "2026-10-19 (1 day left)");

        let later = AccessStatus::Active {
            expires_at: Some(at(2026, 11, 17)),
        };
        assert_eq!(expiry_text(&later, today()), "2026-11-17 (30 days left)");

        let same_day = AccessStatus::Active {
            expires_at: Some(Utc.with_ymd_and_hms(2026, 10, 18, 23, 0, 0).unwrap()),
        };
        assert_eq!(expiry_text(&same_day, today()), "2026-10-18 (today)");

        let open_ended = AccessStatus::Active { expires_at: None };
        assert_eq!(expiry_text(&open_ended, today()), "No expiry");
    }

    #[test]
    fn test_expiry_text_for_inactive_grants() {
        let expired = AccessStatus::Expired {
            expired_at: at(2026, 9, 1),
        };
        assert_eq!(expiry_text(&expired, today()), "Expired 2026-09-01");
        assert_eq!(expiry_text(&AccessStatus::NoAccess, today()), "-");
    }
}
