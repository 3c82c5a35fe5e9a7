use chrono::NaiveDate;
use dioxus::prelude::*;
use shared::expiry::{DEFAULT_GRANT_DAYS, format_date};
use shared::{ExpiryWindow, Member};

use crate::components::button::{Button, ButtonVariant};
use crate::components::dialog::Dialog;
use crate::components::input::Input;

/// Expiry picker shown before granting create access. Mount it keyed by
/// the member id so each opening starts from the default date.
#[component]
pub fn GrantDialog(
    member: Member,
    window: ExpiryWindow,
    on_confirm: EventHandler<(Member, NaiveDate)>,
    on_cancel: EventHandler<()>,
) -> Element {
    let mut value = use_signal(|| format_date(window.default_pick()));
    let mut error = use_signal(|| Option::<String>::None);

    let min = format_date(window.min());
    let title = format!("Grant create access to {}", member.username);

    let confirm = move |_: MouseEvent| match window.parse(&value()) {
        Ok(date) => on_confirm.call((member.clone(), date)),
        Err(e) => error.set(Some(e.to_string())),
    };

    rsx! {
        Dialog { title, on_close: move |_| on_cancel.call(()),
            form {
                class: "grant-form",
                onsubmit: move |e: FormEvent| e.prevent_default(),
                div { class: "form-group",
                    label { r#for: "expiry-date",
                        "Access expires on"
                        span { class: "required", "*" }
                    }
                    Input {
                        id: "expiry-date",
                        r#type: "date",
                        name: "expiry-date",
                        min: "{min}",
                        value: "{value}",
                        required: true,
                        oninput: move |e: FormEvent| {
                            error.set(None);
                            value.set(e.value());
                        },
                    }
                    p { class: "form-hint", "Defaults to {DEFAULT_GRANT_DAYS} days from today." }
                    if let Some(message) = error() {
                        p { class: "form-error", role: "alert", "{message}" }
                    }
                }
                div { class: "dialog-actions",
                    Button {
                        variant: ButtonVariant::Outline,
                        r#type: "button",
                        onclick: move |_| on_cancel.call(()),
                        "Cancel"
                    }
                    Button { r#type: "button", onclick: confirm, "Grant access" }
                }
            }
        }
    }
}
