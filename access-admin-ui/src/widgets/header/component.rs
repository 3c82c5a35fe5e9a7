use crate::components::button::{Button, ButtonVariant};
use crate::session::Session;
use dioxus::prelude::*;

#[component]
pub fn Header() -> Element {
    let mut session = use_context::<Session>();
    let nav = navigator();
    let signed_in_as = session.username().unwrap_or_else(|| "admin".to_string());

    rsx! {
        header { class: "app-header",
            h1 { class: "header-title", "User Access Console" }
            div { class: "header-actions",
                span { class: "header-user", "Signed in as {signed_in_as}" }
                Button {
                    variant: ButtonVariant::Ghost,
                    r#type: "button",
                    onclick: move |_| {
                        info!("User signed out");
                        session.clear();
                        nav.push(crate::Route::Login {});
                    },
                    "Sign out"
                }
            }
        }
    }
}
