use crate::components::button::{Button, ButtonVariant};
use dioxus::prelude::*;

#[component]
pub fn EmptyState(
    icon: String,
    title: String,
    description: String,
    #[props(default)] is_error: bool,
    action_label: Option<String>,
    on_action: Option<EventHandler<MouseEvent>>,
) -> Element {
    let action_variant = if is_error {
        ButtonVariant::Secondary
    } else {
        ButtonVariant::Primary
    };

    rsx! {
        div { class: if is_error { "empty-state error" } else { "empty-state" },
            div { class: "empty-icon", "{icon}" }
            h3 { class: "empty-title", "{title}" }
            p { class: "empty-description", "{description}" }
            if let Some(label) = action_label {
                Button {
                    variant: action_variant,
                    r#type: "button",
                    onclick: move |e| {
                        if let Some(handler) = &on_action {
                            handler.call(e);
                        }
                    },
                    "{label}"
                }
            }
        }
    }
}
