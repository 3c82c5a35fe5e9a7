use dioxus::prelude::*;

/// Modal overlay. Clicking the backdrop closes it; clicks inside the panel
/// do not propagate to the backdrop.
#[component]
pub fn Dialog(title: String, on_close: EventHandler<()>, children: Element) -> Element {
    rsx! {
        div {
            class: "dialog-backdrop",
            onclick: move |_| on_close.call(()),
            div {
                class: "dialog",
                role: "dialog",
                aria_modal: "true",
                aria_label: "{title}",
                onclick: move |event: MouseEvent| event.stop_propagation(),
                onkeydown: move |event: KeyboardEvent| {
                    if event.key() == Key::Escape {
                        on_close.call(());
                    }
                },
                h2 { class: "dialog-title", "{title}" }
                {children}
            }
        }
    }
}
