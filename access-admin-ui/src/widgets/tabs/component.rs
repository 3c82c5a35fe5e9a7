use dioxus::prelude::*;
use shared::StatusFilter;

#[derive(Clone, PartialEq, Props)]
pub struct TabItem {
    pub filter: StatusFilter,
    pub count: usize,
}

#[component]
pub fn Tabs(
    items: Vec<TabItem>,
    active_tab: StatusFilter,
    on_tab_change: EventHandler<StatusFilter>,
) -> Element {
    rsx! {
        div { class: "tabs", role: "tablist",
            for item in items {
                button {
                    key: "{item.filter}",
                    class: if item.filter == active_tab { "tab active" } else { "tab" },
                    role: "tab",
                    aria_selected: item.filter == active_tab,
                    onclick: move |_| on_tab_change.call(item.filter),
                    "{item.filter}"
                    span { class: "tab-count", " {item.count}" }
                }
            }
        }
    }
}
