use dioxus::prelude::*;

mod api;
mod components;
mod config;
mod pages;
mod session;
mod widgets;

use components::toast::ToastProvider;
use pages::{AccessManagement, Login};
use session::Session;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(Shell)]
    #[route("/")]
    Login {},
    #[route("/access")]
    AccessManagement {},
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    // Load environment variables from .env file (if exists)
    match dotenvy::dotenv() {
        Ok(_) => info!("Loaded environment variables from .env file"),
        Err(_) => info!("No .env file found, using system environment variables"),
    }

    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    let api_client = use_context_provider(api::ApiClient::new);
    use_context_provider(|| Session::new(api_client.config().api_token.clone()));

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        ToastProvider { Router::<Route> {} }
    }
}

/// Shared page frame.
#[component]
fn Shell() -> Element {
    rsx! {
        main { class: "app-shell",
            Outlet::<Route> {}
        }
    }
}
