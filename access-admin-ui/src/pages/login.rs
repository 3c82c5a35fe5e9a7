use std::time::Duration;

use dioxus::prelude::*;

use crate::Route;
use crate::api::ApiClient;
use crate::components::{button::Button, input::Input};
use crate::session::Session;
use dioxus_primitives::toast::{ToastOptions, use_toast};
use gloo_timers::future::TimeoutFuture;

#[component]
pub fn Login() -> Element {
    let mut username: Signal<String> = use_signal(|| "".to_string());
    let mut password: Signal<String> = use_signal(|| "".to_string());
    let mut submitting = use_signal(|| false);
    let mut session = use_context::<Session>();
    let client = use_context::<ApiClient>();
    let toaster = use_toast();
    let nav = navigator();

    // A token from configuration skips the form
    use_effect(move || {
        if session.is_authenticated() {
            nav.replace(Route::AccessManagement {});
        }
    });

    rsx! {
        div { id: "login",
            div { class: "login-card",
                h1 { "User Access Console" }
                p { class: "login-subtitle", "Sign in with an administrator account." }

                form {
                    class: "login-form",
                    onsubmit: move |e: FormEvent| e.prevent_default(),
                    div { class: "form-group",
                        label { r#for: "username",
                            "Username"
                            span { class: "required", "*" }
                        }
                        Input {
                            id: "username",
                            r#type: "text",
                            name: "username",
                            placeholder: "Administrator username",
                            required: true,
                            oninput: move |e: Event<FormData>| username.set(e.value()),
                        }
                    }

                    div { class: "form-group",
                        label { r#for: "password",
                            "Password"
                            span { class: "required", "*" }
                        }
                        Input {
                            id: "password",
                            r#type: "password",
                            name: "password",
                            placeholder: "Enter password",
                            required: true,
                            oninput: move |e: Event<FormData>| password.set(e.value()),
                        }
                    }

                    div { align_content: "center",
                        Button {
                            disabled: submitting(),
                            onclick: move |_| {
                                let username_val = username();
                                let password_val = password();
                                let client = client.clone();
                                submitting.set(true);

                                spawn(async move {
                                    let login_result = client.login(&username_val, &password_val).await;

                                    match login_result {
                                        Ok(response) => {
                                            let display_name = response
                                                .username
                                                .clone()
                                                .unwrap_or_else(|| username_val.clone());
                                            let success_options = ToastOptions::new()
                                                .duration(Duration::from_secs(1))
                                                .permanent(false);

                                            toaster
                                                .success(
                                                    format!("Welcome back, {}", display_name),
                                                    success_options,
                                                );
                                            TimeoutFuture::new(1000).await;
                                            submitting.set(false);
                                            // Navigation follows from the effect above
                                            session.set_token(response.token, Some(display_name));
                                        }
                                        Err(err) => {
                                            let error_options = ToastOptions::new().permanent(true);
                                            toaster.error(format!("Login failed. {}", err), error_options);
                                            submitting.set(false);
                                        }
                                    }
                                });
                            },
                            r#type: "button",
                            if submitting() { "Signing in..." } else { "Sign in" }
                        }
                    }
                }
            }
        }
    }
}
