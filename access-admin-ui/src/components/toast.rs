pub use dioxus_primitives::toast::ToastProvider;
