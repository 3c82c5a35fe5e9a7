use dioxus::prelude::*;

use crate::api::ApiError;

/// In-memory token store shared through context. Cleared on reload.
#[derive(Clone, Copy, PartialEq)]
pub struct Session {
    token: Signal<Option<String>>,
    username: Signal<Option<String>>,
}

impl Session {
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: Signal::new(token),
            username: Signal::new(None),
        }
    }

    pub fn token(&self) -> Option<String> {
        self.token.read().clone()
    }

    pub fn username(&self) -> Option<String> {
        self.username.read().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.read().is_some()
    }

    pub fn set_token(&mut self, token: String, username: Option<String>) {
        self.token.set(Some(token));
        self.username.set(username);
    }

    pub fn clear(&mut self) {
        self.token.set(None);
        self.username.set(None);
    }

    /// Drops the token if one is held. Returns whether anything changed;
    /// an already empty session is left untouched so readers are not
    /// notified again.
    pub fn expire(&mut self) -> bool {
        if self.token.peek().is_none() {
            return false;
        }
        self.clear();
        true
    }

    /// Signs out when the backend refused the token.
    pub fn sign_out_if_rejected(&mut self, err: &ApiError) -> bool {
        err.needs_sign_in() && self.expire()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dioxus::dioxus_core::VirtualDom;
    use std::cell::RefCell;

    thread_local! {
        static OUTCOME: RefCell<Vec<(bool, bool)>> = const { RefCell::new(Vec::new()) };
    }

    fn record(changed: bool, session: &Session) {
        let signed_in = session.token.peek().is_some();
        OUTCOME.with(|o| o.borrow_mut().push((changed, signed_in)));
    }

    fn run(app: fn() -> Element) -> Vec<(bool, bool)> {
        OUTCOME.with(|o| o.borrow_mut().clear());
        let mut dom = VirtualDom::new(app);
        dom.rebuild_in_place();
        OUTCOME.with(|o| o.borrow().clone())
    }

    #[test]
    fn test_unauthorized_clears_stale_token() {
        fn app() -> Element {
            let mut session = use_hook(|| Session::new(Some("stale".to_string())));
            let changed = session.sign_out_if_rejected(&ApiError::Unauthorized);
            record(changed, &session);
            let again = session.sign_out_if_rejected(&ApiError::MissingToken);
            record(again, &session);
            rsx! {}
        }

        assert_eq!(run(app), vec![(true, false), (false, false)]);
    }

    #[test]
    fn test_other_errors_keep_session() {
        fn app() -> Element {
            let mut session = use_hook(|| Session::new(Some("valid".to_string())));
            let err = ApiError::Status {
                status: 404,
                message: "User not found".to_string(),
            };
            let changed = session.sign_out_if_rejected(&err);
            record(changed, &session);
            rsx! {}
        }

        assert_eq!(run(app), vec![(false, true)]);
    }
}
