//! Session Token Store
//!
//! One bearer token, persisted in localStorage and mirrored into a signal so
//! the header/nav react to login and logout without a page reload.

use leptos::prelude::*;

/// localStorage key holding the raw bearer token. Absence means logged-out.
pub const TOKEN_KEY: &str = "token";

/// Holds the current bearer token alongside its durable copy.
///
/// Constructed once at app start (reading the persisted value) and handed to
/// the [`ApiClient`](crate::api::ApiClient); the token is trusted until the
/// server rejects it, no expiry tracking.
#[derive(Clone, Copy)]
pub struct Session {
    /// Current token. Components subscribe to this for login state.
    pub token: RwSignal<Option<String>>,
}

impl Session {
    /// Reads the persisted token, if any.
    pub fn load() -> Self {
        Self {
            token: RwSignal::new(persist::read()),
        }
    }

    /// Stores the token (or clears it when `None`) in memory and localStorage.
    pub fn set(&self, token: Option<String>) {
        persist::write(token.as_deref());
        self.token.set(token);
    }

    /// Current token without subscribing to changes.
    pub fn get(&self) -> Option<String> {
        self.token.get_untracked()
    }
}

/// localStorage access. Compiled to no-ops off wasm so session logic stays
/// drivable from plain tests.
mod persist {
    #[cfg(target_arch = "wasm32")]
    fn local_storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok().flatten())
    }

    #[cfg(target_arch = "wasm32")]
    pub fn read() -> Option<String> {
        local_storage().and_then(|s| s.get_item(super::TOKEN_KEY).ok().flatten())
    }

    #[cfg(target_arch = "wasm32")]
    pub fn write(token: Option<&str>) {
        let Some(storage) = local_storage() else {
            return;
        };
        let result = match token {
            Some(value) => storage.set_item(super::TOKEN_KEY, value),
            None => storage.remove_item(super::TOKEN_KEY),
        };
        if result.is_err() {
            web_sys::console::warn_1(&"failed to persist session token".into());
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn read() -> Option<String> {
        None
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn write(_token: Option<&str>) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_key_is_stable() {
        // Persisted sessions break if this ever changes.
        assert_eq!(TOKEN_KEY, "token");
    }

    #[test]
    fn test_set_then_get() {
        let session = Session::load();
        assert_eq!(session.get(), None);
        session.set(Some("abc123".to_string()));
        assert_eq!(session.get(), Some("abc123".to_string()));
    }

    #[test]
    fn test_clear() {
        let session = Session::load();
        session.set(Some("abc123".to_string()));
        session.set(None);
        assert_eq!(session.get(), None);
    }
}
