//! Session & Browser Storage
//!
//! Access token handling on top of a small key-value abstraction, so the
//! same code runs against `sessionStorage` in the browser and an in-memory
//! map in tests.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::config::SessionConfig;
use crate::error::{AppError, Result};

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// `window.sessionStorage` / `window.localStorage`
pub struct BrowserStorage(web_sys::Storage);

impl BrowserStorage {
    pub fn session() -> Option<Self> {
        web_sys::window()?.session_storage().ok().flatten().map(Self)
    }

    pub fn local() -> Option<Self> {
        web_sys::window()?.local_storage().ok().flatten().map(Self)
    }
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.0.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.0
            .set_item(key, value)
            .map_err(|e| AppError::storage(format!("set {}: {:?}", key, e)))
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.0
            .remove_item(key)
            .map_err(|e| AppError::storage(format!("remove {}: {:?}", key, e)))
    }
}

/// Stand-in when browser storage is blocked
#[derive(Default)]
pub struct MemoryStorage(RefCell<HashMap<String, String>>);

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.0.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.0.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.0.borrow_mut().remove(key);
        Ok(())
    }
}

/// The signed-in user's access token
#[derive(Clone)]
pub struct Session {
    store: Rc<dyn KeyValueStore>,
    token_key: String,
    login_page: String,
}

impl Session {
    pub fn new(store: Rc<dyn KeyValueStore>, config: &SessionConfig) -> Self {
        Self {
            store,
            token_key: config.token_key.clone(),
            login_page: config.login_page.clone(),
        }
    }

    /// Session backed by `sessionStorage`, or an empty in-memory store when
    /// the browser refuses access (the user then gets sent to login)
    pub fn browser(config: &SessionConfig) -> Self {
        let store: Rc<dyn KeyValueStore> = match BrowserStorage::session() {
            Some(storage) => Rc::new(storage),
            None => {
                log::warn!("[SESSION] sessionStorage unavailable, using memory");
                Rc::new(MemoryStorage::default())
            }
        };
        Self::new(store, config)
    }

    pub fn token(&self) -> Option<String> {
        self.store
            .get(&self.token_key)
            .filter(|token| !token.trim().is_empty())
    }

    pub fn require_token(&self) -> Result<String> {
        self.token().ok_or(AppError::MissingCredential)
    }

    pub fn sign_out(&self) -> Result<()> {
        self.store.remove(&self.token_key)
    }

    pub fn login_page(&self) -> &str {
        &self.login_page
    }
}

/// Navigate the browser to `url`
pub fn redirect(url: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    if let Err(e) = window.location().set_href(url) {
        log::error!("[SESSION] redirect to {} failed: {:?}", url, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_with(token: Option<&str>) -> Session {
        let store = MemoryStorage::default();
        if let Some(token) = token {
            store.set("accessToken", token).unwrap();
        }
        Session::new(Rc::new(store), &SessionConfig::default())
    }

    #[test]
    fn test_missing_token_is_missing_credential() {
        let session = session_with(None);
        assert!(matches!(session.require_token(), Err(AppError::MissingCredential)));
    }

    #[test]
    fn test_blank_token_counts_as_missing() {
        assert!(session_with(Some("  ")).token().is_none());
    }

    #[test]
    fn test_sign_out_clears_token() {
        let session = session_with(Some("abc.def"));
        assert_eq!(session.require_token().unwrap(), "abc.def");
        session.sign_out().unwrap();
        assert!(session.token().is_none());
        assert_eq!(session.login_page(), "login.html");
    }
}
