//! `window.localStorage` backend for the session store

use birjuram::session::{KeyValueStorage, SessionError, SessionResult};
use wasm_bindgen::JsValue;

/// Session persistence in `localStorage`
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl BrowserStorage {
    fn storage(&self) -> SessionResult<web_sys::Storage> {
        web_sys::window()
            .ok_or_else(|| SessionError::Storage("no window".to_string()))?
            .local_storage()
            .map_err(js_error)?
            .ok_or_else(|| SessionError::Storage("localStorage unavailable".to_string()))
    }
}

fn js_error(value: JsValue) -> SessionError {
    SessionError::Storage(
        value
            .as_string()
            .unwrap_or_else(|| format!("{:?}", value)),
    )
}

impl KeyValueStorage for BrowserStorage {
    fn get_item(&self, key: &str) -> SessionResult<Option<String>> {
        self.storage()?.get_item(key).map_err(js_error)
    }

    fn set_item(&self, key: &str, value: &str) -> SessionResult<()> {
        self.storage()?.set_item(key, value).map_err(js_error)
    }

    fn remove_item(&self, key: &str) -> SessionResult<()> {
        self.storage()?.remove_item(key).map_err(js_error)
    }
}
