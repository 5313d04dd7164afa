//! Browser adapters for the credential store: `localStorage` for tokens,
//! `sessionStorage` for MFA flags and `document.cookie` for the sign-in marker.
//! Every access looks the surface up again and treats its absence as empty.

use session_gate::{CookieJar, Error, KeyValueStore};
use tracing::debug;
use wasm_bindgen::JsCast;
use web_sys::{HtmlDocument, Storage};

/// `window.localStorage`.
pub struct DurableStorage;

/// `window.sessionStorage`.
pub struct TabStorage;

/// `document.cookie`.
pub struct DocumentCookies;

fn local_storage() -> Option<Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

fn session_storage() -> Option<Storage> {
    web_sys::window()?.session_storage().ok().flatten()
}

fn html_document() -> Option<HtmlDocument> {
    web_sys::window()?
        .document()?
        .dyn_into::<HtmlDocument>()
        .ok()
}

fn read_item(storage: Option<Storage>, key: &str) -> Option<String> {
    storage?.get_item(key).ok().flatten()
}

fn write_item(storage: Option<Storage>, name: &str, key: &str, value: &str) -> Result<(), Error> {
    let storage = storage.ok_or_else(|| Error::Storage(format!("{name} is not available")))?;
    storage
        .set_item(key, value)
        .map_err(|err| Error::Storage(format!("{name} rejected {key}: {err:?}")))
}

fn remove_item(storage: Option<Storage>, key: &str) {
    if let Some(storage) = storage {
        if let Err(err) = storage.remove_item(key) {
            debug!("Unable to remove {key}: {err:?}");
        }
    }
}

impl KeyValueStore for DurableStorage {
    fn get(&self, key: &str) -> Option<String> {
        read_item(local_storage(), key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Error> {
        write_item(local_storage(), "localStorage", key, value)
    }

    fn remove(&self, key: &str) {
        remove_item(local_storage(), key);
    }
}

impl KeyValueStore for TabStorage {
    fn get(&self, key: &str) -> Option<String> {
        read_item(session_storage(), key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Error> {
        write_item(session_storage(), "sessionStorage", key, value)
    }

    fn remove(&self, key: &str) {
        remove_item(session_storage(), key);
    }
}

impl CookieJar for DocumentCookies {
    fn header(&self) -> Option<String> {
        html_document()?.cookie().ok()
    }

    fn write(&self, assignment: &str) -> Result<(), Error> {
        let document =
            html_document().ok_or_else(|| Error::Storage("document is not available".to_string()))?;
        document
            .set_cookie(assignment)
            .map_err(|err| Error::Storage(format!("cookie write rejected: {err:?}")))
    }
}
