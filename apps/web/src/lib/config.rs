//! Build-time configuration with an optional runtime override read from
//! `window.EZRCM_CONFIG`, so one static build can be pointed at different API
//! hosts or storage keys. Values here are public; never put secrets in them.

use session_gate::{StorageKeys, cookies::MAX_COOKIE_AGE_SECONDS};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub access_token_key: String,
    pub refresh_token_key: String,
    /// Lifetime of the sign-in marker cookie. Capped by the credential store.
    pub session_max_age_seconds: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        let keys = StorageKeys::default();
        Self {
            api_base_url: String::new(),
            access_token_key: keys.access_token,
            refresh_token_key: keys.refresh_token,
            session_max_age_seconds: MAX_COOKIE_AGE_SECONDS,
        }
    }
}

impl AppConfig {
    /// Loads config from build-time environment variables and applies runtime overrides.
    pub fn load() -> Self {
        let mut config = Self::from_build_env(BuildEnv {
            api_base_url: option_env!("EZRCM_API_BASE_URL"),
            access_token_key: option_env!("EZRCM_ACCESS_TOKEN_KEY"),
            refresh_token_key: option_env!("EZRCM_REFRESH_TOKEN_KEY"),
            session_max_age_seconds: option_env!("EZRCM_SESSION_MAX_AGE_SECONDS"),
        });

        if let Some(runtime) = runtime_config() {
            apply_runtime_overrides(&mut config, runtime);
        }

        config
    }

    fn from_build_env(env: BuildEnv) -> Self {
        let mut config = Self::default();
        apply_runtime_overrides(
            &mut config,
            RuntimeConfig {
                api_base_url: env.api_base_url.and_then(normalize_runtime_value),
                access_token_key: env.access_token_key.and_then(normalize_runtime_value),
                refresh_token_key: env.refresh_token_key.and_then(normalize_runtime_value),
                session_max_age_seconds: env.session_max_age_seconds.and_then(parse_max_age),
            },
        );
        config
    }

    /// Storage keys with the configured token key names.
    pub fn storage_keys(&self) -> StorageKeys {
        StorageKeys {
            access_token: self.access_token_key.clone(),
            refresh_token: self.refresh_token_key.clone(),
            ..StorageKeys::default()
        }
    }
}

struct BuildEnv {
    api_base_url: Option<&'static str>,
    access_token_key: Option<&'static str>,
    refresh_token_key: Option<&'static str>,
    session_max_age_seconds: Option<&'static str>,
}

#[derive(Default)]
struct RuntimeConfig {
    api_base_url: Option<String>,
    access_token_key: Option<String>,
    refresh_token_key: Option<String>,
    session_max_age_seconds: Option<u64>,
}

fn apply_runtime_overrides(config: &mut AppConfig, runtime: RuntimeConfig) {
    if let Some(value) = runtime.api_base_url {
        config.api_base_url = value;
    }
    if let Some(value) = runtime.access_token_key {
        config.access_token_key = value;
    }
    if let Some(value) = runtime.refresh_token_key {
        config.refresh_token_key = value;
    }
    if let Some(value) = runtime.session_max_age_seconds {
        config.session_max_age_seconds = value;
    }
}

#[cfg(target_arch = "wasm32")]
fn runtime_config() -> Option<RuntimeConfig> {
    use js_sys::{Object, Reflect};
    use wasm_bindgen::JsValue;

    let window = web_sys::window()?;
    let config = Reflect::get(&window, &JsValue::from_str("EZRCM_CONFIG")).ok()?;
    if config.is_null() || config.is_undefined() {
        return None;
    }
    let object = Object::from(config);

    Some(RuntimeConfig {
        api_base_url: read_runtime_value(&object, "api_base_url"),
        access_token_key: read_runtime_value(&object, "access_token_key"),
        refresh_token_key: read_runtime_value(&object, "refresh_token_key"),
        session_max_age_seconds: read_runtime_value(&object, "session_max_age_seconds")
            .as_deref()
            .and_then(parse_max_age),
    })
}

#[cfg(not(target_arch = "wasm32"))]
fn runtime_config() -> Option<RuntimeConfig> {
    None
}

/// Reads a string or number property; numbers arrive as JS floats.
#[cfg(target_arch = "wasm32")]
fn read_runtime_value(object: &js_sys::Object, key: &str) -> Option<String> {
    let value = js_sys::Reflect::get(object, &wasm_bindgen::JsValue::from_str(key)).ok()?;
    let text = value
        .as_string()
        .or_else(|| value.as_f64().map(|number| number.to_string()))?;
    normalize_runtime_value(&text)
}

fn normalize_runtime_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Positive whole seconds; anything else is ignored.
fn parse_max_age(value: &str) -> Option<u64> {
    value.trim().parse::<u64>().ok().filter(|seconds| *seconds > 0)
}
