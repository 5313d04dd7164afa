//! Shared frontend utilities: the request client, configuration, errors and build
//! metadata.
//!
//! Every API call goes through `ApiClient`. It attaches the bearer token from the
//! credential store and reports 401/403 to the `SessionEvents` sink it was built
//! with, so pages never deal with session expiry themselves. Tokens are never
//! logged or rendered.

pub(crate) mod api;
#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub(crate) mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}
pub(crate) mod config;
pub(crate) mod errors;

pub(crate) const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub(crate) use api::ApiClient;
pub(crate) use config::AppConfig;
pub(crate) use errors::AppError;
