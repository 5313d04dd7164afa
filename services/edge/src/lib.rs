//! # EZRCM Edge
//!
//! `ezrcm-edge` serves the compiled settings portal and runs the first of the two
//! session gates before any page reaches the browser.
//!
//! ## Pre-render redirect
//!
//! For every page request the redirector classifies the path with the shared
//! `session_gate::PathPolicy`:
//!
//! - **Public** (`/login`, `/authentication/verify`, `/authentication/setup` and
//!   their sub-paths): served as-is.
//! - **Protected** (everything else): served only when the `ezrcm_signed_in=1`
//!   marker cookie is present, otherwise answered with a `307` to
//!   `/login?redirect=<original path and query>`.
//!
//! The API namespace (`/api`), build output, images, files with static extensions
//! and the `/health` and `/live` probes are never gated, so backend calls are not
//! turned into HTML login pages.
//!
//! The marker cookie is not a credential. It only prevents protected screens from
//! flashing before the browser-side guard checks the stored token.

pub mod api;
pub mod cli;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_commit_hash_format() {
        if GIT_COMMIT_HASH == "unknown" {
            // Acceptable in non-git build environments
            return;
        }
        assert!(
            GIT_COMMIT_HASH.chars().all(|c| c.is_ascii_hexdigit()),
            "GIT_COMMIT_HASH should be a hex string, got: {GIT_COMMIT_HASH}"
        );
        assert!(
            GIT_COMMIT_HASH.len() >= 7,
            "GIT_COMMIT_HASH should be at least 7 characters long, got: {GIT_COMMIT_HASH}"
        );
    }
}
