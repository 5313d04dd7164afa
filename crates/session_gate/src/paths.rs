//! Public/protected path classification. The edge redirector and the client route
//! guard both decide from the same `PathPolicy`, so adding a public screen here is
//! the only change needed for both layers to agree.

use url::form_urlencoded;

pub const LOGIN_PATH: &str = "/login";
pub const MFA_VERIFY_PATH: &str = "/authentication/verify";
pub const MFA_SETUP_PATH: &str = "/authentication/setup";
pub const HOME_PATH: &str = "/";
/// Query parameter carrying the originally requested path to the login screen.
pub const REDIRECT_PARAM: &str = "redirect";

/// Path prefixes reachable without a session. Sub-paths are public as well.
pub const PUBLIC_PREFIXES: &[&str] = &[LOGIN_PATH, MFA_VERIFY_PATH, MFA_SETUP_PATH];

/// Prefixes the edge never gates: the API namespace, build output and images.
pub const EDGE_BYPASS_PREFIXES: &[&str] = &["/api", "/pkg", "/assets", "/static", "/images"];

/// Extensions served as static files; requests for them skip the edge gate.
const STATIC_EXTENSIONS: &[&str] = &[
    "js", "wasm", "css", "map", "ico", "svg", "png", "jpg", "jpeg", "gif", "webp", "woff",
    "woff2", "ttf", "txt", "json", "webmanifest",
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathPolicy {
    public_prefixes: Vec<String>,
    login_path: String,
}

impl Default for PathPolicy {
    fn default() -> Self {
        Self::new(PUBLIC_PREFIXES.iter().copied(), LOGIN_PATH)
    }
}

impl PathPolicy {
    pub fn new<I, S>(public_prefixes: I, login_path: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let public_prefixes = public_prefixes
            .into_iter()
            .map(|prefix| normalize_prefix(&prefix.into()))
            .collect();
        Self {
            public_prefixes,
            login_path: login_path.into(),
        }
    }

    #[must_use]
    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    /// Returns true when `target` (path, optionally with query or fragment) is
    /// one of the public prefixes or lies beneath one of them.
    #[must_use]
    pub fn is_public(&self, target: &str) -> bool {
        let path = path_only(target);
        self.public_prefixes
            .iter()
            .any(|prefix| matches_prefix(path, prefix))
    }

    #[must_use]
    pub fn is_protected(&self, target: &str) -> bool {
        !self.is_public(target)
    }

    /// Builds `/login?redirect=<original>` with the original target percent-encoded.
    #[must_use]
    pub fn login_redirect(&self, original: &str) -> String {
        let encoded: String = form_urlencoded::byte_serialize(original.as_bytes()).collect();
        format!("{}?{REDIRECT_PARAM}={encoded}", self.login_path)
    }

    /// Resolves the post-login destination. Only same-origin absolute paths that
    /// are not themselves public screens are honored; anything else lands on `/`.
    #[must_use]
    pub fn return_target(&self, requested: Option<&str>) -> String {
        requested
            .map(str::trim)
            .filter(|target| is_local_path(target))
            .filter(|target| self.is_protected(target))
            .map_or_else(|| HOME_PATH.to_string(), str::to_string)
    }
}

/// Returns true when the edge should serve `path` without consulting the cookie.
#[must_use]
pub fn bypasses_edge(path: &str) -> bool {
    let path = path_only(path);
    if EDGE_BYPASS_PREFIXES
        .iter()
        .any(|prefix| matches_prefix(path, prefix))
    {
        return true;
    }

    let last_segment = path.rsplit('/').next().unwrap_or_default();
    last_segment
        .rsplit_once('.')
        .is_some_and(|(stem, ext)| {
            !stem.is_empty() && STATIC_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str())
        })
}

fn path_only(target: &str) -> &str {
    let end = target.find(['?', '#']).unwrap_or(target.len());
    &target[..end]
}

fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_end_matches('/');
    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

// Segment-aware: `/login` covers `/login` and `/login/...` but not `/loginx`.
fn matches_prefix(path: &str, prefix: &str) -> bool {
    path.strip_prefix(prefix)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

// Browsers strip tab/CR/LF while parsing, so `/\t/host` would become `//host`.
fn is_local_path(target: &str) -> bool {
    target.starts_with('/')
        && !target.starts_with("//")
        && !target[1..].starts_with(char::is_whitespace)
        && !target.chars().any(char::is_control)
        && !target.contains('\\')
        && !target.contains("://")
}
