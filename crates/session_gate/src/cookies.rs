//! The sign-in marker cookie. It only mirrors "a token was stored" so the edge can
//! gate page requests without script storage; it carries no credential.

pub const SIGNED_IN_COOKIE: &str = "ezrcm_signed_in";
pub const SIGNED_IN_VALUE: &str = "1";
/// Upper bound for the marker lifetime, in seconds (8 hours).
pub const MAX_COOKIE_AGE_SECONDS: u64 = 28_800;

/// Finds a cookie value in a `Cookie` header or `document.cookie` string.
#[must_use]
pub fn find_cookie<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key.trim() == name).then(|| value.trim())
    })
}

/// Returns true when the header carries `ezrcm_signed_in=1`.
#[must_use]
pub fn is_signed_in(header: &str) -> bool {
    find_cookie(header, SIGNED_IN_COOKIE) == Some(SIGNED_IN_VALUE)
}

#[must_use]
pub fn signed_in_cookie(max_age_seconds: u64) -> String {
    let max_age = max_age_seconds.min(MAX_COOKIE_AGE_SECONDS);
    format!("{SIGNED_IN_COOKIE}={SIGNED_IN_VALUE}; Path=/; Max-Age={max_age}; SameSite=Lax")
}

#[must_use]
pub fn cleared_signed_in_cookie() -> String {
    format!("{SIGNED_IN_COOKIE}=; Path=/; Max-Age=0; SameSite=Lax")
}
