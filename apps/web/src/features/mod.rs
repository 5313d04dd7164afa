//! Domain-level frontend features. Routes import these modules to keep view code
//! focused while session and API handling live in dedicated feature areas.

pub(crate) mod auth;
pub(crate) mod profile;
