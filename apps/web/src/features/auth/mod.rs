//! Auth feature: browser storage adapters, the session provider, the route guard
//! and the auth API calls. Login, logout and 401 handling all end in the shared
//! `session_gate::Session`, so there is one definition of "signed out".

pub(crate) mod client;
mod guards;
pub(crate) mod state;
pub(crate) mod storage;

pub(crate) use guards::RequireAuth;
