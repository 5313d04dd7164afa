//! Second-factor screens reached from the login flow. Both are public paths; the
//! pending user id in tab storage is what ties them to a login attempt.

mod setup;
mod verify;

pub(crate) use setup::MfaSetupPage;
pub(crate) use verify::MfaVerifyPage;
