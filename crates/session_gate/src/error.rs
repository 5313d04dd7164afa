use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("storage unavailable: {0}")]
    Storage(String),
    #[error("token revocation failed with status {status}")]
    Revocation { status: u16 },
    #[error("transport error: {0}")]
    Transport(String),
    #[error("login response did not include an access token")]
    MissingAccessToken,
    #[error("login response did not include a user id")]
    MissingUserId,
}
