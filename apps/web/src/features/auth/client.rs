//! Auth endpoints of the EZRCM API. Credentials and tokens pass through here but
//! are never logged.

use crate::app_lib::{ApiClient, AppError};
use session_gate::{Error, LoginRequest, LoginResponse, MfaVerifyRequest, TokenRevoker};

const LOGIN_PATH: &str = "/api/Auth/login";
const VERIFY_MFA_PATH: &str = "/api/Auth/verify-mfa";
const LOGOUT_PATH: &str = "/api/Auth/logout";

/// Exchanges email and password for a token or an MFA challenge.
pub async fn login(api: &ApiClient, request: &LoginRequest) -> Result<LoginResponse, AppError> {
    api.post_credentials(LOGIN_PATH, request).await
}

/// Submits the second factor for a pending challenge.
pub async fn verify_mfa(
    api: &ApiClient,
    request: &MfaVerifyRequest,
) -> Result<LoginResponse, AppError> {
    api.post_credentials(VERIFY_MFA_PATH, request).await
}

impl TokenRevoker for ApiClient {
    async fn revoke(&self, token: &str) -> Result<(), Error> {
        match self.post_empty_with_token(LOGOUT_PATH, token).await {
            Ok(()) => Ok(()),
            Err(AppError::Http { status, .. }) => Err(Error::Revocation { status }),
            Err(err) => Err(Error::Transport(err.to_string())),
        }
    }
}
