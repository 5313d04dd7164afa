use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppError {
    /// Form input rejected before any request is sent; shown as-is.
    Validation(String),
    Config(String),
    Network(String),
    Timeout(String),
    Http { status: u16, message: String },
    /// 401. The session layer has already reacted; callers only stop.
    Unauthorized,
    /// 403 with the server's message, if any. Already shown as a toast.
    Forbidden(Option<String>),
    Parse(String),
    Serialization(String),
}

impl AppError {
    /// Session errors were already surfaced by the interceptor and should not be
    /// rendered again inline.
    pub fn is_session_event(&self) -> bool {
        matches!(self, AppError::Unauthorized | AppError::Forbidden(_))
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(message) => formatter.write_str(message),
            AppError::Config(message) => write!(formatter, "Config error: {message}"),
            AppError::Network(message) => write!(formatter, "Network error: {message}"),
            AppError::Timeout(message) => write!(formatter, "Timeout: {message}"),
            AppError::Http { status, message } => {
                write!(formatter, "Request failed ({status}): {message}")
            }
            AppError::Unauthorized => write!(formatter, "Not signed in"),
            AppError::Forbidden(Some(message)) => write!(formatter, "Forbidden: {message}"),
            AppError::Forbidden(None) => write!(formatter, "Forbidden"),
            AppError::Parse(message) => write!(formatter, "Response error: {message}"),
            AppError::Serialization(message) => {
                write!(formatter, "Request error: {message}")
            }
        }
    }
}

impl std::error::Error for AppError {}

impl From<session_gate::Error> for AppError {
    fn from(err: session_gate::Error) -> Self {
        match err {
            session_gate::Error::Storage(message) => {
                AppError::Config(format!("Browser storage rejected the session: {message}"))
            }
            session_gate::Error::Transport(message) => AppError::Network(message),
            session_gate::Error::Revocation { status } => AppError::Http {
                status,
                message: "Sign-out was not acknowledged.".to_string(),
            },
            session_gate::Error::MissingAccessToken | session_gate::Error::MissingUserId => {
                AppError::Parse(err.to_string())
            }
        }
    }
}
