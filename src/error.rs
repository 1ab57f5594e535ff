type BoxedCause = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },

    #[error(transparent)]
    User(#[from] UserError),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display, strum_macros::AsRefStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    InvalidArgument,
    User,
    Json,
}

impl Error {
    pub(crate) fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            Self::User(_) => ErrorKind::User,
            Self::Json(_) => ErrorKind::Json,
        }
    }

    pub fn is_user_error(&self) -> bool {
        self.kind() == ErrorKind::User
    }
}

/// A failure caused by operator input or configuration rather than an
/// internal defect.
///
/// Display prints only the message, so top-level reporting can show it as-is.
/// The wrapped cause, if any, is reachable through [`UserError::cause`] and
/// [`std::error::Error::source`].
#[derive(thiserror::Error, Debug)]
#[error("{message}")]
pub struct UserError {
    message: String,
    #[source]
    cause: Option<BoxedCause>,
}

impl UserError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            cause: None,
        }
    }

    pub fn with_cause(message: impl Into<String>, cause: impl Into<BoxedCause>) -> Self {
        Self {
            message: message.into(),
            cause: Some(cause.into()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn cause(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        self.cause.as_deref()
    }

    pub fn into_cause(self) -> Option<BoxedCause> {
        self.cause
    }
}
