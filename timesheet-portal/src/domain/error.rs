use std::fmt;

use thiserror::Error;

/// Structured failure of a remote call, shown verbatim to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteError {
    /// Short machine label.
    pub code: String,
    /// Human readable detail.
    pub message: String,
}

impl RemoteError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Text of the error banner: `[<code>]: <message>`.
    pub fn banner_text(&self) -> String {
        format!("[{}]: {}", self.code, self.message)
    }
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.banner_text())
    }
}

impl std::error::Error for RemoteError {}

/// Errors that end a mutation chain.
#[derive(Debug, Error)]
pub enum PortalError {
    #[error(transparent)]
    Remote(#[from] RemoteError),
    #[error("page fetch failed: {0}")]
    Page(String),
    #[error("no timesheet table found in the fetched page")]
    MissingTable,
    #[error("invalid markup: {0}")]
    InvalidMarkup(String),
}

impl PortalError {
    pub fn page(msg: impl Into<String>) -> Self {
        Self::Page(msg.into())
    }

    /// Banner form of the error. Failures that did not come from the remote store get a
    /// local code so every banner reads `[<code>]: <message>`.
    pub fn to_remote_error(&self) -> RemoteError {
        match self {
            PortalError::Remote(e) => e.clone(),
            PortalError::Page(msg) => RemoteError::new("PageError", msg.clone()),
            PortalError::MissingTable => RemoteError::new("MissingTable", self.to_string()),
            PortalError::InvalidMarkup(msg) => RemoteError::new("InvalidMarkup", msg.clone()),
        }
    }
}
