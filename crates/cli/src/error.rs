use std::path::PathBuf;

/// libm-ci error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration file not found or invalid
    #[error("config error: {message}")]
    Config {
        message: String,
        path: Option<PathBuf>,
    },

    /// Invalid command-line arguments
    #[error("argument error: {0}")]
    Argument(String),

    /// File I/O error
    #[error("io error: {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A persisted artifact or tool output could not be decoded.
    #[error("parse error: {what}: {message}")]
    Parse { what: String, message: String },

    /// An external tool could not be run or exited unsuccessfully.
    #[error("{tool} failed: {message}")]
    Tool { tool: String, message: String },

    /// Repository access failed.
    #[error("git error: {0}")]
    Git(#[from] git2::Error),

    /// An external contract was broken (e.g. a merge ref without two parents).
    #[error("invariant violated: {0}")]
    Invariant(String),

    /// A checked-in artifact differs from freshly generated output.
    #[error("{} is out of date; rerun `libm-ci update-api-list`", .path.display())]
    Drift { path: PathBuf },

    /// Internal error (bug)
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type using libm-ci Error
pub type Result<T> = std::result::Result<T, Error>;

/// Process exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Command completed
    Success = 0,
    /// A checked-in artifact is stale
    CheckFailed = 1,
    /// Configuration or argument error
    ConfigError = 2,
    /// Tool, repository, or internal error
    InternalError = 3,
}

impl From<&Error> for ExitCode {
    fn from(err: &Error) -> Self {
        match err {
            Error::Config { .. } | Error::Argument(_) => ExitCode::ConfigError,
            Error::Drift { .. } => ExitCode::CheckFailed,
            Error::Io { .. } | Error::Parse { .. } | Error::Tool { .. } => {
                ExitCode::InternalError
            }
            Error::Git(_) | Error::Invariant(_) | Error::Internal(_) => ExitCode::InternalError,
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
