//! CLI error types.

use std::fmt;

use longshore_api::ApiError;
use longshore_core::{BadParameter, ResolveError, ResolveFailure};

/// CLI-specific errors.
#[derive(Debug)]
pub enum CliError {
    /// The platform API failed.
    Api(ApiError),
    /// An identifier did not resolve to exactly one object.
    Resolve(ResolveFailure),
    /// A user-supplied spec string was malformed.
    Parameter(BadParameter),
    /// Output formatting error.
    Format(String),
    /// A bulk command finished, but some identifiers failed to resolve.
    Partial {
        /// How many identifiers failed.
        failed: usize,
        /// How many identifiers were given.
        total: usize,
    },
    /// IO error.
    Io(std::io::Error),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api(e) => write!(f, "platform error: {e}"),
            Self::Resolve(e) => write!(f, "{e}"),
            Self::Parameter(e) => write!(f, "{e}"),
            Self::Format(msg) => write!(f, "format error: {msg}"),
            Self::Partial { failed, total } => {
                write!(f, "{failed} of {total} identifiers failed to resolve")
            }
            Self::Io(e) => write!(f, "IO error: {e}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Api(e) => Some(e),
            Self::Resolve(e) => Some(e),
            Self::Parameter(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ApiError> for CliError {
    fn from(err: ApiError) -> Self {
        Self::Api(err)
    }
}

impl From<ResolveFailure> for CliError {
    fn from(err: ResolveFailure) -> Self {
        Self::Resolve(err)
    }
}

impl From<ResolveError<ApiError>> for CliError {
    fn from(err: ResolveError<ApiError>) -> Self {
        match err {
            ResolveError::Failed(failure) => Self::Resolve(failure),
            ResolveError::Api(api) => Self::Api(api),
        }
    }
}

impl From<BadParameter> for CliError {
    fn from(err: BadParameter) -> Self {
        Self::Parameter(err)
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}
