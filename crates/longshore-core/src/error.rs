//! Parameter parsing error types with detailed rejection reasons.

use std::fmt;
use thiserror::Error;

/// The reason a spec string was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BadParameterKind {
    /// Entry was empty when a value was required.
    Empty,
    /// Entry did not match the expected grammar.
    InvalidFormat {
        /// Description of the expected grammar.
        expected: String,
    },
    /// A port field was not purely numeric.
    NonNumericPort {
        /// The offending port field.
        port: String,
    },
    /// The protocol suffix was neither `tcp` nor `udp`.
    UnknownProtocol {
        /// The offending protocol field.
        protocol: String,
    },
    /// An environment variable key was not identifier-shaped.
    InvalidKey {
        /// The offending key.
        key: String,
    },
    /// An environment variable value was empty or contained a forbidden
    /// character.
    InvalidValue {
        /// The offending value.
        value: String,
    },
}

impl fmt::Display for BadParameterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "entry cannot be empty"),
            Self::InvalidFormat { expected } => {
                write!(f, "expected {expected}")
            }
            Self::NonNumericPort { port } => {
                write!(f, "port '{port}' is not numeric")
            }
            Self::UnknownProtocol { protocol } => {
                write!(f, "unknown protocol '{protocol}', expected tcp or udp")
            }
            Self::InvalidKey { key } => {
                write!(f, "key '{key}' is not a valid identifier")
            }
            Self::InvalidValue { value } => {
                write!(f, "value '{value}' is empty or contains '=', '!' or '?'")
            }
        }
    }
}

/// Error returned when a spec string fails to parse.
///
/// Carries the whole offending entry so bulk parse failures can name the
/// exact token the operator typed.
#[derive(Debug, Clone, Error)]
#[error("bad {field} parameter '{token}': {kind}")]
pub struct BadParameter {
    /// The parameter family that was being parsed (port, link, env).
    pub field: String,
    /// The offending entry, verbatim.
    pub token: String,
    /// The reason the entry was rejected.
    pub kind: BadParameterKind,
}

impl BadParameter {
    /// Create a new bad-parameter error.
    #[must_use]
    pub fn new(field: impl Into<String>, token: impl Into<String>, kind: BadParameterKind) -> Self {
        Self {
            field: field.into(),
            token: token.into(),
            kind,
        }
    }

    /// Create an "empty entry" error.
    #[must_use]
    pub fn empty(field: impl Into<String>) -> Self {
        Self::new(field, "", BadParameterKind::Empty)
    }

    /// Create an "invalid format" error.
    #[must_use]
    pub fn invalid_format(
        field: impl Into<String>,
        token: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        Self::new(
            field,
            token,
            BadParameterKind::InvalidFormat {
                expected: expected.into(),
            },
        )
    }

    /// Create a "non-numeric port" error.
    #[must_use]
    pub fn non_numeric_port(
        field: impl Into<String>,
        token: impl Into<String>,
        port: impl Into<String>,
    ) -> Self {
        Self::new(
            field,
            token,
            BadParameterKind::NonNumericPort { port: port.into() },
        )
    }

    /// Create an "unknown protocol" error.
    #[must_use]
    pub fn unknown_protocol(
        field: impl Into<String>,
        token: impl Into<String>,
        protocol: impl Into<String>,
    ) -> Self {
        Self::new(
            field,
            token,
            BadParameterKind::UnknownProtocol {
                protocol: protocol.into(),
            },
        )
    }

    /// Create an "invalid key" error.
    #[must_use]
    pub fn invalid_key(
        field: impl Into<String>,
        token: impl Into<String>,
        key: impl Into<String>,
    ) -> Self {
        Self::new(field, token, BadParameterKind::InvalidKey { key: key.into() })
    }

    /// Create an "invalid value" error.
    #[must_use]
    pub fn invalid_value(
        field: impl Into<String>,
        token: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::new(
            field,
            token,
            BadParameterKind::InvalidValue {
                value: value.into(),
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_error() {
        let err = BadParameter::empty("port");
        assert_eq!(err.field, "port");
        assert_eq!(err.token, "");
        assert!(matches!(err.kind, BadParameterKind::Empty));
    }

    #[test]
    fn non_numeric_port_error_display() {
        let err = BadParameter::non_numeric_port("port", "80:abc", "abc");
        assert_eq!(
            err.to_string(),
            "bad port parameter '80:abc': port 'abc' is not numeric"
        );
    }

    #[test]
    fn unknown_protocol_error_display() {
        let err = BadParameter::unknown_protocol("port", "80:80/abc", "abc");
        assert!(err.to_string().contains("unknown protocol 'abc'"));
    }

    #[test]
    fn invalid_format_error_display() {
        let err = BadParameter::invalid_format("link", "mysql", "TARGET:ALIAS");
        assert_eq!(
            err.to_string(),
            "bad link parameter 'mysql': expected TARGET:ALIAS"
        );
    }

    #[test]
    fn invalid_key_error_carries_token() {
        let err = BadParameter::invalid_key("env", "1ADMIN=pass", "1ADMIN");
        assert_eq!(err.token, "1ADMIN=pass");
        assert!(matches!(err.kind, BadParameterKind::InvalidKey { .. }));
    }

    #[test]
    fn invalid_value_error_display() {
        let err = BadParameter::invalid_value("env", "KEY=a!b", "a!b");
        assert!(err.to_string().contains("contains '=', '!' or '?'"));
    }
}
