use std::fmt;

/// Errors that can occur in the gateway crate.
#[derive(Debug)]
pub enum Error {
    /// The execution context could not be resolved to a request
    Context(ContextError),
    /// A normalized payload could not be decoded into the requested type
    Decode(serde_json::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Context(e) => write!(f, "Context resolution failed: {}", e),
            Error::Decode(e) => write!(f, "Payload decoding failed: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Context(e) => Some(e),
            Error::Decode(e) => Some(e),
        }
    }
}

impl From<ContextError> for Error {
    fn from(e: ContextError) -> Self {
        Error::Context(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Decode(e)
    }
}

/// HTTP status attached to an error so the request pipeline can build a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HttpStatus(u16);

impl HttpStatus {
    /// 500 Internal Server Error
    pub const INTERNAL_SERVER_ERROR: HttpStatus = HttpStatus(500);

    /// Returns the numeric status code.
    pub fn as_u16(&self) -> u16 {
        self.0
    }

    /// Returns the canonical reason phrase, if the code is one this crate emits.
    pub fn canonical_reason(&self) -> Option<&'static str> {
        match self.0 {
            500 => Some("Internal Server Error"),
            _ => None,
        }
    }
}

impl fmt::Display for HttpStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.canonical_reason() {
            Some(reason) => write!(f, "{} {}", self.0, reason),
            None => write!(f, "{}", self.0),
        }
    }
}

/// A failure to resolve an execution context, with details about what failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextError {
    kind: ContextErrorKind,
    message: String,
}

impl ContextError {
    /// Creates a new context error.
    pub fn new(kind: ContextErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Builds the error returned for a call style the resolver does not handle.
    pub fn unsupported(context_type: impl Into<String>) -> Self {
        let context_type = context_type.into();
        let message = format!(
            "context type `{}` is not supported for request resolution",
            context_type
        );
        Self::new(
            ContextErrorKind::UnsupportedContextType { context_type },
            message,
        )
    }

    /// Returns the error kind.
    pub fn kind(&self) -> &ContextErrorKind {
        &self.kind
    }

    /// Returns the error message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the HTTP status the request pipeline should answer with.
    pub fn status(&self) -> HttpStatus {
        match self.kind {
            ContextErrorKind::UnsupportedContextType { .. } => HttpStatus::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for ContextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]: {}", self.kind, self.status(), self.message)
    }
}

impl std::error::Error for ContextError {}

/// The kind of context resolution failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextErrorKind {
    /// The call style has no request resolver
    UnsupportedContextType {
        /// The discriminator of the rejected context
        context_type: String,
    },
}

impl fmt::Display for ContextErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextErrorKind::UnsupportedContextType { context_type } => {
                write!(f, "Unsupported context type '{}'", context_type)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_names_the_style() {
        let err = ContextError::unsupported("websocket");
        assert!(err.message().contains("websocket"));
        assert_eq!(
            err.kind(),
            &ContextErrorKind::UnsupportedContextType {
                context_type: "websocket".to_string()
            }
        );
    }

    #[test]
    fn unsupported_is_internal_server_error() {
        let err = ContextError::unsupported("ws");
        assert_eq!(err.status(), HttpStatus::INTERNAL_SERVER_ERROR);
        assert_eq!(err.status().as_u16(), 500);
    }

    #[test]
    fn display_includes_kind_status_and_message() {
        let err = ContextError::unsupported("kafka");
        let out = format!("{}", err);
        assert!(out.contains("Unsupported context type 'kafka'"));
        assert!(out.contains("500 Internal Server Error"));
    }

    #[test]
    fn error_wraps_context_error() {
        let err: Error = ContextError::unsupported("ws").into();
        assert!(matches!(err, Error::Context(_)));
        assert!(std::error::Error::source(&err).is_some());
        assert!(format!("{}", err).starts_with("Context resolution failed"));
    }

    #[test]
    fn http_status_display_without_reason() {
        assert_eq!(format!("{}", HttpStatus(599)), "599");
    }
}
