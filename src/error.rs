use thiserror::Error;

/// Classifies malformed host input for programmatic matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidDomainKind {
    /// Host is empty (or only the root dot)
    Empty,
    /// Host exceeds 253 octets in ASCII form
    TooLong,
    /// Host contains an empty label ("a..b", leading dot)
    EmptyLabel,
    /// A label exceeds 63 octets in ASCII form
    LabelTooLong,
    /// A label contains a character outside `[a-z0-9-_]`
    IllegalCharacter,
    /// Host is an IP address literal, which has no public suffix
    IpAddress,
    /// IDNA (UTS-46) conversion to ASCII failed
    Idna,
}

/// Classifies rule list loading errors for programmatic matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadErrorKind {
    /// Required path or URL not configured
    NotConfigured,
    /// File open/read failure
    FileError,
    /// Download or verification failure
    DownloadFailed,
}

/// TLD engine error types
#[derive(Error, Debug)]
pub enum TldError {
    #[error("Parse error at line {line}: {message}")]
    ParseErrorAtLine { line: usize, message: String },

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid domain '{host}': {message}")]
    InvalidDomain {
        kind: InvalidDomainKind,
        host: String,
        message: String,
    },

    #[error("Unable to resolve '{host}': {message}")]
    UnresolvableDomain { host: String, message: String },

    #[error("Load error: {message}")]
    LoadError {
        kind: LoadErrorKind,
        message: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl TldError {
    pub(crate) fn invalid_domain(
        kind: InvalidDomainKind,
        host: &str,
        message: impl Into<String>,
    ) -> Self {
        TldError::InvalidDomain {
            kind,
            host: host.to_string(),
            message: message.into(),
        }
    }

    pub(crate) fn load(kind: LoadErrorKind, message: impl Into<String>) -> Self {
        TldError::LoadError {
            kind,
            message: message.into(),
        }
    }

    /// Returns the kind when this is an `InvalidDomain` error.
    pub fn invalid_domain_kind(&self) -> Option<InvalidDomainKind> {
        match self {
            TldError::InvalidDomain { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, TldError>;
