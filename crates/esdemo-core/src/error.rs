use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Search engine returned {status} [{error_type}]: {reason}")]
    Status {
        status: u16,
        error_type: String,
        reason: String,
    },

    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error("Response body of {actual} bytes exceeds the {limit} byte buffer limit")]
    ResponseTooLarge { limit: u64, actual: u64 },
}

/// Coarse classification of an [`Error`], used where callers only care
/// about where a failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Config,
    Connection,
    Status,
    Decode,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidConfig(_) => ErrorKind::Config,
            Error::Connection(_) => ErrorKind::Connection,
            Error::Status { .. } => ErrorKind::Status,
            Error::Decode(_) | Error::ResponseTooLarge { .. } => ErrorKind::Decode,
        }
    }

    /// True when the failure came from talking to the cluster: it was
    /// unreachable or it answered with an error status.
    pub fn is_search_engine_error(&self) -> bool {
        matches!(self.kind(), ErrorKind::Connection | ErrorKind::Status)
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_cluster_failures() {
        assert!(Error::Connection("refused".into()).is_search_engine_error());
        let status = Error::Status { status: 404, error_type: "index_not_found_exception".into(), reason: "no such index".into() };
        assert!(status.is_search_engine_error());
        assert!(!Error::Decode("eof".into()).is_search_engine_error());
        assert!(!Error::InvalidConfig("port".into()).is_search_engine_error());
        assert_eq!(Error::ResponseTooLarge { limit: 1, actual: 2 }.kind(), ErrorKind::Decode);
    }

    #[test]
    fn status_message_names_type_and_reason() {
        let err = Error::Status { status: 400, error_type: "parsing_exception".into(), reason: "bad query".into() };
        assert_eq!(err.to_string(), "Search engine returned 400 [parsing_exception]: bad query");
    }
}
