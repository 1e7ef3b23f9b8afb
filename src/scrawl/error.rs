use crate::duration::DurationError;
use crate::model::TagValidationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScrawlError {
    #[error("Setup error: {0}")]
    Setup(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid duration: {0}")]
    InvalidDuration(#[from] DurationError),

    #[error("Invalid tag: {0}")]
    InvalidTag(#[from] TagValidationError),

    #[error("No entries match the given filters")]
    EmptySelection,

    #[error("Index {index} is out of range (max index is {max})")]
    IndexOutOfRange { index: i64, max: usize },

    #[error("Editor error: {0}")]
    Editor(String),

    #[error("Encryption error: {0}")]
    Cipher(String),

    #[error("No content provided, nothing was saved")]
    EmptyContent,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ScrawlError {
    /// Process exit code for this error.
    ///
    /// `1` covers setup and configuration problems, `2` bad arguments and
    /// empty or out-of-range selections, `3` failures producing or writing
    /// entry content.
    pub fn exit_code(&self) -> i32 {
        match self {
            ScrawlError::Setup(_) | ScrawlError::Serialization(_) => 1,
            ScrawlError::InvalidArgument(_)
            | ScrawlError::InvalidDuration(_)
            | ScrawlError::InvalidTag(_)
            | ScrawlError::EmptySelection
            | ScrawlError::IndexOutOfRange { .. } => 2,
            ScrawlError::Editor(_)
            | ScrawlError::Cipher(_)
            | ScrawlError::EmptyContent
            | ScrawlError::Io(_) => 3,
        }
    }

    /// Whether a usage reminder should accompany the message.
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            ScrawlError::InvalidArgument(_)
                | ScrawlError::InvalidDuration(_)
                | ScrawlError::InvalidTag(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, ScrawlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_follow_taxonomy() {
        assert_eq!(ScrawlError::Setup("x".into()).exit_code(), 1);
        assert_eq!(ScrawlError::InvalidArgument("x".into()).exit_code(), 2);
        assert_eq!(ScrawlError::EmptySelection.exit_code(), 2);
        assert_eq!(
            ScrawlError::IndexOutOfRange { index: 9, max: 2 }.exit_code(),
            2
        );
        assert_eq!(ScrawlError::EmptyContent.exit_code(), 3);
        assert_eq!(ScrawlError::Editor("boom".into()).exit_code(), 3);
    }

    #[test]
    fn out_of_range_names_max_index() {
        let err = ScrawlError::IndexOutOfRange { index: -5, max: 3 };
        assert_eq!(
            err.to_string(),
            "Index -5 is out of range (max index is 3)"
        );
    }

    #[test]
    fn duration_errors_are_usage_errors() {
        let err: ScrawlError = DurationError::UnexpectedChar { ch: 'x', pos: 1 }.into();
        assert!(err.is_usage_error());
        assert!(!ScrawlError::EmptySelection.is_usage_error());
    }
}
