use thiserror::Error;

/// Errors that can occur during Arbor core operations.
#[derive(Debug, Error)]
pub enum ArborError {
    /// A sentence or score matrix violates a structural precondition
    /// (missing ROOT, non-contiguous ids, non-square matrix, too few tokens).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A line of a CoNLL file could not be parsed.
    #[error("malformed line {line}: {reason}")]
    MalformedLine {
        /// 1-based line number in the source file.
        line: usize,
        /// What was wrong with it.
        reason: String,
    },

    /// Underlying I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The model artifact could not be read back.
    #[error("failed to load model: {0}")]
    ModelLoad(String),

    /// The model artifact could not be written.
    #[error("failed to save model: {0}")]
    ModelSave(String),
}

impl ArborError {
    pub(crate) fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub(crate) fn malformed<S: Into<String>>(line: usize, reason: S) -> Self {
        Self::MalformedLine {
            line,
            reason: reason.into(),
        }
    }
}

/// Result type alias for Arbor operations.
pub type Result<T> = std::result::Result<T, ArborError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let err = ArborError::invalid_input("score matrix is 3x2");
        assert_eq!(err.to_string(), "invalid input: score matrix is 3x2");

        let err = ArborError::malformed(7, "expected 10 columns, found 4");
        assert!(err.to_string().contains("line 7"));
        assert!(err.to_string().contains("10 columns"));
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.conll");
        let err: ArborError = io.into();
        assert!(matches!(err, ArborError::Io(_)));
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ArborError>();
    }
}
