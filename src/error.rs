//! Application error type.
//!
//! Every fallible operation returns `AppError`. The binary prints the message
//! and exits with the error's exit code.

/// Broad category of an [`AppError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The model artifact is missing or unreadable.
    ArtifactNotFound,
    /// The artifact was read but is not a usable model.
    InvalidArtifact,
    /// A predictor call failed for the given record.
    Prediction,
    /// Terminal setup, drawing or input failed.
    Terminal,
    /// Other I/O (log file, stdout).
    Io,
}

impl ErrorKind {
    pub fn exit_code(self) -> u8 {
        match self {
            ErrorKind::ArtifactNotFound => 2,
            ErrorKind::InvalidArtifact => 3,
            ErrorKind::Prediction => 4,
            ErrorKind::Terminal => 5,
            ErrorKind::Io => 6,
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    kind: ErrorKind,
    message: String,
}

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn artifact_not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ArtifactNotFound, message)
    }

    pub fn invalid_artifact(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidArtifact, message)
    }

    pub fn prediction(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Prediction, message)
    }

    pub fn terminal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Terminal, message)
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Io, message)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn exit_code(&self) -> u8 {
        self.kind.exit_code()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("kind", &self.kind)
            .field("exit_code", &self.exit_code())
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct_per_kind() {
        let kinds = [
            ErrorKind::ArtifactNotFound,
            ErrorKind::InvalidArtifact,
            ErrorKind::Prediction,
            ErrorKind::Terminal,
            ErrorKind::Io,
        ];
        let mut codes: Vec<u8> = kinds.iter().map(|k| k.exit_code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), kinds.len());
        assert!(codes.iter().all(|&c| c != 0));
    }

    #[test]
    fn display_is_the_bare_message() {
        let err = AppError::artifact_not_found("Model file not found!");
        assert_eq!(err.to_string(), "Model file not found!");
        assert_eq!(err.kind(), ErrorKind::ArtifactNotFound);
        assert_eq!(err.exit_code(), 2);
    }
}
