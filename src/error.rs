use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PetalError>;

pub const INVALID_TYPE_MESSAGE: &str = "Please upload a valid image file (JPG, PNG, or WebP)";
pub const TOO_LARGE_MESSAGE: &str = "File size must be less than 10MB";
pub const ANALYSIS_FAILED_MESSAGE: &str = "Failed to analyze image. Please try again.";
pub const BUSY_MESSAGE: &str = "An analysis is already running. Please wait for it to finish.";

/// Every way an upload or an analysis can fail.
#[derive(Error, Debug)]
pub enum PetalError {
    /// Declared MIME type is not one of the accepted image types.
    #[error("unsupported file type: {mime}")]
    InvalidFileType { mime: String },

    /// File exceeds the upload size limit.
    #[error("file is {size} bytes (limit {limit} bytes)")]
    FileTooLarge { size: u64, limit: u64 },

    /// Image bytes could not be turned into pixels.
    #[error("analysis failed: {reason}")]
    AnalysisFailure { reason: String },

    /// Pixel buffer dimensions do not match its byte length.
    #[error("invalid pixel buffer: {width}x{height} with {len} bytes")]
    InvalidPixelBuffer { width: u32, height: u32, len: usize },

    /// A new upload arrived while an analysis is still in flight.
    #[error("an analysis is already in progress")]
    AnalysisInProgress,

    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PetalError {
    pub fn analysis_failure(reason: impl Into<String>) -> Self {
        PetalError::AnalysisFailure { reason: reason.into() }
    }

    /// Validation errors leave the session usable; the user just picks another file.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            PetalError::InvalidFileType { .. } | PetalError::FileTooLarge { .. }
        )
    }

    /// Text shown to the user in place of a result.
    pub fn user_message(&self) -> String {
        match self {
            PetalError::InvalidFileType { .. } => INVALID_TYPE_MESSAGE.to_owned(),
            PetalError::FileTooLarge { .. } => TOO_LARGE_MESSAGE.to_owned(),
            PetalError::AnalysisInProgress => BUSY_MESSAGE.to_owned(),
            PetalError::AnalysisFailure { .. } | PetalError::InvalidPixelBuffer { .. } => {
                ANALYSIS_FAILED_MESSAGE.to_owned()
            }
            PetalError::Config(e) => format!("Could not read configuration: {}", e),
            PetalError::Io(e) => format!("Could not read file: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_have_distinct_messages() {
        let ty = PetalError::InvalidFileType { mime: "text/plain".into() };
        let size = PetalError::FileTooLarge { size: 11, limit: 10 };
        assert_ne!(ty.user_message(), size.user_message());
        assert!(ty.is_validation());
        assert!(size.is_validation());
    }

    #[test]
    fn decode_problems_share_the_generic_message() {
        let decode = PetalError::analysis_failure("bad header");
        let shape = PetalError::InvalidPixelBuffer { width: 2, height: 2, len: 3 };
        assert_eq!(decode.user_message(), ANALYSIS_FAILED_MESSAGE);
        assert_eq!(shape.user_message(), ANALYSIS_FAILED_MESSAGE);
        assert!(!decode.is_validation());
    }
}
