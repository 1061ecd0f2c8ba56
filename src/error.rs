use thiserror::Error;

/// Convenience result type for worklist operations.
pub type WorklistResult<T> = Result<T, WorklistError>;

/// Error type returned by import, filter and export operations.
///
/// This is a single error enum shared across the whole pipeline. Use [`WorklistError::kind`] to
/// classify an error into one of the user-facing [`ErrorKind`]s.
#[derive(Debug, Error)]
pub enum WorklistError {
    /// Underlying I/O error while reading the source or writing an export.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The workbook could not be decoded.
    #[error("excel error: {0}")]
    Excel(#[from] calamine::Error),

    /// The CSV input could not be decoded.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Spreadsheet export failed inside the XLSX encoder.
    #[error("xlsx error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// Document export failed inside the PDF renderer.
    #[error("pdf error: {0}")]
    Pdf(#[from] printpdf::Error),

    /// The input has no header row, no data row, or an unrecognised format.
    #[error("malformed input: {message}")]
    MalformedInput { message: String },

    /// An export was requested while no rows are visible.
    #[error("No data to export. Please adjust your filters.")]
    EmptyExport,

    /// Any other failure while filtering, sorting or rendering.
    #[error("operation failed: {message}")]
    OperationFailure { message: String },
}

impl WorklistError {
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedInput {
            message: message.into(),
        }
    }

    pub(crate) fn operation(message: impl Into<String>) -> Self {
        Self::OperationFailure {
            message: message.into(),
        }
    }

    /// The user-facing classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Io(_) => ErrorKind::SourceRead,
            Self::Excel(calamine::Error::Io(_)) => ErrorKind::SourceRead,
            Self::Csv(err) if matches!(err.kind(), csv::ErrorKind::Io(_)) => ErrorKind::SourceRead,
            Self::Excel(_) | Self::Csv(_) | Self::MalformedInput { .. } => ErrorKind::MalformedInput,
            Self::EmptyExport => ErrorKind::EmptyExport,
            Self::Xlsx(_) | Self::Pdf(_) | Self::OperationFailure { .. } => ErrorKind::OperationFailure,
        }
    }
}

/// Coarse error classes reported to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Fewer than two rows, or an unreadable/invalid file.
    MalformedInput,
    /// Reading the source failed.
    SourceRead,
    /// No visible rows at export time.
    EmptyExport,
    /// Unexpected fault during filtering or rendering.
    OperationFailure,
}

#[cfg(test)]
mod tests {
    use super::{ErrorKind, WorklistError};

    #[test]
    fn kinds_cover_user_facing_classes() {
        let io = WorklistError::from(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert_eq!(io.kind(), ErrorKind::SourceRead);
        assert_eq!(WorklistError::malformed("x").kind(), ErrorKind::MalformedInput);
        assert_eq!(WorklistError::EmptyExport.kind(), ErrorKind::EmptyExport);
        assert_eq!(WorklistError::operation("x").kind(), ErrorKind::OperationFailure);
    }

    #[test]
    fn empty_export_message_is_user_facing() {
        assert_eq!(
            WorklistError::EmptyExport.to_string(),
            "No data to export. Please adjust your filters."
        );
    }
}
