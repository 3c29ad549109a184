//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these.

use thiserror::Error;

/// Why an upload was refused. The `Display` text is shown to the user verbatim.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadRejection {
    #[error("Please upload a PDF, Word document, or text file.")]
    UnsupportedType,

    #[error("File size must be less than 10MB.")]
    TooLarge,
}

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("{0}")]
    InvalidUpload(#[from] UploadRejection),

    #[error("Analysis failed: {0}")]
    Analysis(String),

    #[error("Question failed: {0}")]
    Answer(String),

    #[error("Question is empty")]
    EmptyQuestion,

    #[error("No document uploaded")]
    NoDocument,

    #[error("A question is already being answered")]
    QuestionPending,

    #[error("Report error: {0}")]
    Report(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Input error: {0}")]
    Input(String),
}
