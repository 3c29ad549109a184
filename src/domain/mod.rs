//! Core domain layer. No external I/O dependencies.
//!
//! Entities, upload rules and session transitions live here. Dependencies flow inward.

pub mod entities;
pub mod errors;
pub mod session;
pub mod validation;

pub use entities::{
    AnalysisResult, AnalysisStatus, ChatMessage, ChatRole, Document, DocumentKind, FileCandidate,
    RiskLevel,
};
pub use errors::{DomainError, UploadRejection};
pub use session::{Generation, SessionState};
pub use validation::{MAX_UPLOAD_BYTES, validate_upload};
