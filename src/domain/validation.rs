//! Upload validation. Declared MIME type against the allow-list, then size.
//!
//! The declared type is trusted; file contents are never inspected.

use super::entities::{DocumentKind, FileCandidate};
use super::errors::UploadRejection;

/// Upper bound on document size (10 MiB, inclusive).
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// Accepts or rejects a candidate. Returns the candidate unchanged on success.
pub fn validate_upload(candidate: FileCandidate) -> Result<FileCandidate, UploadRejection> {
    check(&candidate.mime_type, candidate.size)?;
    Ok(candidate)
}

/// Type check first, then size, so a wrong type is reported even for huge files.
pub fn check(mime_type: &str, size: u64) -> Result<DocumentKind, UploadRejection> {
    let kind = DocumentKind::from_mime(mime_type).ok_or(UploadRejection::UnsupportedType)?;
    if size > MAX_UPLOAD_BYTES {
        return Err(UploadRejection::TooLarge);
    }
    Ok(kind)
}
