//! Implements DocumentSource over the local filesystem.
//!
//! The declared MIME type is derived from the extension, the way a browser fills
//! `File.type`; unknown extensions get an empty type and are rejected by validation.

use crate::domain::{Document, DocumentKind, DomainError, FileCandidate};
use crate::ports::DocumentSource;
use std::path::Path;
use tokio::fs;
use tracing::debug;

/// Declared MIME type for a path, or "" when the extension is not accepted.
pub fn declared_mime_type(path: &Path) -> &'static str {
    path.extension()
        .and_then(|e| e.to_str())
        .and_then(DocumentKind::from_extension)
        .map(DocumentKind::mime_type)
        .unwrap_or("")
}

#[derive(Debug, Default)]
pub struct FsDocumentSource;

impl FsDocumentSource {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl DocumentSource for FsDocumentSource {
    async fn inspect(
        &self,
        path: &Path,
        mime_override: Option<&str>,
    ) -> Result<FileCandidate, DomainError> {
        let meta = fs::metadata(path)
            .await
            .map_err(|e| DomainError::Io(format!("{}: {}", path.display(), e)))?;
        if !meta.is_file() {
            return Err(DomainError::Io(format!("{} is not a file", path.display())));
        }
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let mime_type = mime_override
            .map(str::to_string)
            .unwrap_or_else(|| declared_mime_type(path).to_string());

        debug!(name = %name, size = meta.len(), mime = %mime_type, "inspected file");
        Ok(FileCandidate {
            name,
            size: meta.len(),
            mime_type,
            path: path.to_path_buf(),
        })
    }

    async fn load(&self, candidate: &FileCandidate) -> Result<Document, DomainError> {
        let bytes = fs::read(&candidate.path)
            .await
            .map_err(|e| DomainError::Io(format!("{}: {}", candidate.path.display(), e)))?;
        Ok(Document::new(
            candidate.name.clone(),
            candidate.mime_type.clone(),
            bytes,
        ))
    }
}
