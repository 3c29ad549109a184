//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{AnalysisResult, Document, DomainError, FileCandidate};
use std::path::Path;

/// Document analysis backend (remote HTTP or local fixture).
#[async_trait::async_trait]
pub trait AnalysisPort: Send + Sync {
    /// Analyze the whole document. Errors map to `DomainError::Analysis`.
    async fn analyze(&self, document: &Document) -> Result<AnalysisResult, DomainError>;
}

/// Question answering against a document.
#[async_trait::async_trait]
pub trait AnswerPort: Send + Sync {
    /// Ask one question. The returned text is shown verbatim as the assistant's reply.
    async fn answer(&self, document: &Document, question: &str) -> Result<String, DomainError>;
}

/// Where candidate files come from (local filesystem in the CLI).
#[async_trait::async_trait]
pub trait DocumentSource: Send + Sync {
    /// Describe a file without reading it: name, size, declared MIME type.
    /// `mime_override` replaces the type derived from the extension.
    async fn inspect(
        &self,
        path: &Path,
        mime_override: Option<&str>,
    ) -> Result<FileCandidate, DomainError>;

    /// Read an already validated candidate into a `Document`.
    async fn load(&self, candidate: &FileCandidate) -> Result<Document, DomainError>;
}
