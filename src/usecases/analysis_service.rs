//! Upload workflow. Validates a picked file, makes it the current document and
//! drives `Analyzing → {Complete, Failed}` through the analysis backend.

use crate::domain::{
    AnalysisStatus, Document, DomainError, Generation, validate_upload, validation,
};
use crate::ports::{AnalysisPort, DocumentSource};
use crate::usecases::SharedSession;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// Message kept on the session when the backend call fails. No partial results survive.
pub const ANALYSIS_FAILED_MESSAGE: &str = "Analysis failed. Please try again.";

/// An accepted document whose analysis has not been run yet.
#[derive(Debug, Clone)]
pub struct PendingAnalysis {
    pub generation: Generation,
    pub document: Document,
}

/// Service for the upload → analysis workflow.
///
/// Orchestrates the flow:
/// 1. Describe the file and validate type/size (rejections leave the session untouched)
/// 2. Read it and make it the current document (`Analyzing`)
/// 3. Call the analysis backend and record `Complete` or `Failed`
pub struct AnalysisService {
    source: Arc<dyn DocumentSource>,
    analysis: Arc<dyn AnalysisPort>,
    session: SharedSession,
}

impl AnalysisService {
    pub fn new(
        source: Arc<dyn DocumentSource>,
        analysis: Arc<dyn AnalysisPort>,
        session: SharedSession,
    ) -> Self {
        Self {
            source,
            analysis,
            session,
        }
    }

    /// Validate and load the file at `path`, then enter `Analyzing`.
    ///
    /// # Errors
    /// `DomainError::InvalidUpload` with the user-facing reason for a wrong type or
    /// oversized file; `DomainError::Io` when the file cannot be read.
    pub async fn accept(
        &self,
        path: &Path,
        mime_override: Option<&str>,
    ) -> Result<PendingAnalysis, DomainError> {
        let candidate = self.source.inspect(path, mime_override).await?;
        let candidate = validate_upload(candidate).map_err(|reason| {
            warn!(path = %path.display(), reason = %reason, "upload rejected");
            DomainError::InvalidUpload(reason)
        })?;
        let document = self.source.load(&candidate).await?;
        self.accept_document(document).await
    }

    /// Same as [`accept`](Self::accept) for a document already in memory.
    pub async fn accept_document(&self, document: Document) -> Result<PendingAnalysis, DomainError> {
        validation::check(&document.mime_type, document.size)?;
        let generation = self.session.write().await.begin_analysis(document.clone());
        info!(
            name = %document.name,
            size = document.size,
            mime = %document.mime_type,
            generation,
            "document accepted"
        );
        Ok(PendingAnalysis {
            generation,
            document,
        })
    }

    /// Run the backend analysis for an accepted document and record the outcome.
    ///
    /// Returns the session status afterwards. If another document was accepted while
    /// this one was in flight, the outcome is discarded and the newer status returned.
    pub async fn analyze(&self, pending: PendingAnalysis) -> AnalysisStatus {
        let PendingAnalysis {
            generation,
            document,
        } = pending;

        let outcome = self.analysis.analyze(&document).await;

        let mut session = self.session.write().await;
        let applied = match outcome {
            Ok(result) => {
                info!(
                    name = %document.name,
                    risk_level = %result.risk_level,
                    risks = result.risks.len(),
                    clauses = result.key_clauses.len(),
                    "analysis complete"
                );
                session.complete_analysis(generation, result)
            }
            Err(e) => {
                warn!(name = %document.name, error = %e, "analysis failed");
                session.fail_analysis(generation, ANALYSIS_FAILED_MESSAGE)
            }
        };
        if !applied {
            warn!(
                name = %document.name,
                generation,
                current = session.generation(),
                "discarding analysis for replaced document"
            );
        }
        session.status()
    }

    /// Accept then analyze in one step.
    pub async fn upload(
        &self,
        path: &Path,
        mime_override: Option<&str>,
    ) -> Result<AnalysisStatus, DomainError> {
        let pending = self.accept(path, mime_override).await?;
        Ok(self.analyze(pending).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::fixture::FixtureAdapter;
    use crate::domain::entities::{MIME_PDF, MIME_TXT};
    use crate::domain::{AnalysisResult, FileCandidate, SessionState, UploadRejection};
    use std::collections::HashMap;
    use std::path::PathBuf;
    use tokio::sync::{Mutex, RwLock, oneshot};

    /// In-memory source: path → (declared MIME, size). Content is `size` zero bytes.
    struct MemorySource {
        files: HashMap<PathBuf, (String, u64)>,
    }

    impl MemorySource {
        fn new(files: &[(&str, &str, u64)]) -> Self {
            Self {
                files: files
                    .iter()
                    .map(|(p, m, s)| (PathBuf::from(p), (m.to_string(), *s)))
                    .collect(),
            }
        }
    }

    #[async_trait::async_trait]
    impl DocumentSource for MemorySource {
        async fn inspect(
            &self,
            path: &Path,
            mime_override: Option<&str>,
        ) -> Result<FileCandidate, DomainError> {
            let (mime, size) = self
                .files
                .get(path)
                .ok_or_else(|| DomainError::Io("not found".into()))?;
            Ok(FileCandidate {
                name: path.display().to_string(),
                size: *size,
                mime_type: mime_override.unwrap_or(mime.as_str()).to_string(),
                path: path.to_path_buf(),
            })
        }

        async fn load(&self, candidate: &FileCandidate) -> Result<Document, DomainError> {
            Ok(Document::new(
                candidate.name.clone(),
                candidate.mime_type.clone(),
                vec![0; candidate.size as usize],
            ))
        }
    }

    struct FailingAnalysis;

    #[async_trait::async_trait]
    impl AnalysisPort for FailingAnalysis {
        async fn analyze(&self, _document: &Document) -> Result<AnalysisResult, DomainError> {
            Err(DomainError::Analysis("backend returned 500".into()))
        }
    }

    /// Analysis that blocks until the test releases it.
    struct GatedAnalysis {
        gate: Mutex<Option<oneshot::Receiver<AnalysisResult>>>,
    }

    #[async_trait::async_trait]
    impl AnalysisPort for GatedAnalysis {
        async fn analyze(&self, _document: &Document) -> Result<AnalysisResult, DomainError> {
            let rx = self.gate.lock().await.take();
            match rx {
                Some(rx) => rx
                    .await
                    .map_err(|_| DomainError::Analysis("gate dropped".into())),
                None => Ok(AnalysisResult::default()),
            }
        }
    }

    fn session() -> SharedSession {
        Arc::new(RwLock::new(SessionState::new()))
    }

    fn service(analysis: Arc<dyn AnalysisPort>, session: SharedSession) -> AnalysisService {
        let source = MemorySource::new(&[
            ("contract.pdf", MIME_PDF, 2 * 1024 * 1024),
            ("scan.png", "image/png", 2 * 1024 * 1024),
            ("big.pdf", MIME_PDF, 11 * 1024 * 1024),
            ("notes.txt", MIME_TXT, 64),
        ]);
        AnalysisService::new(Arc::new(source), analysis, session)
    }

    #[tokio::test]
    async fn test_upload_completes_with_fixture() {
        let s = session();
        let svc = service(Arc::new(FixtureAdapter::with_delay(5)), s.clone());

        let status = svc.upload(Path::new("contract.pdf"), None).await.unwrap();

        assert_eq!(status, AnalysisStatus::Complete);
        let state = s.read().await;
        assert!(state.result().is_some());
        assert_eq!(state.document().map(|d| d.size), Some(2 * 1024 * 1024));
    }

    #[tokio::test]
    async fn test_rejected_upload_leaves_state_untouched() {
        let s = session();
        let svc = service(Arc::new(FixtureAdapter::with_delay(5)), s.clone());

        let err = svc.upload(Path::new("scan.png"), None).await.unwrap_err();
        assert!(matches!(
            err,
            DomainError::InvalidUpload(UploadRejection::UnsupportedType)
        ));
        let err = svc.upload(Path::new("big.pdf"), None).await.unwrap_err();
        assert_eq!(err.to_string(), "File size must be less than 10MB.");

        let state = s.read().await;
        assert_eq!(state.status(), AnalysisStatus::Empty);
        assert!(state.document().is_none());
        assert_eq!(state.generation(), 0);
    }

    #[tokio::test]
    async fn test_rejection_keeps_previous_document() {
        let s = session();
        let svc = service(Arc::new(FixtureAdapter::with_delay(5)), s.clone());
        svc.upload(Path::new("notes.txt"), None).await.unwrap();

        assert!(svc.upload(Path::new("scan.png"), None).await.is_err());

        let state = s.read().await;
        assert_eq!(state.status(), AnalysisStatus::Complete);
        assert_eq!(state.document().map(|d| d.name.as_str()), Some("notes.txt"));
    }

    #[tokio::test]
    async fn test_mime_override_is_trusted() {
        let s = session();
        let svc = service(Arc::new(FixtureAdapter::with_delay(5)), s.clone());
        let status = svc
            .upload(Path::new("scan.png"), Some(MIME_PDF))
            .await
            .unwrap();
        assert_eq!(status, AnalysisStatus::Complete);
    }

    #[tokio::test]
    async fn test_failed_analysis_keeps_result_empty() {
        let s = session();
        let svc = service(Arc::new(FailingAnalysis), s.clone());

        let status = svc.upload(Path::new("contract.pdf"), None).await.unwrap();

        assert_eq!(status, AnalysisStatus::Failed);
        let state = s.read().await;
        assert!(state.result().is_none());
        assert_eq!(state.failure(), Some(ANALYSIS_FAILED_MESSAGE));
    }

    #[tokio::test]
    async fn test_late_analysis_for_replaced_document_is_discarded() {
        let s = session();
        let (tx, rx) = oneshot::channel();
        let gated = Arc::new(GatedAnalysis {
            gate: Mutex::new(Some(rx)),
        });
        let svc = Arc::new(service(gated, s.clone()));

        let first = svc.accept(Path::new("contract.pdf"), None).await.unwrap();
        let in_flight = {
            let svc = Arc::clone(&svc);
            tokio::spawn(async move { svc.analyze(first).await })
        };

        // Replace the document while the first analysis is still outstanding.
        let second = svc.accept(Path::new("notes.txt"), None).await.unwrap();
        tx.send(AnalysisResult {
            summary: "stale".into(),
            ..Default::default()
        })
        .unwrap();
        let status = in_flight.await.unwrap();

        assert_eq!(status, AnalysisStatus::Analyzing);
        {
            let state = s.read().await;
            assert!(state.result().is_none());
            assert_eq!(state.generation(), second.generation);
        }

        assert_eq!(svc.analyze(second).await, AnalysisStatus::Complete);
        assert_eq!(s.read().await.result().map(|r| r.summary.as_str()), Some(""));
    }
}
