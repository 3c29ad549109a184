//! Application use cases. Orchestrate domain logic via ports.

pub mod analysis_service;
pub mod qa_service;
pub mod report_service;

pub use analysis_service::{ANALYSIS_FAILED_MESSAGE, AnalysisService, PendingAnalysis};
pub use qa_service::{ANSWER_FALLBACK_MESSAGE, AskOutcome, QaService};
pub use report_service::ReportService;

use crate::domain::SessionState;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Session state shared by the services and the UI. Never held across a backend call.
pub type SharedSession = Arc<RwLock<SessionState>>;

/// Fresh, empty session.
pub fn new_session() -> SharedSession {
    Arc::new(RwLock::new(SessionState::new()))
}
