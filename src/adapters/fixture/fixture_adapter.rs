//! Fixture backend for demos and tests.
//!
//! Analysis completes after a fixed timer with a sample service-agreement result;
//! every question gets the same reply. No network access.

use crate::domain::{AnalysisResult, Document, DomainError, RiskLevel};
use crate::ports::{AnalysisPort, AnswerPort};
use crate::shared::config::DEFAULT_FIXTURE_DELAY_MS;
use std::time::Duration;
use tracing::info;

pub const FIXTURE_ANSWER: &str = "Based on the document analysis, this appears to be a standard clause with low risk. The termination conditions are clearly defined and favor both parties equally.";

/// Fixture backend. Analysis waits `delay_ms` before completing.
pub struct FixtureAdapter {
    delay_ms: u64,
}

impl FixtureAdapter {
    /// Create a fixture backend with the default analysis timer (2s).
    pub fn new() -> Self {
        Self {
            delay_ms: DEFAULT_FIXTURE_DELAY_MS,
        }
    }

    pub fn with_delay(delay_ms: u64) -> Self {
        Self { delay_ms }
    }

    /// The sample result every fixture analysis produces.
    pub fn sample_result() -> AnalysisResult {
        AnalysisResult {
            risk_level: RiskLevel::Low,
            risks: vec![
                "Standard termination clauses".to_string(),
                "High penalty fees (Review needed)".to_string(),
                "Clear payment terms".to_string(),
            ],
            key_clauses: vec![
                "Termination Clause (Section 8.2): Either party may terminate with 30 days written notice without cause.".to_string(),
                "Penalty Clause (Section 12.1): Early termination penalty of 50% of remaining contract value - consider negotiating this down.".to_string(),
                "Payment Terms (Section 4.1): Net 30 payment terms with 2% early payment discount if paid within 10 days.".to_string(),
            ],
            summary: "Service agreement for consulting services between a company and its client. \
                      Payment is due within thirty days of invoice with an early payment discount; \
                      either party may terminate on thirty days written notice, but early termination \
                      by the client carries a penalty of half the remaining contract value."
                .to_string(),
        }
    }
}

impl Default for FixtureAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl AnalysisPort for FixtureAdapter {
    async fn analyze(&self, document: &Document) -> Result<AnalysisResult, DomainError> {
        info!(
            name = %document.name,
            size = document.size,
            delay_ms = self.delay_ms,
            "[FIXTURE] Simulating document analysis"
        );
        tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
        Ok(Self::sample_result())
    }
}

#[async_trait::async_trait]
impl AnswerPort for FixtureAdapter {
    async fn answer(&self, document: &Document, question: &str) -> Result<String, DomainError> {
        info!(
            name = %document.name,
            question_len = question.len(),
            "[FIXTURE] Answering question"
        );
        Ok(FIXTURE_ANSWER.to_string())
    }
}
