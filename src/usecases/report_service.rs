//! Report service. Renders the current session as a plain-text analysis report.

use crate::domain::{AnalysisStatus, ChatRole, DomainError, SessionState};
use crate::shared::format::{file_type_label, format_file_size};
use crate::usecases::SharedSession;
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use tokio::fs;
use tracing::info;

pub struct ReportService {
    session: SharedSession,
    reports_dir: PathBuf,
}

impl ReportService {
    pub fn new(session: SharedSession, reports_dir: PathBuf) -> Self {
        Self {
            session,
            reports_dir,
        }
    }

    /// Write the report to `<reports_dir>/<document stem>_analysis_report.txt`.
    ///
    /// Returns the written path. Requires a document with a completed analysis.
    pub async fn export(&self) -> Result<PathBuf, DomainError> {
        let (filename, text) = {
            let session = self.session.read().await;
            let text = render_report(&session, Utc::now())?;
            let stem = session.document().map(|d| d.stem()).unwrap_or("document");
            (format!("{}_analysis_report.txt", stem), text)
        };

        fs::create_dir_all(&self.reports_dir)
            .await
            .map_err(|e| DomainError::Io(format!("Failed to create reports dir: {}", e)))?;
        let path = self.reports_dir.join(filename);
        fs::write(&path, text)
            .await
            .map_err(|e| DomainError::Io(format!("Failed to write report: {}", e)))?;

        info!(path = %path.display(), "report generated");
        Ok(path)
    }
}

/// Fixed textual layout: metadata, risk level, risks, summary, clauses, Q&A.
pub fn render_report(
    session: &SessionState,
    generated_at: DateTime<Utc>,
) -> Result<String, DomainError> {
    let document = session
        .document()
        .ok_or_else(|| DomainError::Report("no document uploaded".to_string()))?;
    let result = match (session.status(), session.result()) {
        (AnalysisStatus::Complete, Some(result)) => result,
        _ => {
            return Err(DomainError::Report(
                "analysis is not complete for this document".to_string(),
            ));
        }
    };

    let mut out = String::new();

    out.push_str("LEGALLENS DOCUMENT ANALYSIS REPORT\n");
    out.push_str("==================================\n\n");
    out.push_str(&format!("Document: {}\n", document.name));
    out.push_str(&format!("Type: {}\n", file_type_label(&document.name)));
    out.push_str(&format!("Size: {}\n", format_file_size(document.size)));
    out.push_str(&format!(
        "Generated: {}\n\n",
        generated_at.format("%Y-%m-%d %H:%M UTC")
    ));

    out.push_str(&format!("RISK LEVEL: {}\n\n", result.risk_level));

    out.push_str("IDENTIFIED RISKS:\n");
    push_numbered(&mut out, &result.risks);
    out.push('\n');

    out.push_str("SUMMARY:\n");
    if result.summary.trim().is_empty() {
        out.push_str("(none)\n\n");
    } else {
        out.push_str(result.summary.trim());
        out.push_str("\n\n");
    }

    out.push_str("KEY CLAUSES:\n");
    push_numbered(&mut out, &result.key_clauses);
    out.push('\n');

    out.push_str("QUESTIONS & ANSWERS:\n");
    if session.transcript().is_empty() {
        out.push_str("(no questions asked)\n");
    }
    for message in session.transcript() {
        let prefix = match message.role {
            ChatRole::User => "Q",
            ChatRole::Assistant => "A",
        };
        out.push_str(&format!("{}: {}\n", prefix, message.text));
    }

    Ok(out)
}

fn push_numbered(out: &mut String, items: &[String]) {
    if items.is_empty() {
        out.push_str("(none)\n");
        return;
    }
    for (i, item) in items.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, item));
    }
}
