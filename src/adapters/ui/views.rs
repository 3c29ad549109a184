//! Pure renderers. Session state in, plain text out; colors are applied by the TUI.

use crate::domain::entities::ACCEPTED_EXTENSIONS;
use crate::domain::{AnalysisStatus, ChatMessage, ChatRole, Document, RiskLevel, SessionState};
use crate::shared::format::{file_type_label, format_file_size};
use crossterm::style::Color;

pub const SUGGESTED_QUESTIONS: [&str; 3] = [
    "What are the main risks in this contract?",
    "Can I terminate this agreement early?",
    "What are my payment obligations?",
];

const ANALYSIS_STEPS: [&str; 3] = [
    "Extracting key clauses...",
    "Analyzing risk factors...",
    "Simplifying legal language...",
];

/// Landing text shown before the first upload.
pub fn welcome() -> String {
    let mut out = String::new();
    out.push_str("Simplify Legal Document Analysis\n\n");
    out.push_str(
        "Upload contracts, agreements, or any legal document and get instant analysis with\n\
         key clause extraction, risk assessment, and plain English explanations.\n\n",
    );
    for (title, body) in [
        (
            "Key Clause Extraction",
            "Identify the most important clauses and terms in your legal documents.",
        ),
        (
            "Risk Assessment",
            "Flag unusual or concerning terms that require attention.",
        ),
        (
            "Plain English",
            "Complex legal jargon translated into clear, understandable language.",
        ),
    ] {
        out.push_str(&format!("  * {}: {}\n", title, body));
    }
    out.push('\n');
    out.push_str(&upload_hint());
    out
}

pub fn upload_hint() -> String {
    "Supported formats: PDF, Word (.doc, .docx), Text files\nMaximum file size: 10MB\n".to_string()
}

/// Help line for the path prompt: ".pdf, .doc, .docx or .txt, up to 10MB".
pub fn upload_help() -> String {
    let dotted: Vec<String> = ACCEPTED_EXTENSIONS.iter().map(|e| format!(".{}", e)).collect();
    let listed = match dotted.split_last() {
        Some((last, rest)) if !rest.is_empty() => format!("{} or {}", rest.join(", "), last),
        Some((last, _)) => last.clone(),
        None => String::new(),
    };
    format!("{}, up to 10MB", listed)
}

pub fn status_badge(status: AnalysisStatus) -> &'static str {
    match status {
        AnalysisStatus::Empty => "No document",
        AnalysisStatus::Analyzing => "Analyzing",
        AnalysisStatus::Complete => "Analyzed",
        AnalysisStatus::Failed => "Failed",
    }
}

/// `name` on one line, `type • size [badge]` on the next.
pub fn document_card(document: &Document, status: AnalysisStatus) -> String {
    format!(
        "{}\n{} • {} [{}]\n",
        document.name,
        file_type_label(&document.name),
        format_file_size(document.size),
        status_badge(status)
    )
}

pub fn risk_color(level: RiskLevel) -> Color {
    match level {
        RiskLevel::Low => Color::Green,
        RiskLevel::Medium => Color::Yellow,
        RiskLevel::High => Color::Red,
        RiskLevel::Unknown => Color::Grey,
    }
}

/// Status-dependent dashboard: progress steps, failure, or the full result.
pub fn analysis_panel(session: &SessionState) -> String {
    let mut out = String::new();
    match (session.status(), session.result()) {
        (AnalysisStatus::Empty, _) => out.push_str("No document uploaded.\n"),
        (AnalysisStatus::Analyzing, _) => {
            out.push_str("Analyzing Document...\n");
            for step in ANALYSIS_STEPS {
                out.push_str(&format!("  - {}\n", step));
            }
        }
        (AnalysisStatus::Failed, _) => {
            out.push_str(session.failure().unwrap_or("Analysis failed."));
            out.push('\n');
        }
        (AnalysisStatus::Complete, None) => out.push_str("No analysis available.\n"),
        (AnalysisStatus::Complete, Some(result)) => {
            out.push_str("Risk Assessment\n");
            out.push_str(&format!("  Overall Risk Level: {}\n", result.risk_level));
            for risk in &result.risks {
                out.push_str(&format!("  ! {}\n", risk));
            }
            if !result.key_clauses.is_empty() {
                out.push_str("\nKey Clauses\n");
                for clause in &result.key_clauses {
                    out.push_str(&format!("  - {}\n", clause));
                }
            }
            if !result.summary.trim().is_empty() {
                out.push_str("\nDocument Summary\n");
                out.push_str(&format!("  {}\n", result.summary.trim()));
            }
        }
    }
    out
}

const PREVIEW_TITLE: &str = "SERVICE AGREEMENT";

enum PreviewBlock {
    Text(&'static str),
    Callout {
        label: &'static str,
        section: &'static str,
        body: &'static str,
        color: Color,
    },
}

/// Canned contract text shown next to a fixture analysis. Paragraphs are plain;
/// callouts carry the color the TUI paints them with.
const PREVIEW_BLOCKS: [PreviewBlock; 6] = [
    PreviewBlock::Text(
        "This Service Agreement (\"Agreement\") is entered into on [DATE] between [COMPANY NAME], \
         a corporation organized under the laws of [STATE] (\"Company\"), and [CLIENT NAME] (\"Client\").",
    ),
    PreviewBlock::Callout {
        label: "Key Clause Identified",
        section: "Section 4.1 - Payment Terms",
        body: "Client agrees to pay Company within thirty (30) days of invoice date. \
               A 2% early payment discount applies if payment is received within ten (10) days.",
        color: Color::Blue,
    },
    PreviewBlock::Text(
        "The Company agrees to provide consulting services as outlined in Exhibit A attached hereto \
         and incorporated by reference. Services shall commence on [START DATE] and continue through \
         [END DATE] unless terminated earlier in accordance with this Agreement.",
    ),
    PreviewBlock::Callout {
        label: "Risk Alert",
        section: "Section 12.1 - Termination Penalty",
        body: "Early termination by Client requires payment of 50% of remaining contract value. \
               Consider negotiating this percentage down.",
        color: Color::Yellow,
    },
    PreviewBlock::Text(
        "Either party may terminate this Agreement with thirty (30) days written notice. Upon \
         termination, Company shall deliver all work product and materials to Client, and Client \
         shall pay all outstanding fees for services rendered.",
    ),
    PreviewBlock::Callout {
        label: "Standard Clause",
        section: "Section 8.2 - Termination Rights",
        body: "Standard 30-day notice period for termination without cause. \
               This is fair and typical for this type of agreement.",
        color: Color::Green,
    },
];

/// Document preview as colored segments. `None` means default foreground.
/// Empty before upload and after a failure.
pub fn preview_segments(status: AnalysisStatus) -> Vec<(String, Option<Color>)> {
    match status {
        AnalysisStatus::Analyzing => vec![("Processing document...\n".to_string(), None)],
        AnalysisStatus::Complete => {
            let mut segments = vec![(
                format!("{}\n{}\n\n", PREVIEW_TITLE, "-".repeat(PREVIEW_TITLE.len())),
                None,
            )];
            for block in &PREVIEW_BLOCKS {
                segments.push(match block {
                    PreviewBlock::Text(text) => (format!("{}\n\n", text), None),
                    PreviewBlock::Callout {
                        label,
                        section,
                        body,
                        color,
                    } => (
                        format!("  | {}\n  | {}: {}\n\n", label, section, body),
                        Some(*color),
                    ),
                });
            }
            segments
        }
        AnalysisStatus::Empty | AnalysisStatus::Failed => Vec::new(),
    }
}

/// Plain-text rendering of [`preview_segments`].
pub fn document_preview(status: AnalysisStatus) -> String {
    preview_segments(status)
        .into_iter()
        .map(|(text, _)| text)
        .collect()
}

pub fn transcript(messages: &[ChatMessage]) -> String {
    messages
        .iter()
        .map(|m| {
            let who = match m.role {
                ChatRole::User => "You",
                ChatRole::Assistant => "Assistant",
            };
            format!("{}: {}\n", who, m.text)
        })
        .collect()
}

pub fn suggestions() -> String {
    let mut out = String::from("Try asking:\n");
    for q in SUGGESTED_QUESTIONS {
        out.push_str(&format!("  • \"{}\"\n", q));
    }
    out
}
