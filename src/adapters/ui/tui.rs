//! Implements InputPort. Inquire-based interactive session.
//!
//! Menu loop: upload a document, ask questions, view the analysis, export a report.

use crate::adapters::ui::progress::AnalysisProgress;
use crate::adapters::ui::views;
use crate::domain::{AnalysisStatus, DomainError};
use crate::ports::InputPort;
use crate::usecases::{AnalysisService, AskOutcome, QaService, ReportService, SharedSession};
use async_trait::async_trait;
use crossterm::ExecutableCommand;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use inquire::error::InquireError;
use inquire::ui::{Color as PromptColor, RenderConfig, StyleSheet, Styled};
use inquire::{Select, Text};
use std::fmt;
use std::io::{Write, stdout};
use std::path::PathBuf;
use std::sync::Arc;

/// Prompt theme matching the banner.
pub fn apply_theme() {
    let config = RenderConfig::default()
        .with_prompt_prefix(Styled::new("›").with_fg(PromptColor::LightBlue))
        .with_highlighted_option_prefix(Styled::new("➤").with_fg(PromptColor::LightBlue))
        .with_selected_option(Some(StyleSheet::new().with_fg(PromptColor::LightBlue)));
    inquire::set_global_render_config(config);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Upload,
    Ask,
    View,
    Export,
    Quit,
}

impl fmt::Display for MenuChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Upload => "Upload document",
            Self::Ask => "Ask a question",
            Self::View => "View analysis",
            Self::Export => "Export report",
            Self::Quit => "Quit",
        })
    }
}

/// Choices offered for the current state. Questions need a document; export needs a
/// completed analysis.
pub fn menu_for(has_document: bool, status: AnalysisStatus) -> Vec<MenuChoice> {
    let mut choices = Vec::new();
    if has_document {
        choices.push(MenuChoice::Ask);
        choices.push(MenuChoice::View);
    }
    if status == AnalysisStatus::Complete {
        choices.push(MenuChoice::Export);
    }
    choices.push(MenuChoice::Upload);
    choices.push(MenuChoice::Quit);
    choices
}

fn print_colored(text: &str, color: Color) {
    let mut out = stdout();
    let _ = out.execute(SetForegroundColor(color));
    let _ = out.execute(Print(text));
    let _ = out.execute(ResetColor);
    let _ = out.flush();
}

fn is_cancel(e: &InquireError) -> bool {
    matches!(
        e,
        InquireError::OperationCanceled | InquireError::OperationInterrupted
    )
}

/// TUI adapter. Inquire prompts.
pub struct TuiInputPort {
    analysis: Arc<AnalysisService>,
    qa: Arc<QaService>,
    reports: Arc<ReportService>,
    session: SharedSession,
    initial_file: Option<PathBuf>,
    mime_override: Option<String>,
    fixture_preview: bool,
}

impl TuiInputPort {
    pub fn new(
        analysis: Arc<AnalysisService>,
        qa: Arc<QaService>,
        reports: Arc<ReportService>,
        session: SharedSession,
    ) -> Self {
        Self {
            analysis,
            qa,
            reports,
            session,
            initial_file: None,
            mime_override: None,
            fixture_preview: false,
        }
    }

    /// Upload this file as soon as the session starts.
    pub fn with_initial_file(mut self, path: Option<PathBuf>) -> Self {
        self.initial_file = path;
        self
    }

    /// Declared MIME type to use instead of the one derived from the extension.
    pub fn with_mime_override(mut self, mime: Option<String>) -> Self {
        self.mime_override = mime;
        self
    }

    /// Show the canned contract preview. Only meaningful with fixture analysis.
    pub fn with_fixture_preview(mut self, enabled: bool) -> Self {
        self.fixture_preview = enabled;
        self
    }

    fn print_preview(&self, status: AnalysisStatus) {
        if !self.fixture_preview {
            return;
        }
        let segments = views::preview_segments(status);
        if segments.is_empty() {
            return;
        }
        println!("\nDocument Preview");
        for (text, color) in segments {
            match color {
                Some(color) => print_colored(&text, color),
                None => print!("{}", text),
            }
        }
    }

    async fn upload(&self, path: PathBuf) {
        let pending = match self
            .analysis
            .accept(&path, self.mime_override.as_deref())
            .await
        {
            Ok(p) => p,
            Err(e) => {
                print_colored(&format!("{}\n", e), Color::Red);
                return;
            }
        };

        print!(
            "\n{}",
            views::document_card(&pending.document, AnalysisStatus::Analyzing)
        );
        self.print_preview(AnalysisStatus::Analyzing);
        let progress = AnalysisProgress::start("Analyzing Document...");
        match self.analysis.analyze(pending).await {
            AnalysisStatus::Complete => progress.finish("Analysis complete"),
            _ => progress.abandon("Analysis stopped"),
        }
        self.show_analysis().await;
    }

    async fn show_analysis(&self) {
        let session = self.session.read().await;
        if let Some(document) = session.document() {
            print!("\n{}", views::document_card(document, session.status()));
            self.print_preview(session.status());
        }
        println!();
        match (session.status(), session.result()) {
            (AnalysisStatus::Complete, Some(result)) => {
                print!("Overall Risk Level: ");
                print_colored(
                    &format!("{} Risk\n\n", result.risk_level),
                    views::risk_color(result.risk_level),
                );
                print!("{}", views::analysis_panel(&session));
            }
            (AnalysisStatus::Failed, _) => {
                print_colored(&views::analysis_panel(&session), Color::Red);
            }
            _ => print!("{}", views::analysis_panel(&session)),
        }
        if !session.transcript().is_empty() {
            println!("\nQuestions & Answers");
            print!("{}", views::transcript(session.transcript()));
        }
        println!();
    }

    async fn ask_loop(&self) -> Result<(), DomainError> {
        print!("\n{}", views::suggestions());
        loop {
            let question = match Text::new("Ask a question about this document:")
                .with_help_message("Leave empty to return to the menu")
                .prompt()
            {
                Ok(q) => q,
                Err(e) if is_cancel(&e) => return Ok(()),
                Err(e) => return Err(DomainError::Input(e.to_string())),
            };

            match self.qa.ask(&question).await {
                Ok(AskOutcome::Answered(answer)) => println!("Assistant: {}\n", answer),
                Ok(AskOutcome::Fallback) => {
                    let session = self.session.read().await;
                    let text = session
                        .transcript()
                        .last()
                        .map(|m| m.text.clone())
                        .unwrap_or_default();
                    print_colored(&format!("Assistant: {}\n\n", text), Color::Yellow);
                }
                Ok(AskOutcome::Discarded) => return Ok(()),
                Err(DomainError::EmptyQuestion) => return Ok(()),
                Err(e) => {
                    print_colored(&format!("{}\n", e), Color::Red);
                    return Ok(());
                }
            }
        }
    }

    async fn export(&self) {
        match self.reports.export().await {
            Ok(path) => print_colored(
                &format!("Report saved to {}\n", path.display()),
                Color::Green,
            ),
            Err(e) => print_colored(&format!("{}\n", e), Color::Red),
        }
    }
}

#[async_trait]
impl InputPort for TuiInputPort {
    async fn run(&self) -> Result<(), DomainError> {
        if let Some(path) = self.initial_file.clone() {
            self.upload(path).await;
        } else {
            println!("\n{}", views::welcome());
        }

        loop {
            let (has_document, status) = {
                let session = self.session.read().await;
                (session.document().is_some(), session.status())
            };

            let choice = match Select::new(
                "What would you like to do?",
                menu_for(has_document, status),
            )
            .prompt()
            {
                Ok(c) => c,
                Err(e) if is_cancel(&e) => return Ok(()),
                Err(e) => return Err(DomainError::Input(e.to_string())),
            };

            match choice {
                MenuChoice::Upload => {
                    let path = match Text::new("Path to document:")
                        .with_help_message(&views::upload_help())
                        .prompt()
                    {
                        Ok(p) => p,
                        Err(e) if is_cancel(&e) => continue,
                        Err(e) => return Err(DomainError::Input(e.to_string())),
                    };
                    let path = path.trim();
                    if !path.is_empty() {
                        self.upload(PathBuf::from(path)).await;
                    }
                }
                MenuChoice::Ask => self.ask_loop().await?,
                MenuChoice::View => self.show_analysis().await,
                MenuChoice::Export => self.export().await,
                MenuChoice::Quit => return Ok(()),
            }
        }
    }
}
