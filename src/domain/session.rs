//! Session state: current document, analysis status/result, Q&A transcript.
//!
//! One explicitly owned value; use cases mutate it only through these transitions.
//! Every accepted document bumps `generation`. Outbound requests carry the generation
//! they were issued under and their completions are dropped when it no longer matches.

use super::entities::{AnalysisResult, AnalysisStatus, ChatMessage, Document};
use super::errors::DomainError;

/// Identity of the accepted document within a session. 0 = no document yet.
pub type Generation = u64;

#[derive(Debug, Default)]
pub struct SessionState {
    document: Option<Document>,
    generation: Generation,
    status: AnalysisStatus,
    result: Option<AnalysisResult>,
    failure: Option<String>,
    transcript: Vec<ChatMessage>,
    question_pending: bool,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn status(&self) -> AnalysisStatus {
        self.status
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    /// User-facing message of the last failed analysis, if the status is `Failed`.
    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    pub fn is_question_pending(&self) -> bool {
        self.question_pending
    }

    /// Replaces the document and enters `Analyzing`. Result, failure and transcript
    /// belong to the previous document and are dropped.
    pub fn begin_analysis(&mut self, document: Document) -> Generation {
        self.generation += 1;
        self.document = Some(document);
        self.status = AnalysisStatus::Analyzing;
        self.result = None;
        self.failure = None;
        self.transcript.clear();
        self.question_pending = false;
        self.generation
    }

    /// `Analyzing → Complete`. Returns false (and changes nothing) for a stale generation.
    pub fn complete_analysis(&mut self, generation: Generation, result: AnalysisResult) -> bool {
        if !self.is_current_analysis(generation) {
            return false;
        }
        self.status = AnalysisStatus::Complete;
        self.result = Some(result);
        true
    }

    /// `Analyzing → Failed`. The result holder stays empty.
    pub fn fail_analysis(&mut self, generation: Generation, message: impl Into<String>) -> bool {
        if !self.is_current_analysis(generation) {
            return false;
        }
        self.status = AnalysisStatus::Failed;
        self.result = None;
        self.failure = Some(message.into());
        true
    }

    /// Validates and records a question. On success the user message is appended,
    /// input is locked, and the caller gets what it needs to send the request.
    pub fn begin_question(&mut self, question: &str) -> Result<(Generation, Document), DomainError> {
        if question.trim().is_empty() {
            return Err(DomainError::EmptyQuestion);
        }
        let document = self.document.clone().ok_or(DomainError::NoDocument)?;
        if self.question_pending {
            return Err(DomainError::QuestionPending);
        }
        self.transcript.push(ChatMessage::user(question));
        self.question_pending = true;
        Ok((self.generation, document))
    }

    /// Appends the assistant reply and unlocks input. Returns false for a stale generation.
    pub fn finish_question(&mut self, generation: Generation, answer: impl Into<String>) -> bool {
        if generation != self.generation {
            return false;
        }
        self.transcript.push(ChatMessage::assistant(answer));
        self.question_pending = false;
        true
    }

    fn is_current_analysis(&self, generation: Generation) -> bool {
        generation == self.generation && self.status == AnalysisStatus::Analyzing
    }
}
