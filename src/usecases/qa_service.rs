//! Q&A session. One outbound request per question; answers appended to the transcript.

use crate::domain::DomainError;
use crate::ports::AnswerPort;
use crate::usecases::SharedSession;
use std::sync::Arc;
use tracing::{info, warn};

/// Appended in place of an answer when the backend call fails.
pub const ANSWER_FALLBACK_MESSAGE: &str =
    "Sorry, I couldn't process your question. Please try again.";

/// What happened to a submitted question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AskOutcome {
    /// Backend answer, appended verbatim.
    Answered(String),
    /// Backend failed; the fallback message was appended.
    Fallback,
    /// The document was replaced while the request was in flight; nothing appended.
    Discarded,
}

pub struct QaService {
    answers: Arc<dyn AnswerPort>,
    session: SharedSession,
}

impl QaService {
    pub fn new(answers: Arc<dyn AnswerPort>, session: SharedSession) -> Self {
        Self { answers, session }
    }

    /// Submit a question about the current document.
    ///
    /// # Errors
    /// `EmptyQuestion`, `NoDocument` or `QuestionPending`; in all three cases nothing is
    /// appended and no request is sent. Backend failures are not errors here.
    pub async fn ask(&self, question: &str) -> Result<AskOutcome, DomainError> {
        let (generation, document) = self.session.write().await.begin_question(question)?;
        info!(
            name = %document.name,
            question_len = question.len(),
            "asking question"
        );

        let (reply, outcome) = match self.answers.answer(&document, question).await {
            Ok(answer) => (answer.clone(), AskOutcome::Answered(answer)),
            Err(e) => {
                warn!(name = %document.name, error = %e, "question failed");
                (ANSWER_FALLBACK_MESSAGE.to_string(), AskOutcome::Fallback)
            }
        };

        if self.session.write().await.finish_question(generation, reply) {
            Ok(outcome)
        } else {
            warn!(
                name = %document.name,
                generation,
                "discarding answer for replaced document"
            );
            Ok(AskOutcome::Discarded)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::MIME_PDF;
    use crate::domain::{ChatMessage, Document};
    use crate::usecases::new_session;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::{Mutex, oneshot};

    /// Counts calls; answers with a canned reply or fails.
    struct ScriptedAnswers {
        calls: AtomicUsize,
        reply: Option<String>,
    }

    impl ScriptedAnswers {
        fn ok(reply: &str) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                reply: Some(reply.to_string()),
            }
        }

        fn failing() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                reply: None,
            }
        }
    }

    #[async_trait::async_trait]
    impl AnswerPort for ScriptedAnswers {
        async fn answer(&self, document: &Document, question: &str) -> Result<String, DomainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            assert!(!document.content.is_empty());
            assert!(!question.trim().is_empty());
            self.reply
                .clone()
                .ok_or_else(|| DomainError::Answer("HTTP 502".into()))
        }
    }

    fn pdf(name: &str) -> Document {
        Document::new(name, MIME_PDF, b"%PDF".to_vec())
    }

    #[tokio::test]
    async fn test_answer_appended_in_order() {
        let session = new_session();
        session.write().await.begin_analysis(pdf("nda.pdf"));
        let port = Arc::new(ScriptedAnswers::ok("Yes, with 30 days notice."));
        let qa = QaService::new(port.clone(), session.clone());

        let outcome = qa.ask("Can I terminate early?").await.unwrap();

        assert_eq!(
            outcome,
            AskOutcome::Answered("Yes, with 30 days notice.".into())
        );
        assert_eq!(port.calls.load(Ordering::SeqCst), 1);
        let state = session.read().await;
        assert_eq!(
            state.transcript(),
            &[
                ChatMessage::user("Can I terminate early?"),
                ChatMessage::assistant("Yes, with 30 days notice."),
            ]
        );
        assert!(!state.is_question_pending());
    }

    #[tokio::test]
    async fn test_blank_question_sends_nothing() {
        let session = new_session();
        session.write().await.begin_analysis(pdf("nda.pdf"));
        let port = Arc::new(ScriptedAnswers::ok("unused"));
        let qa = QaService::new(port.clone(), session.clone());

        for q in ["", "    ", "\t\n"] {
            assert!(matches!(qa.ask(q).await, Err(DomainError::EmptyQuestion)));
        }

        assert_eq!(port.calls.load(Ordering::SeqCst), 0);
        assert!(session.read().await.transcript().is_empty());
    }

    #[tokio::test]
    async fn test_failure_appends_fallback_and_unlocks() {
        let session = new_session();
        session.write().await.begin_analysis(pdf("nda.pdf"));
        let qa = QaService::new(Arc::new(ScriptedAnswers::failing()), session.clone());

        assert_eq!(qa.ask("Who pays?").await.unwrap(), AskOutcome::Fallback);
        assert_eq!(qa.ask("And when?").await.unwrap(), AskOutcome::Fallback);

        let state = session.read().await;
        assert_eq!(state.transcript().len(), 4);
        assert_eq!(state.transcript()[1].text, ANSWER_FALLBACK_MESSAGE);
        assert!(!state.is_question_pending());
    }

    #[tokio::test]
    async fn test_no_document_sends_nothing() {
        let port = Arc::new(ScriptedAnswers::ok("unused"));
        let qa = QaService::new(port.clone(), new_session());

        assert!(matches!(qa.ask("Hello?").await, Err(DomainError::NoDocument)));
        assert_eq!(port.calls.load(Ordering::SeqCst), 0);
    }

    /// Holds every answer until the test releases it.
    struct GatedAnswers {
        gate: Mutex<Option<oneshot::Receiver<String>>>,
        started: Mutex<Option<oneshot::Sender<()>>>,
    }

    #[async_trait::async_trait]
    impl AnswerPort for GatedAnswers {
        async fn answer(&self, _document: &Document, _question: &str) -> Result<String, DomainError> {
            if let Some(started) = self.started.lock().await.take() {
                let _ = started.send(());
            }
            let rx = self.gate.lock().await.take();
            match rx {
                Some(rx) => rx.await.map_err(|_| DomainError::Answer("gate dropped".into())),
                None => Ok("immediate".to_string()),
            }
        }
    }

    #[tokio::test]
    async fn test_second_question_rejected_while_pending() {
        let session = new_session();
        session.write().await.begin_analysis(pdf("nda.pdf"));
        let (tx, rx) = oneshot::channel();
        let (started_tx, started_rx) = oneshot::channel();
        let port = Arc::new(GatedAnswers {
            gate: Mutex::new(Some(rx)),
            started: Mutex::new(Some(started_tx)),
        });
        let qa = Arc::new(QaService::new(port, session.clone()));

        let first = {
            let qa = Arc::clone(&qa);
            tokio::spawn(async move { qa.ask("First?").await })
        };
        started_rx.await.unwrap();

        assert!(matches!(
            qa.ask("Second?").await,
            Err(DomainError::QuestionPending)
        ));

        tx.send("First answer".to_string()).unwrap();
        assert_eq!(
            first.await.unwrap().unwrap(),
            AskOutcome::Answered("First answer".into())
        );
        assert_eq!(session.read().await.transcript().len(), 2);
    }

    #[tokio::test]
    async fn test_stale_answer_not_appended_after_new_upload() {
        let session = new_session();
        session.write().await.begin_analysis(pdf("old.pdf"));
        let (tx, rx) = oneshot::channel();
        let (started_tx, started_rx) = oneshot::channel();
        let port = Arc::new(GatedAnswers {
            gate: Mutex::new(Some(rx)),
            started: Mutex::new(Some(started_tx)),
        });
        let qa = Arc::new(QaService::new(port, session.clone()));

        let pending = {
            let qa = Arc::clone(&qa);
            tokio::spawn(async move { qa.ask("About the old one?").await })
        };
        started_rx.await.unwrap();

        session.write().await.begin_analysis(pdf("new.pdf"));
        tx.send("Answer about old.pdf".to_string()).unwrap();

        assert_eq!(pending.await.unwrap().unwrap(), AskOutcome::Discarded);
        let state = session.read().await;
        assert!(state.transcript().is_empty());
        assert_eq!(state.document().map(|d| d.name.as_str()), Some("new.pdf"));
    }
}
