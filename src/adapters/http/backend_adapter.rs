//! HTTP adapter for the LegalLens analysis backend.
//!
//! Both endpoints take the original document as multipart field `file`:
//! - `POST /api/analyse/answer` (+ `question`) → plain-text answer, shown verbatim
//! - `POST /api/analyse` → JSON `AnalysisResult`
//!
//! Any non-2xx status is a failure. No retries.

use crate::domain::{AnalysisResult, Document, DomainError};
use crate::ports::{AnalysisPort, AnswerPort};
use reqwest::multipart::{Form, Part};
use std::time::Duration;
use tracing::{debug, info, warn};

pub const ANSWER_PATH: &str = "/api/analyse/answer";
pub const ANALYSE_PATH: &str = "/api/analyse";

/// Remote analysis backend.
pub struct HttpBackendAdapter {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackendAdapter {
    /// Create a new backend adapter.
    ///
    /// # Arguments
    /// * `base_url` - Backend origin, e.g. "http://localhost:8000" (trailing slash ignored)
    /// * `timeout` - Whole-request timeout; `None` waits indefinitely
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, DomainError> {
        let mut builder = reqwest::Client::builder();
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        let client = builder
            .build()
            .map_err(|e| DomainError::Io(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// The original document as a multipart part, keeping its name and type.
    fn file_part(document: &Document) -> Result<Part, reqwest::Error> {
        Part::bytes(document.content.to_vec())
            .file_name(document.name.clone())
            .mime_str(&document.mime_type)
    }

    /// POST a multipart form; returns the body of a 2xx response.
    async fn post_form(&self, path: &str, form: Form) -> Result<String, String> {
        let url = self.url(path);
        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| format!("HTTP request failed: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            warn!(url = %url, status = %status, body = %text, "backend returned error");
            return Err(format!(
                "API error {}: {}",
                status,
                text.chars().take(200).collect::<String>()
            ));
        }

        response
            .text()
            .await
            .map_err(|e| format!("Failed to read response body: {}", e))
    }

    /// Backends built on LLMs sometimes wrap JSON in markdown fences or prose.
    /// Returns the JSON object inside.
    fn extract_json(raw_text: &str) -> &str {
        let trimmed = raw_text.trim();

        if let Some(rest) = trimmed.strip_prefix("```") {
            let rest = rest.strip_prefix("json").unwrap_or(rest);
            let inner = match rest.rfind("```") {
                Some(end) => &rest[..end],
                None => rest,
            };
            return inner.trim();
        }

        if let (Some(start), Some(end)) = (trimmed.find('{'), trimmed.rfind('}')) {
            if start < end {
                return &trimmed[start..=end];
            }
        }

        trimmed
    }
}

#[async_trait::async_trait]
impl AnswerPort for HttpBackendAdapter {
    async fn answer(&self, document: &Document, question: &str) -> Result<String, DomainError> {
        info!(
            name = %document.name,
            size = document.size,
            question_len = question.len(),
            "sending question to backend"
        );

        let part = Self::file_part(document)
            .map_err(|e| DomainError::Answer(format!("Invalid document part: {}", e)))?;
        let form = Form::new()
            .part("file", part)
            .text("question", question.to_string());

        let answer = self
            .post_form(ANSWER_PATH, form)
            .await
            .map_err(DomainError::Answer)?;

        debug!(answer_len = answer.len(), "received answer");
        Ok(answer)
    }
}

#[async_trait::async_trait]
impl AnalysisPort for HttpBackendAdapter {
    async fn analyze(&self, document: &Document) -> Result<AnalysisResult, DomainError> {
        info!(
            name = %document.name,
            size = document.size,
            "sending document to backend for analysis"
        );

        let part = Self::file_part(document)
            .map_err(|e| DomainError::Analysis(format!("Invalid document part: {}", e)))?;
        let form = Form::new().part("file", part);

        let body = self
            .post_form(ANALYSE_PATH, form)
            .await
            .map_err(DomainError::Analysis)?;

        let json = Self::extract_json(&body);
        serde_json::from_str(json).map_err(|e| {
            warn!(error = %e, json = %json.chars().take(200).collect::<String>(), "JSON parse failed");
            DomainError::Analysis(format!("Failed to parse analysis JSON: {}", e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RiskLevel;
    use crate::domain::entities::MIME_PDF;
    use axum::Router;
    use axum::extract::Multipart;
    use axum::http::StatusCode;
    use axum::routing::post;

    async fn spawn_backend(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    /// Echoes what it received: `name|mime|len|question`.
    async fn echo_answer(mut multipart: Multipart) -> String {
        let (mut file_name, mut mime, mut len, mut question) =
            (String::new(), String::new(), 0, String::new());
        while let Some(field) = multipart.next_field().await.unwrap() {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "file" => {
                    file_name = field.file_name().unwrap_or_default().to_string();
                    mime = field.content_type().unwrap_or_default().to_string();
                    len = field.bytes().await.unwrap().len();
                }
                "question" => question = field.text().await.unwrap(),
                _ => {}
            }
        }
        format!("{}|{}|{}|{}", file_name, mime, len, question)
    }

    fn pdf() -> Document {
        Document::new("nda.pdf", MIME_PDF, b"%PDF-1.7 sample".to_vec())
    }

    #[test]
    fn test_extract_json_clean() {
        let input = r#"{"summary": "test"}"#;
        assert_eq!(HttpBackendAdapter::extract_json(input), input);
    }

    #[test]
    fn test_extract_json_fenced() {
        let input = "```json\n{\"summary\": \"test\"}\n```";
        assert_eq!(
            HttpBackendAdapter::extract_json(input),
            r#"{"summary": "test"}"#
        );
        let input = "```\n{\"summary\": \"test\"}\n```";
        assert_eq!(
            HttpBackendAdapter::extract_json(input),
            r#"{"summary": "test"}"#
        );
    }

    #[test]
    fn test_extract_json_with_prose() {
        let input = "Here is the analysis:\n{\"risks\": []} Thanks!";
        assert_eq!(HttpBackendAdapter::extract_json(input), r#"{"risks": []}"#);
    }

    #[tokio::test]
    async fn test_answer_sends_file_and_question() {
        let base = spawn_backend(Router::new().route(ANSWER_PATH, post(echo_answer))).await;
        let adapter = HttpBackendAdapter::new(&format!("{}/", base), None).unwrap();

        let answer = adapter.answer(&pdf(), "Who pays?").await.unwrap();

        assert_eq!(answer, "nda.pdf|application/pdf|15|Who pays?");
    }

    #[tokio::test]
    async fn test_answer_non_success_is_error() {
        let router = Router::new().route(
            ANSWER_PATH,
            post(|| async { (StatusCode::BAD_GATEWAY, "upstream down") }),
        );
        let adapter = HttpBackendAdapter::new(&spawn_backend(router).await, None).unwrap();

        let err = adapter.answer(&pdf(), "Who pays?").await.unwrap_err();

        assert!(matches!(err, DomainError::Answer(ref m) if m.contains("502")));
    }

    #[tokio::test]
    async fn test_answer_unreachable_backend_is_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let adapter = HttpBackendAdapter::new(&format!("http://{}", addr), None).unwrap();

        assert!(matches!(
            adapter.answer(&pdf(), "Anyone there?").await,
            Err(DomainError::Answer(_))
        ));
    }

    #[tokio::test]
    async fn test_analyze_parses_fenced_json() {
        let router = Router::new().route(
            ANALYSE_PATH,
            post(|mut multipart: Multipart| async move {
                let field = multipart.next_field().await.unwrap().unwrap();
                assert_eq!(field.name(), Some("file"));
                "```json\n{\"risk_level\": \"HIGH\", \"risks\": [\"Unlimited liability\"], \"key_clauses\": [\"Indemnity\"], \"summary\": \"Risky.\"}\n```"
            }),
        );
        let adapter = HttpBackendAdapter::new(&spawn_backend(router).await, None).unwrap();

        let result = adapter.analyze(&pdf()).await.unwrap();

        assert_eq!(result.risk_level, RiskLevel::High);
        assert_eq!(result.risks, vec!["Unlimited liability"]);
        assert_eq!(result.key_clauses, vec!["Indemnity"]);
        assert_eq!(result.summary, "Risky.");
    }

    #[tokio::test]
    async fn test_analyze_bad_body_is_error() {
        let router = Router::new().route(ANALYSE_PATH, post(|| async { "not json at all" }));
        let adapter = HttpBackendAdapter::new(&spawn_backend(router).await, None).unwrap();

        assert!(matches!(
            adapter.analyze(&pdf()).await,
            Err(DomainError::Analysis(_))
        ));
    }

    #[tokio::test]
    async fn test_timeout_applies() {
        let router = Router::new().route(
            ANSWER_PATH,
            post(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                "too late"
            }),
        );
        let adapter = HttpBackendAdapter::new(
            &spawn_backend(router).await,
            Some(Duration::from_millis(100)),
        )
        .unwrap();

        assert!(adapter.answer(&pdf(), "Quick?").await.is_err());
    }
}
