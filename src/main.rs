//! Wiring & DI. Entry point: bootstrap adapters, inject into services, run UI.
//! No business logic here.

use clap::Parser;
use dotenv::dotenv;
use legallens::adapters::fixture::FixtureAdapter;
use legallens::adapters::fs::FsDocumentSource;
use legallens::adapters::http::HttpBackendAdapter;
use legallens::adapters::ui::tui::TuiInputPort;
use legallens::ports::{AnalysisPort, AnswerPort, DocumentSource, InputPort};
use legallens::shared::config::AppConfig;
use legallens::usecases::{AnalysisService, QaService, ReportService, new_session};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Upload a legal document, review its risk analysis, and ask questions about it.
#[derive(Parser, Debug)]
#[command(name = "legallens", version)]
struct Args {
    /// Document to upload on start (.pdf, .doc, .docx or .txt, up to 10MB)
    file: Option<PathBuf>,

    /// Use canned analysis instead of the backend
    #[arg(long)]
    fixture: bool,

    /// Backend base URL (overrides LEGALLENS_API_BASE_URL)
    #[arg(long)]
    api_url: Option<String>,

    /// Declared MIME type for uploads, instead of deriving it from the extension
    #[arg(long)]
    mime: Option<String>,

    /// Directory for exported reports (overrides LEGALLENS_REPORTS_DIR)
    #[arg(long)]
    reports_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let env_loaded = dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!("no .env found"),
    }

    let mut cfg = AppConfig::load().unwrap_or_else(|e| {
        warn!(error = %e, "invalid configuration, using defaults");
        AppConfig::default()
    });
    if let Some(url) = args.api_url {
        cfg.api_base_url = Some(url);
    }
    if args.fixture {
        cfg.fixture_mode = Some(true);
    }

    legallens::adapters::ui::init_ui();

    // --- Analysis backend: fixture or remote ---
    let fixture_mode = cfg.is_fixture_mode();
    let (analysis, answers): (Arc<dyn AnalysisPort>, Arc<dyn AnswerPort>) =
        if fixture_mode {
            let delay_ms = cfg.fixture_delay_ms_or_default();
            info!(delay_ms, "fixture mode: canned analysis, no backend calls");
            let fixture = Arc::new(FixtureAdapter::with_delay(delay_ms));
            let analysis: Arc<dyn AnalysisPort> = fixture.clone();
            let answers: Arc<dyn AnswerPort> = fixture;
            (analysis, answers)
        } else {
            let url = cfg.api_base_url_or_default();
            let timeout = cfg.request_timeout_secs.map(Duration::from_secs);
            info!(url = %url, timeout_secs = ?cfg.request_timeout_secs, "using remote analysis backend");
            let backend = Arc::new(
                HttpBackendAdapter::new(&url, timeout).map_err(|e| anyhow::anyhow!("{}", e))?,
            );
            let analysis: Arc<dyn AnalysisPort> = backend.clone();
            let answers: Arc<dyn AnswerPort> = backend;
            (analysis, answers)
        };

    let reports_dir = args
        .reports_dir
        .unwrap_or_else(|| PathBuf::from(cfg.reports_dir_or_default()));

    // --- Services over one shared session ---
    let session = new_session();
    let source: Arc<dyn DocumentSource> = Arc::new(FsDocumentSource::new());
    let analysis_service = Arc::new(AnalysisService::new(source, analysis, session.clone()));
    let qa_service = Arc::new(QaService::new(answers, session.clone()));
    let report_service = Arc::new(ReportService::new(session.clone(), reports_dir));

    let input_port: Arc<dyn InputPort> = Arc::new(
        TuiInputPort::new(analysis_service, qa_service, report_service, session)
            .with_initial_file(args.file)
            .with_mime_override(args.mime)
            .with_fixture_preview(fixture_mode),
    );

    input_port
        .run()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    Ok(())
}
