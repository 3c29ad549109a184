//! HTTP adapter module. Implements AnalysisPort and AnswerPort against the remote backend.

pub mod backend_adapter;

pub use backend_adapter::HttpBackendAdapter;
