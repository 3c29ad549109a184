//! Filesystem adapter. Implements DocumentSource for files picked on disk.

pub mod document_source;

pub use document_source::FsDocumentSource;
