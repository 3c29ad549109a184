//! Cross-cutting helpers: configuration and formatting.

pub mod config;
pub mod format;
