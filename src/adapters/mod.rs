//! Infrastructure adapters. Implement ports.
//!
//! Analysis backend (HTTP or fixture), filesystem, terminal UI. Map errors to DomainError.

pub mod fixture;
pub mod fs;
pub mod http;
pub mod ui;
