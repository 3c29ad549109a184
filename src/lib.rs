//! LegalLens: upload a legal document, review its risk analysis, and ask questions about it.
//! Hexagonal layout: domain ← ports ← usecases ← adapters.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod shared;
pub mod usecases;
