//! Fixture adapter. Canned analysis and answers for running without a backend.

pub mod fixture_adapter;

pub use fixture_adapter::FixtureAdapter;
