//! Shared test utilities for the abcd workspace.
//!
//! - [`tracing`] captures spans and events so tests can assert on the
//!   instrumentation emitted by graph generation.
//! - [`profile`] reads the property-test run profile from the environment so
//!   every proptest suite honours the same overrides.

pub mod profile;
pub mod tracing;
