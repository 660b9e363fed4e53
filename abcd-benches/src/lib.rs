//! Shared fixtures for the ABCD benchmarks.

pub mod params;
pub mod sequences;
