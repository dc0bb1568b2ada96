//! Expose seokit's command layer for integration tests, benchmarks and the
//! xtask. The binary in `main.rs` is a thin wrapper around it.
pub mod cli;
pub mod commands;
pub mod logging;
