//! # facetwork
//!
//! Library half of the Facetwork binary: configuration, commands and
//! reports, kept out of `main.rs` so integration tests can drive them.

pub mod cli;
pub mod config;
pub mod report;
