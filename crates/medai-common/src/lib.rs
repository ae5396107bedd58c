//! Shared utilities for the medai workspace.
//!
//! This crate provides common helpers used across the ingestion and dataset
//! crates, mostly conversions between Polars values and plain Rust numbers.

pub mod polars;

pub use polars::{any_to_f64, any_to_string, format_numeric, parse_f64};
