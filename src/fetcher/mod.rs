//! Token metadata fetchers
//!
//! This module provides:
//! - The `TokenFetcher` capability the pipeline depends on
//! - The HTTP implementation used in production
//!
//! The collector and pipeline interact exclusively through the
//! `TokenFetcher` trait, so tests can inject stubs.

pub mod adapter;
pub mod http;

#[cfg(test)]
pub mod stub;
