//! Mars rover images library
//!
//! This module exposes the cache, client, aggregation and CLI modules for use in
//! the binary and in integration tests.

pub mod aggregate;
pub mod cache;
pub mod cli;
pub mod data;
pub mod output;
