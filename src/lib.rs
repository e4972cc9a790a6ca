//! `macro-brief` library crate.
//!
//! The binary (`brief`) is a thin wrapper around this library so that:
//!
//! - the pipeline is testable against canned upstream responses
//! - providers, formatting and delivery can be exercised in isolation

pub mod app;
pub mod cli;
pub mod config;
pub mod data;
pub mod delivery;
pub mod domain;
pub mod error;
pub mod http;
pub mod insight;
pub mod normalize;
pub mod report;
