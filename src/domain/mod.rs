//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - value types shared by fetchers, normalizer and report (`AnchorSet`, `ChangeRecord`, ...)
//! - the static metric catalog (`catalog`)

pub mod catalog;
pub mod types;

pub use catalog::*;
pub use types::*;
