#![forbid(unsafe_code)]
//! wellmerge-core: shared data model for the well-name enrichment step.
//!
//! Holds the columnar `RecordSet`, the `LookupKey` derived from an input file,
//! object locations, runtime configuration and the error taxonomy. No async or
//! I/O lives here; storage and database access are in `wellmerge-io` and
//! `wellmerge-refdb`.

pub mod config;
pub mod error;
pub mod key;
pub mod prelude;
pub mod types;

pub use error::{Error, Result};
