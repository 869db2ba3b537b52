#![forbid(unsafe_code)]
//! wellmerge-exec: the enrichment step.
//!
//! `Enricher::run` reads a CSV object, resolves its well name from the
//! reference store and writes the enriched copy to the output bucket.
//! `event` decodes the S3 notifications that trigger it.

pub mod enricher;
pub mod event;

pub use enricher::{select_well_name, EnrichOptions, EnrichOutcome, Enricher};
pub use event::S3Notification;
