//! Readers that turn stored bytes into a `RecordSet`.

pub mod csv;
