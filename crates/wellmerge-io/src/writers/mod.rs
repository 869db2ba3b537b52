//! Writers that serialise a `RecordSet` for storage.

pub mod csv;
