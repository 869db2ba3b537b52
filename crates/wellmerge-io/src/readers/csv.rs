//! CSV reader: header row names the columns, every row has the header's width.

use std::io::Read;

use wellmerge_core::error::{Error, Result};
use wellmerge_core::types::RecordSet;

pub struct CsvReader<R: Read> {
    inner: csv::Reader<R>,
}

impl<'a> CsvReader<&'a [u8]> {
    pub fn from_bytes(bytes: &'a [u8]) -> Self {
        Self::from_reader(bytes)
    }
}

impl<R: Read> CsvReader<R> {
    pub fn from_reader(reader: R) -> Self {
        let inner = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(false)
            .from_reader(reader);
        Self { inner }
    }

    /// Read the header and all rows.
    pub fn read_all(mut self) -> Result<RecordSet> {
        let header: Vec<String> = self
            .inner
            .headers()
            .map_err(|e| Error::Parse(e.to_string()))?
            .iter()
            .map(str::to_string)
            .collect();
        if header.is_empty() {
            return Err(Error::Parse("missing header row".into()));
        }

        let mut rows = Vec::new();
        for record in self.inner.records() {
            let record = record.map_err(|e| Error::Parse(e.to_string()))?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        RecordSet::from_rows(header, rows)
    }
}

/// Parse CSV bytes into a record set.
pub fn read_csv(bytes: &[u8]) -> Result<RecordSet> {
    CsvReader::from_bytes(bytes).read_all()
}
