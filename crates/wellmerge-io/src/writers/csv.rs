//! CSV writer: header plus rows, `\n` terminated, quoting only where needed.

use std::io::Write;

use wellmerge_core::error::{Error, Result};
use wellmerge_core::types::RecordSet;

pub struct CsvWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> CsvWriter<W> {
    pub fn to_writer(writer: W) -> Self {
        let writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .quote_style(csv::QuoteStyle::Necessary)
            .from_writer(writer);
        Self { writer }
    }

    pub fn write_set(&mut self, records: &RecordSet) -> Result<()> {
        self.writer
            .write_record(records.column_names())
            .map_err(|e| Error::Write(e.to_string()))?;
        for row in records.rows() {
            self.writer
                .write_record(row)
                .map_err(|e| Error::Write(e.to_string()))?;
        }
        self.writer.flush().map_err(|e| Error::Write(e.to_string()))?;
        Ok(())
    }

    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| Error::Write(e.error().to_string()))
    }
}

/// Serialise a record set to CSV bytes.
pub fn write_csv(records: &RecordSet) -> Result<Vec<u8>> {
    let mut writer = CsvWriter::to_writer(Vec::new());
    writer.write_set(records)?;
    writer.into_inner()
}
