//! Lookup key extraction and object locations.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::RecordSet;

pub const CLIENT_NAME: &str = "client_name";
pub const RIG_NAME: &str = "rig_name";
pub const JOB_DATE: &str = "job_date";
pub const WELL_NAME: &str = "well_name";

/// Date layout used by the input files.
pub const JOB_DATE_FORMAT: &str = "%m/%d/%Y";

/// Key used to find the well a file belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupKey {
    pub client_name: String,
    pub rig_name: String,
    pub job_date: NaiveDate,
}

impl LookupKey {
    /// Derive the key from a record set.
    ///
    /// Each key column must hold exactly one distinct, non-blank value across
    /// all rows.
    pub fn extract(records: &RecordSet) -> Result<Self> {
        let client_name = single_value(records, CLIENT_NAME)?;
        let rig_name = single_value(records, RIG_NAME)?;
        let raw_date = single_value(records, JOB_DATE)?;
        let job_date = parse_job_date(&raw_date)?;
        Ok(Self {
            client_name,
            rig_name,
            job_date,
        })
    }

    /// `job_date` as `YYYY-MM-DD`.
    pub fn iso_date(&self) -> String {
        self.job_date.format("%Y-%m-%d").to_string()
    }
}

impl fmt::Display for LookupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "client_name {} rig_name {} job_date {}",
            self.client_name,
            self.rig_name,
            self.iso_date()
        )
    }
}

fn single_value(records: &RecordSet, column: &str) -> Result<String> {
    let col = records
        .column(column)
        .ok_or_else(|| Error::MissingColumn(column.to_string()))?;
    let distinct = col.distinct_values();
    match distinct.as_slice() {
        [] => Err(Error::EmptyColumn(column.to_string())),
        // A blank name would widen a substring match to every row.
        [only] if only.trim().is_empty() => Err(Error::BlankValue(column.to_string())),
        [only] => Ok((*only).to_string()),
        many => Err(Error::AmbiguousValue {
            column: column.to_string(),
            values: many.iter().map(|v| v.to_string()).collect(),
        }),
    }
}

/// Parse `MM/DD/YYYY`. Leading zeros are optional; the year must have four digits.
pub fn parse_job_date(raw: &str) -> Result<NaiveDate> {
    let s = raw.trim();
    let four_digit_year = s
        .rsplit('/')
        .next()
        .map(|y| y.len() == 4 && y.bytes().all(|b| b.is_ascii_digit()))
        .unwrap_or(false);
    if !four_digit_year {
        return Err(Error::DateFormat(raw.to_string()));
    }
    NaiveDate::parse_from_str(s, JOB_DATE_FORMAT).map_err(|_| Error::DateFormat(raw.to_string()))
}

/// A bucket/key pair in object storage.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectLocation {
    pub bucket: String,
    pub key: String,
}

impl ObjectLocation {
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
        }
    }

    /// Same key in another bucket.
    pub fn with_bucket(&self, bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: self.key.clone(),
        }
    }
}

impl fmt::Display for ObjectLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.bucket, self.key)
    }
}
