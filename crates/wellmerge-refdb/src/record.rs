use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One row of the reference table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceRecord {
    pub client_name: String,
    pub rig_name: String,
    pub job_date: NaiveDate,
    pub well_name: Option<String>,
}

impl ReferenceRecord {
    pub fn new(
        client_name: impl Into<String>,
        rig_name: impl Into<String>,
        job_date: NaiveDate,
        well_name: impl Into<String>,
    ) -> Self {
        Self {
            client_name: client_name.into(),
            rig_name: rig_name.into(),
            job_date,
            well_name: Some(well_name.into()),
        }
    }
}
