#![allow(dead_code)]

use std::io;
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use wellmerge_core::config::{DuplicatePolicy, MatchMode};
use wellmerge_core::key::ObjectLocation;
use wellmerge_exec::{EnrichOptions, Enricher};
use wellmerge_io::MemoryStorage;
use wellmerge_refdb::{MemoryReferenceStore, ReferenceRecord};

pub const INPUT_BUCKET: &str = "incoming";
pub const OUTPUT_BUCKET: &str = "enriched";

pub const ACME_CSV: &str = "client_name,rig_name,job_date,depth\n\
Acme,Rig1,01/02/2023,100\n\
Acme,Rig1,01/02/2023,200\n\
Acme,Rig1,01/02/2023,300\n";

pub fn job_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 1, 2).unwrap()
}

pub fn source(key: &str) -> ObjectLocation {
    ObjectLocation::new(INPUT_BUCKET, key)
}

pub struct Harness {
    pub storage: MemoryStorage,
    pub reference: MemoryReferenceStore,
    pub enricher: Enricher,
}

pub fn harness(records: Vec<ReferenceRecord>, policy: DuplicatePolicy) -> Harness {
    let storage = MemoryStorage::new();
    let reference = MemoryReferenceStore::with_records(records);
    let options = EnrichOptions {
        output_bucket: OUTPUT_BUCKET.to_string(),
        match_mode: MatchMode::Contains,
        duplicate_policy: policy,
    };
    let enricher = Enricher::new(
        Arc::new(storage.clone()),
        Arc::new(reference.clone()),
        options,
    );
    Harness {
        storage,
        reference,
        enricher,
    }
}

pub fn output_text(storage: &MemoryStorage, key: &str) -> Option<String> {
    storage
        .object(&ObjectLocation::new(OUTPUT_BUCKET, key))
        .map(|bytes| String::from_utf8(bytes).unwrap())
}

/// In-memory sink for `tracing-subscriber` fmt output.
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

pub fn capture_subscriber(logs: &CapturedLogs) -> impl tracing::Subscriber + Send + Sync {
    let writer = logs.clone();
    tracing_subscriber::fmt()
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .with_writer(move || writer.clone())
        .finish()
}
