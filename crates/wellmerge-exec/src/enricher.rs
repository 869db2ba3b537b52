//! Enricher: ingest -> extract_key -> lookup_well_name -> apply_well_name -> emit.
//!
//! Each phase is a separate method so callers and tests can drive them one at
//! a time; `run` chains them for a single source object. Nothing is written
//! until the final phase, so a failure anywhere leaves no partial output.

use std::sync::Arc;

use serde::Serialize;
use wellmerge_core::config::{DuplicatePolicy, EnricherConfig, MatchMode};
use wellmerge_core::error::{Error, Result};
use wellmerge_core::key::{LookupKey, ObjectLocation, WELL_NAME};
use wellmerge_core::types::RecordSet;
use wellmerge_io::{read_csv, write_csv, ObjectStorage};
use wellmerge_refdb::ReferenceStore;

#[derive(Debug, Clone)]
pub struct EnrichOptions {
    /// Bucket the enriched copy is written to, under the source key.
    pub output_bucket: String,
    pub match_mode: MatchMode,
    pub duplicate_policy: DuplicatePolicy,
}

impl EnrichOptions {
    pub fn new(output_bucket: impl Into<String>) -> Self {
        Self {
            output_bucket: output_bucket.into(),
            match_mode: MatchMode::default(),
            duplicate_policy: DuplicatePolicy::default(),
        }
    }
}

impl From<&EnricherConfig> for EnrichOptions {
    fn from(cfg: &EnricherConfig) -> Self {
        Self {
            output_bucket: cfg.output_bucket.clone(),
            match_mode: cfg.match_mode,
            duplicate_policy: cfg.duplicate_policy,
        }
    }
}

/// Summary of one successful run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnrichOutcome {
    pub source: ObjectLocation,
    pub destination: ObjectLocation,
    pub rows: usize,
    pub well_name: String,
    /// Rows the reference store returned for the key.
    pub candidates: usize,
    pub matched: bool,
}

pub struct Enricher {
    storage: Arc<dyn ObjectStorage>,
    reference: Arc<dyn ReferenceStore>,
    options: EnrichOptions,
}

impl Enricher {
    pub fn new(
        storage: Arc<dyn ObjectStorage>,
        reference: Arc<dyn ReferenceStore>,
        options: EnrichOptions,
    ) -> Self {
        Self {
            storage,
            reference,
            options,
        }
    }

    /// Fetch and parse the source CSV.
    #[tracing::instrument(skip(self), fields(bucket = %source.bucket, key = %source.key))]
    pub async fn ingest(&self, source: &ObjectLocation) -> Result<RecordSet> {
        let bytes = self.storage.get(source).await.map_err(Error::from)?;
        tracing::debug!(bytes = bytes.len(), "fetched source object");
        let records = read_csv(&bytes)?;
        tracing::debug!(
            rows = records.num_rows(),
            columns = ?records.column_names(),
            "parsed source object"
        );
        Ok(records)
    }

    /// Derive the lookup key. Every key column must hold one distinct value.
    pub fn extract_key(records: &RecordSet) -> Result<LookupKey> {
        let key = LookupKey::extract(records)?;
        tracing::debug!(
            client_name = %key.client_name,
            rig_name = %key.rig_name,
            job_date = %key.iso_date(),
            "extracted lookup key"
        );
        Ok(key)
    }

    /// Resolve the well name for `key`. No match yields an empty string.
    #[tracing::instrument(skip(self, key), fields(client_name = %key.client_name, rig_name = %key.rig_name, job_date = %key.iso_date()))]
    pub async fn lookup_well_name(&self, key: &LookupKey) -> Result<String> {
        Ok(self.lookup(key).await?.0)
    }

    async fn lookup(&self, key: &LookupKey) -> Result<(String, usize)> {
        let candidates = self
            .reference
            .well_names(key, self.options.match_mode)
            .await?;
        let count = candidates.len();
        tracing::debug!(candidates = count, "reference rows fetched");
        let well_name = select_well_name(candidates, self.options.duplicate_policy)?;
        Ok((well_name, count))
    }

    /// Broadcast `well_name` into a `well_name` column on every row.
    ///
    /// An empty name is still written; the missing reference data is logged
    /// at error level instead of failing the run.
    pub fn apply_well_name(mut records: RecordSet, well_name: &str, key: &LookupKey) -> RecordSet {
        if well_name.is_empty() {
            tracing::error!(
                client_name = %key.client_name,
                rig_name = %key.rig_name,
                job_date = %key.iso_date(),
                "Missing well_name for {} in reference store",
                key
            );
        }
        records.broadcast_column(WELL_NAME, well_name);
        records
    }

    /// Serialise and write the enriched set, replacing any existing object.
    #[tracing::instrument(skip(self, records), fields(bucket = %destination.bucket, key = %destination.key))]
    pub async fn emit(&self, records: &RecordSet, destination: &ObjectLocation) -> Result<()> {
        let bytes = write_csv(records)?;
        let len = bytes.len();
        self.storage
            .put(destination, bytes)
            .await
            .map_err(|e| Error::Write(e.to_string()))?;
        tracing::debug!(bytes = len, "wrote enriched object");
        Ok(())
    }

    /// Enrich one source object.
    #[tracing::instrument(skip(self), fields(bucket = %source.bucket, key = %source.key))]
    pub async fn run(&self, source: &ObjectLocation) -> Result<EnrichOutcome> {
        let records = self.ingest(source).await?;
        let key = Self::extract_key(&records)?;
        let (well_name, candidates) = self.lookup(&key).await?;
        let enriched = Self::apply_well_name(records, &well_name, &key);
        let destination = source.with_bucket(self.options.output_bucket.as_str());
        self.emit(&enriched, &destination).await?;

        tracing::info!(
            destination = %destination,
            rows = enriched.num_rows(),
            well_name = %well_name,
            "enriched object"
        );
        Ok(EnrichOutcome {
            source: source.clone(),
            destination,
            rows: enriched.num_rows(),
            matched: !well_name.is_empty(),
            well_name,
            candidates,
        })
    }

    /// Enrich every source in order, stopping at the first failure.
    pub async fn run_all(&self, sources: &[ObjectLocation]) -> Result<Vec<EnrichOutcome>> {
        let mut outcomes = Vec::with_capacity(sources.len());
        for source in sources {
            match self.run(source).await {
                Ok(outcome) => outcomes.push(outcome),
                Err(e) => {
                    tracing::error!(source = %source, error = %e, "enrichment failed");
                    return Err(e);
                }
            }
        }
        Ok(outcomes)
    }
}

/// Reduce the store's candidates to one well name under `policy`.
pub fn select_well_name(candidates: Vec<String>, policy: DuplicatePolicy) -> Result<String> {
    let mut distinct: Vec<&str> = Vec::new();
    for c in &candidates {
        if !distinct.contains(&c.as_str()) {
            distinct.push(c.as_str());
        }
    }

    if distinct.len() > 1 {
        match policy {
            DuplicatePolicy::Last => {
                tracing::warn!(candidates = ?distinct, "reference store returned several well names; keeping the last");
            }
            DuplicatePolicy::Reject => {
                return Err(Error::AmbiguousWell {
                    candidates: distinct.iter().map(|s| s.to_string()).collect(),
                });
            }
        }
    }

    Ok(candidates.into_iter().last().unwrap_or_default())
}
