//! S3 `ObjectCreated` notification payload.
//!
//! Only the fields the enricher needs are modelled; everything else in the
//! notification is ignored.

use serde::Deserialize;
use wellmerge_core::error::{Error, Result};
use wellmerge_core::key::ObjectLocation;

#[derive(Debug, Clone, Deserialize)]
pub struct S3Notification {
    #[serde(rename = "Records", default)]
    pub records: Vec<S3NotificationRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct S3NotificationRecord {
    #[serde(rename = "eventName", default)]
    pub event_name: Option<String>,
    pub s3: S3Entity,
}

#[derive(Debug, Clone, Deserialize)]
pub struct S3Entity {
    pub bucket: S3Bucket,
    pub object: S3Object,
}

#[derive(Debug, Clone, Deserialize)]
pub struct S3Bucket {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct S3Object {
    /// URL-encoded object key, as S3 sends it.
    pub key: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
}

impl S3Notification {
    /// Every record's source object, in event order.
    pub fn source_locations(&self) -> Result<Vec<ObjectLocation>> {
        if self.records.is_empty() {
            return Err(Error::Event("notification has no records".into()));
        }
        self.records
            .iter()
            .enumerate()
            .map(|(idx, record)| {
                let bucket = record
                    .s3
                    .bucket
                    .name
                    .as_deref()
                    .filter(|b| !b.is_empty())
                    .ok_or_else(|| Error::Event(format!("record {idx} has no bucket name")))?;
                let raw_key = record
                    .s3
                    .object
                    .key
                    .as_deref()
                    .filter(|k| !k.is_empty())
                    .ok_or_else(|| Error::Event(format!("record {idx} has no object key")))?;
                Ok(ObjectLocation::new(bucket, decode_object_key(raw_key)?))
            })
            .collect()
    }
}

/// Undo the form encoding S3 applies to keys in notifications.
pub fn decode_object_key(raw: &str) -> Result<String> {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|k| k.into_owned())
        .map_err(|e| Error::Event(format!("object key '{raw}' is not valid UTF-8: {e}")))
}
