use std::sync::Arc;

use lambda_runtime::{Error, LambdaEvent};
use wellmerge_core::error::Error as EnrichError;
use wellmerge_exec::{EnrichOutcome, Enricher, S3Notification};

#[tracing::instrument(skip(enricher, event), fields(req_id = %event.context.request_id))]
pub async fn handler(
    enricher: Arc<Enricher>,
    event: LambdaEvent<S3Notification>,
) -> Result<Vec<EnrichOutcome>, Error> {
    for record in &event.payload.records {
        tracing::debug!(
            event_name = record.event_name.as_deref().unwrap_or("unknown"),
            bucket = ?record.s3.bucket.name,
            key = ?record.s3.object.key,
            size = ?record.s3.object.size,
            "received notification record"
        );
    }

    let sources = event
        .payload
        .source_locations()
        .map_err(|e| report(e, "unusable notification"))?;

    let outcomes = enricher
        .run_all(&sources)
        .await
        .map_err(|e| report(e, "notification failed"))?;
    tracing::info!(files = outcomes.len(), "notification processed");
    Ok(outcomes)
}

fn report(err: EnrichError, context: &str) -> Error {
    tracing::error!(error = %err, error_kind = error_kind(&err), "{}", context);
    err.into()
}

/// `input` failures repeat on retry; `infrastructure` ones may not.
pub fn error_kind(err: &EnrichError) -> &'static str {
    if err.is_input_error() {
        "input"
    } else {
        "infrastructure"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_separates_bad_input_from_outages() {
        assert_eq!(error_kind(&EnrichError::BlankValue("client_name".into())), "input");
        assert_eq!(error_kind(&EnrichError::Event("no records".into())), "input");
        assert_eq!(error_kind(&EnrichError::Connection("refused".into())), "infrastructure");
        assert_eq!(error_kind(&EnrichError::Write("denied".into())), "infrastructure");
    }
}
