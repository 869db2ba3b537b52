mod handler;
mod logging;

use std::sync::Arc;

use anyhow::Context;
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use wellmerge_core::config::EnricherConfig;
use wellmerge_exec::{EnrichOptions, Enricher, S3Notification};
use wellmerge_io::build_storage_from_config;
use wellmerge_refdb::MySqlReferenceStore;

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config = EnricherConfig::from_env().context("invalid environment")?;
    logging::init(config.log_level);

    tracing::debug!(?config, "loaded config");

    // The connection outlives single invocations; failing here aborts startup.
    let reference = MySqlReferenceStore::connect(&config.db).await.map_err(|e| {
        tracing::error!(error = %e, "could not connect to reference store");
        e
    })?;
    tracing::info!("connection to reference store succeeded");

    let storage =
        build_storage_from_config(&config.storage).context("could not build object storage")?;

    let enricher = Arc::new(Enricher::new(
        storage,
        Arc::new(reference),
        EnrichOptions::from(&config),
    ));

    let func = service_fn(move |event: LambdaEvent<S3Notification>| {
        let enricher = Arc::clone(&enricher);
        async move { handler::handler(enricher, event).await }
    });

    run(func).await
}
