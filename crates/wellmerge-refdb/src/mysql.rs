//! MySQL reference store backed by a single pooled `sqlx` connection.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};
use sqlx::{MySql, QueryBuilder, Row};
use wellmerge_core::config::{DbConfig, MatchMode};
use wellmerge_core::error::{Error, Result};
use wellmerge_core::key::LookupKey;

use crate::pattern::contains_pattern;
use crate::ReferenceStore;

/// Reference store reading from `DbConfig::table`.
///
/// The pool holds one connection for the life of the process and checks it
/// before every lease, so a connection dropped between invocations is
/// replaced instead of failing the next lookup.
#[derive(Clone)]
pub struct MySqlReferenceStore {
    pool: MySqlPool,
    table: String,
    query_timeout: Duration,
}

impl MySqlReferenceStore {
    #[tracing::instrument(skip(cfg), fields(host = %cfg.host, database = %cfg.database))]
    pub async fn connect(cfg: &DbConfig) -> Result<Self> {
        let options = MySqlConnectOptions::new()
            .host(&cfg.host)
            .port(cfg.port)
            .username(&cfg.user)
            .password(&cfg.password)
            .database(&cfg.database);

        let pool = MySqlPoolOptions::new()
            .min_connections(1)
            .max_connections(1) // one invocation at a time per process
            .acquire_timeout(cfg.connect_timeout)
            .test_before_acquire(true)
            .connect_with(options)
            .await
            .map_err(|e| Error::Connection(e.to_string()))?;

        tracing::info!("connected to reference store");
        Ok(Self::from_pool(pool, cfg.table.clone(), cfg.query_timeout))
    }

    pub fn from_pool(pool: MySqlPool, table: String, query_timeout: Duration) -> Self {
        Self {
            pool,
            table,
            query_timeout,
        }
    }
}

/// Build the lookup query. Names and the date are bound parameters; only the
/// validated table name is part of the SQL text.
pub fn build_lookup_query<'a>(
    table: &str,
    key: &'a LookupKey,
    mode: MatchMode,
) -> QueryBuilder<'a, MySql> {
    let mut qb = QueryBuilder::new("SELECT well_name FROM ");
    qb.push(table);
    match mode {
        MatchMode::Contains => {
            qb.push(" WHERE client_name LIKE ");
            qb.push_bind(contains_pattern(&key.client_name));
            qb.push(" AND rig_name LIKE ");
            qb.push_bind(contains_pattern(&key.rig_name));
        }
        MatchMode::Exact => {
            qb.push(" WHERE client_name = ");
            qb.push_bind(key.client_name.as_str());
            qb.push(" AND rig_name = ");
            qb.push_bind(key.rig_name.as_str());
        }
    }
    qb.push(" AND job_date = ");
    qb.push_bind(key.job_date);
    qb
}

fn map_sqlx_error(err: sqlx::Error) -> Error {
    match err {
        sqlx::Error::Io(_) | sqlx::Error::Tls(_) | sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
            Error::Connection(err.to_string())
        }
        other => Error::Query(other.to_string()),
    }
}

#[async_trait]
impl ReferenceStore for MySqlReferenceStore {
    #[tracing::instrument(skip(self), fields(table = %self.table))]
    async fn well_names(&self, key: &LookupKey, mode: MatchMode) -> Result<Vec<String>> {
        let mut qb = build_lookup_query(&self.table, key, mode);
        tracing::debug!(sql = qb.sql(), "querying reference store");

        let rows = tokio::time::timeout(self.query_timeout, qb.build().fetch_all(&self.pool))
            .await
            .map_err(|_| {
                Error::Query(format!(
                    "lookup timed out after {}s",
                    self.query_timeout.as_secs()
                ))
            })?
            .map_err(map_sqlx_error)?;

        let mut names = Vec::with_capacity(rows.len());
        for row in &rows {
            let name: Option<String> = row
                .try_get(0)
                .map_err(|e| Error::Query(format!("decode well_name: {e}")))?;
            tracing::debug!(well_name = ?name, "fetched reference row");
            names.push(name.unwrap_or_default());
        }
        tracing::debug!(rows = names.len(), "lookup finished");
        Ok(names)
    }
}
