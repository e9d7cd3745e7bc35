//! [`VectorStore`] implementation over the index data-plane API.

use crate::client::{Config, Pinecone};
use core::future::Future;
use quern_core::{Error, IndexRecord, Result, ScoredMatch, UpsertReport, VectorStore};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Upper bound on records per upsert request, per the index API limits.
const MAX_UPSERT_BATCH: usize = 100;

impl VectorStore for Pinecone {
    fn upsert(
        &self,
        records: Vec<IndexRecord>,
    ) -> impl Future<Output = Result<UpsertReport>> + Send {
        let cfg = self.config();
        async move { upsert_once(cfg, records).await }
    }

    fn query(
        &self,
        vector: &[f32],
        top_k: usize,
        include_metadata: bool,
    ) -> impl Future<Output = Result<Vec<ScoredMatch>>> + Send {
        let cfg = self.config();
        let vector = vector.to_vec();
        async move { query_once(cfg, vector, top_k, include_metadata).await }
    }
}

async fn upsert_once(cfg: Arc<Config>, records: Vec<IndexRecord>) -> Result<UpsertReport> {
    if records.is_empty() {
        return Ok(UpsertReport::default());
    }

    let mut report = UpsertReport::default();
    let mut accepted = Vec::with_capacity(records.len());
    for record in records {
        match cfg.dimension {
            Some(expected) if record.values.len() != expected => {
                tracing::warn!(
                    id = %record.id,
                    actual = record.values.len(),
                    expected,
                    "rejecting record with mismatched dimension"
                );
                report.failed.push(record.id);
            }
            _ => accepted.push(record),
        }
    }

    let mut first_error = None;
    for batch in accepted.chunks(MAX_UPSERT_BATCH) {
        match send_upsert(&cfg, batch).await {
            Ok(()) => report.upserted += batch.len(),
            Err(error) => {
                tracing::warn!(
                    batch_len = batch.len(),
                    error = %error,
                    "index rejected an upsert batch"
                );
                report
                    .failed
                    .extend(batch.iter().map(|record| record.id.clone()));
                if first_error.is_none() {
                    first_error = Some(error);
                }
            }
        }
    }

    match first_error {
        // Nothing was written, so surface the failure instead of a report
        // that only lists rejected ids.
        Some(error) if report.upserted == 0 => Err(error),
        _ => Ok(report),
    }
}

async fn send_upsert(cfg: &Config, batch: &[IndexRecord]) -> Result<()> {
    let endpoint = cfg.request_url("/vectors/upsert");
    let request = UpsertRequest {
        vectors: batch,
        namespace: cfg.namespace.as_deref(),
    };
    tracing::debug!(batch_len = batch.len(), endpoint = %endpoint, "upserting records");

    let response = cfg
        .http
        .post(&endpoint)
        .header("Api-Key", &cfg.api_key)
        .json(&request)
        .timeout(cfg.request_timeout)
        .send()
        .await
        .map_err(|err| Error::IndexUnavailable(err.into()))?;

    let status = response.status();
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(Error::IndexUnavailable(anyhow::anyhow!(
            "HTTP {status}: {message}"
        )));
    }
    Ok(())
}

async fn query_once(
    cfg: Arc<Config>,
    vector: Vec<f32>,
    top_k: usize,
    include_metadata: bool,
) -> Result<Vec<ScoredMatch>> {
    if let Some(expected) = cfg.dimension {
        if vector.len() != expected {
            return Err(Error::InvalidDimension {
                expected,
                actual: vector.len(),
            });
        }
    }

    let endpoint = cfg.request_url("/query");
    let request = QueryRequest {
        vector: &vector,
        top_k,
        include_metadata,
        namespace: cfg.namespace.as_deref(),
    };
    tracing::debug!(top_k, endpoint = %endpoint, "querying index");

    let response = cfg
        .http
        .post(&endpoint)
        .header("Api-Key", &cfg.api_key)
        .json(&request)
        .timeout(cfg.request_timeout)
        .send()
        .await
        .map_err(|err| Error::IndexUnavailable(err.into()))?;

    let status = response.status();
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(Error::IndexUnavailable(anyhow::anyhow!(
            "HTTP {status}: {message}"
        )));
    }

    let payload: QueryResponse = response
        .json()
        .await
        .map_err(|err| Error::MalformedResponse(err.to_string()))?;
    Ok(payload.matches)
}

#[derive(Debug, Serialize)]
struct UpsertRequest<'a> {
    vectors: &'a [IndexRecord],
    #[serde(skip_serializing_if = "Option::is_none")]
    namespace: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryRequest<'a> {
    vector: &'a [f32],
    top_k: usize,
    include_metadata: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    namespace: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    matches: Vec<ScoredMatch>,
}
