// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Aggregation orchestrator: read every source concurrently, then parse,
//! filter, merge and normalize in a deterministic order.

use crate::dedup::dedup;
use crate::error::AggregateError;
use crate::filter::{apply_policy, ListedDirs};
use crate::normalize::normalize;
use cf_adapters::{SourceBatch, SourceReader};
use cf_core::{
    AggregationConfig, Clock, CronJob, CronSource, Diagnostic, SourceError, LOCAL_HOST,
};
use cf_crontab::{parse_source, TextOrigin};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::Instrument;

/// The readers configured for one host.
#[derive(Clone)]
pub struct HostSources {
    pub host: String,
    pub readers: Vec<Arc<dyn SourceReader>>,
}

impl HostSources {
    pub fn new(host: impl Into<String>, readers: Vec<Arc<dyn SourceReader>>) -> Self {
        Self {
            host: host.into(),
            readers,
        }
    }

    pub fn local(readers: Vec<Arc<dyn SourceReader>>) -> Self {
        Self::new(LOCAL_HOST, readers)
    }
}

/// Result of one aggregation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aggregation {
    pub jobs: Vec<CronJob>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Runs aggregation passes over a fixed set of hosts and readers.
pub struct Aggregator<C: Clock> {
    clock: C,
    hosts: Vec<HostSources>,
}

type ReadOutcome = Result<SourceBatch, SourceError>;

impl<C: Clock> Aggregator<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            hosts: Vec::new(),
        }
    }

    pub fn with_host(mut self, host: HostSources) -> Self {
        self.hosts.push(host);
        self
    }

    /// Readers that run under `config`, in registration order.
    pub fn eligible_readers(&self, config: &AggregationConfig) -> Vec<Arc<dyn SourceReader>> {
        self.hosts
            .iter()
            .flat_map(|h| h.readers.iter())
            .filter(|r| {
                config.include_root_crontab || r.descriptor().source != CronSource::RootCrontab
            })
            .cloned()
            .collect()
    }

    /// Read all eligible sources and build the job list.
    ///
    /// Source failures are reported as diagnostics; only a pass in which
    /// every source failed is an error. Dropping the returned future aborts
    /// the outstanding reads.
    pub async fn aggregate(&self, config: &AggregationConfig) -> Result<Aggregation, AggregateError> {
        let readers = self.eligible_readers(config);
        if readers.is_empty() {
            return Err(AggregateError::NoSources);
        }

        async {
            let outcomes = read_all(&readers).await;

            let mut failures = Vec::new();
            let mut skipped = Vec::new();
            let mut warnings = Vec::new();
            let mut entries = Vec::new();
            let mut listed = ListedDirs::default();
            let mut succeeded = 0usize;

            for (reader, outcome) in readers.iter().zip(outcomes) {
                let d = reader.descriptor();
                let batch = match outcome {
                    Ok(batch) => batch,
                    Err(reason) => {
                        failures.push(Diagnostic::SourceUnavailable {
                            host: d.host.clone(),
                            source: d.source,
                            origin_path: d.location.clone(),
                            reason,
                        });
                        continue;
                    }
                };
                succeeded += 1;

                for dir in &batch.listed_dirs {
                    listed.insert(&d.host, dir);
                }
                for path in batch.skipped {
                    skipped.push(Diagnostic::SourceUnavailable {
                        host: d.host.clone(),
                        source: d.source,
                        origin_path: path.path,
                        reason: path.reason,
                    });
                }
                for text in &batch.texts {
                    let origin = TextOrigin {
                        source: d.source,
                        host: &d.host,
                        owner: &d.owner,
                        path: &text.origin_path,
                    };
                    let parsed = parse_source(origin, &text.text);
                    entries.extend(parsed.entries);
                    warnings.extend(parsed.warnings);
                }
            }

            if succeeded == 0 {
                tracing::info!(sources = failures.len(), "every cron source failed");
                return Err(AggregateError::TotalFailure { failures });
            }

            let raw = entries.len();
            let kept = apply_policy(entries, config, &listed);
            let filtered = raw - kept.len();
            let merged = dedup(kept);
            let jobs = normalize(merged, self.clock.now());

            let mut diagnostics = failures;
            diagnostics.extend(skipped);
            diagnostics.extend(warnings);

            tracing::info!(
                sources = readers.len(),
                succeeded,
                raw,
                filtered,
                jobs = jobs.len(),
                diagnostics = diagnostics.len(),
                "aggregation complete"
            );
            Ok(Aggregation { jobs, diagnostics })
        }
        .instrument(tracing::info_span!(
            "aggregate",
            root = config.include_root_crontab,
            run_parts = config.include_run_parts_aggregators
        ))
        .await
    }
}

/// Run every reader concurrently under its own timeout.
///
/// Outcomes come back in reader order. A task that panicked leaves no
/// outcome and is reported as an I/O failure of its source.
async fn read_all(readers: &[Arc<dyn SourceReader>]) -> Vec<ReadOutcome> {
    let mut set = JoinSet::new();
    for (slot, reader) in readers.iter().enumerate() {
        let reader = Arc::clone(reader);
        set.spawn(async move {
            let timeout = reader.timeout();
            let outcome = match tokio::time::timeout(timeout, reader.read()).await {
                Ok(outcome) => outcome,
                Err(_elapsed) => Err(SourceError::TimedOut {
                    after_ms: timeout.as_millis() as u64,
                }),
            };
            (slot, outcome)
        });
    }

    let mut outcomes: Vec<Option<ReadOutcome>> = vec![None; readers.len()];
    while let Some(joined) = set.join_next().await {
        match joined {
            Ok((slot, outcome)) => outcomes[slot] = Some(outcome),
            Err(e) => tracing::error!(error = %e, "source reader task failed"),
        }
    }

    outcomes
        .into_iter()
        .map(|o| {
            o.unwrap_or_else(|| {
                Err(SourceError::Io {
                    message: "reader task panicked".to_string(),
                })
            })
        })
        .collect()
}

#[cfg(test)]
#[path = "aggregate_tests.rs"]
mod tests;
