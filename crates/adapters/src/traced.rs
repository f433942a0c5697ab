// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced reader wrapper for consistent observability

use crate::reader::{SourceBatch, SourceDescriptor, SourceReader};
use async_trait::async_trait;
use cf_core::SourceError;
use std::time::Duration;
use tracing::Instrument;

/// Wrapper that adds tracing to any SourceReader
#[derive(Clone)]
pub struct TracedReader<R> {
    inner: R,
}

impl<R> TracedReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<R: SourceReader> SourceReader for TracedReader<R> {
    fn descriptor(&self) -> &SourceDescriptor {
        self.inner.descriptor()
    }

    fn timeout(&self) -> Duration {
        self.inner.timeout()
    }

    async fn read(&self) -> Result<SourceBatch, SourceError> {
        let d = self.inner.descriptor();
        async {
            tracing::debug!("starting");
            let start = std::time::Instant::now();
            let result = self.inner.read().await;
            let elapsed_ms = start.elapsed().as_millis() as u64;
            match &result {
                Ok(batch) => {
                    tracing::info!(
                        texts = batch.texts.len(),
                        skipped = batch.skipped.len(),
                        elapsed_ms,
                        "source read"
                    );
                    for skipped in &batch.skipped {
                        tracing::info!(path = %skipped.path, reason = %skipped.reason, "path skipped");
                    }
                }
                Err(e) => tracing::info!(elapsed_ms, error = %e, "source unavailable"),
            }
            result
        }
        .instrument(tracing::info_span!(
            "source.read",
            host = %d.host,
            source = %d.source,
            location = %d.location
        ))
        .await
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
