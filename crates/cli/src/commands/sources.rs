// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `cronfleet sources`: show which sources `list` would read

use anyhow::Result;
use cf_adapters::{local_readers, SourceReader};
use cf_core::{AggregationConfig, CronSource};
use clap::Args;
use serde::Serialize;
use std::io::{self, Write};
use std::sync::Arc;

use crate::color;
use crate::config::{Settings, SourceFlags};
use crate::output::{self, OutputFormat};
use crate::table::{Column, Table};

#[derive(Args, Debug, Clone, Default)]
pub struct SourcesArgs {
    #[command(flatten)]
    pub sources: SourceFlags,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceRow {
    pub host: String,
    pub source: CronSource,
    pub location: String,
    pub owner: String,
    pub enabled: bool,
}

pub fn handle(args: SourcesArgs, format: OutputFormat) -> Result<()> {
    let settings = Settings::load(&args.sources)?;
    let rows = source_rows(&local_readers(&settings.layout), &settings.aggregation);

    match format {
        OutputFormat::Text => {
            let mut out = std::io::stdout().lock();
            write_sources(&rows, &mut out, color::should_colorize())?;
        }
        OutputFormat::Json => output::print_json(&rows)?,
    }
    Ok(())
}

/// One row per configured reader.
pub(crate) fn source_rows(
    readers: &[Arc<dyn SourceReader>],
    config: &AggregationConfig,
) -> Vec<SourceRow> {
    readers
        .iter()
        .map(|r| {
            let d = r.descriptor();
            SourceRow {
                host: d.host.clone(),
                source: d.source,
                location: d.location.clone(),
                owner: d.owner.clone(),
                enabled: d.source != CronSource::RootCrontab || config.include_root_crontab,
            }
        })
        .collect()
}

pub(crate) fn write_sources(
    rows: &[SourceRow],
    out: &mut impl Write,
    colorize: bool,
) -> io::Result<()> {
    let mut table = Table::new(vec![
        Column::left("HOST"),
        Column::left("SOURCE"),
        Column::muted("LOCATION"),
        Column::status("STATUS"),
    ])
    .with_color(colorize);
    for row in rows {
        let status = match (row.enabled, row.source) {
            (true, _) => "enabled",
            (false, CronSource::RootCrontab) => "disabled (--include-root)",
            (false, _) => "disabled",
        };
        table.row(vec![
            row.host.clone(),
            row.source.to_string(),
            row.location.clone(),
            status.to_string(),
        ]);
    }
    table.render(out)
}

#[cfg(test)]
#[path = "sources_tests.rs"]
mod tests;
