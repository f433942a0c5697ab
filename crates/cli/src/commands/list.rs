// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `cronfleet list`: aggregate every local source and print the jobs

use anyhow::Result;
use cf_adapters::local_readers;
use cf_core::{Clock, CronJob, SystemClock};
use cf_engine::{AggregateError, Aggregator, HostSources};
use clap::Args;
use std::io::{self, Write};

use crate::color;
use crate::config::{Settings, SourceFlags};
use crate::output::{self, OutputFormat};
use crate::table::{Column, Table};

#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    #[command(flatten)]
    pub sources: SourceFlags,
}

pub async fn handle(args: ListArgs, format: OutputFormat) -> Result<()> {
    let settings = Settings::load(&args.sources)?;
    let aggregator =
        Aggregator::new(SystemClock).with_host(HostSources::local(local_readers(&settings.layout)));
    run(&aggregator, &settings, format).await
}

pub(crate) async fn run<C: Clock>(
    aggregator: &Aggregator<C>,
    settings: &Settings,
    format: OutputFormat,
) -> Result<()> {
    let aggregation = match aggregator.aggregate(&settings.aggregation).await {
        Ok(aggregation) => aggregation,
        Err(err) => {
            if let AggregateError::TotalFailure { failures } = &err {
                output::print_diagnostics(failures)?;
            }
            return Err(err.into());
        }
    };

    match format {
        OutputFormat::Text => {
            let mut out = std::io::stdout().lock();
            write_jobs(&aggregation.jobs, &mut out, color::should_colorize())?;
            output::print_diagnostics(&aggregation.diagnostics)?;
        }
        OutputFormat::Json => output::print_json(&aggregation)?,
    }
    Ok(())
}

/// Job table, or a one-line notice when there is nothing to show.
pub(crate) fn write_jobs(
    jobs: &[CronJob],
    out: &mut impl Write,
    colorize: bool,
) -> io::Result<()> {
    if jobs.is_empty() {
        return writeln!(out, "No cron jobs found");
    }

    let mut table = Table::new(vec![
        Column::muted("ID"),
        Column::left("SOURCE"),
        Column::left("USER"),
        Column::left("SCHEDULE"),
        Column::left("NEXT RUN"),
        Column::left("COMMAND").with_max(80),
    ])
    .with_color(colorize);
    for job in jobs {
        let user = if job.owner_user.is_empty() {
            "-".to_string()
        } else {
            job.owner_user.clone()
        };
        table.row(vec![
            job.id.short(8).to_string(),
            job.source.to_string(),
            user,
            job.schedule_raw.clone(),
            output::format_next_run(job.next_run),
            job.command.clone(),
        ]);
    }
    table.render(out)
}

#[cfg(test)]
#[path = "list_tests.rs"]
mod tests;
