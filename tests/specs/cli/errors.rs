//! CLI error handling specs
//!
//! Verify error messages and exit codes for bad input.

use crate::prelude::*;

#[test]
fn unknown_subcommand_fails() {
    cli()
        .args(&["frobnicate"])
        .fails()
        .stderr_has("unrecognized subcommand");
}

#[test]
fn unknown_output_format_fails() {
    cli()
        .args(&["list", "-o", "yaml"])
        .fails()
        .stderr_has("invalid value 'yaml'");
}

#[test]
fn invalid_config_file_fails_before_reading_sources() {
    let host = Host::empty();
    host.config("[aggregation]\ninclude_root_crontab = \"maybe\"\n");

    let run = host.cronfleet().args(&["list"]).fails();

    assert_eq!(run.code(), Some(1));
    let run = run.stderr_has("Error: invalid config");
    assert!(run.stdout().is_empty());
}

#[test]
fn unknown_config_key_fails() {
    let host = Host::empty();
    host.config("[aggregation]\ninclude_everything = true\n");

    host.cronfleet()
        .args(&["sources"])
        .fails()
        .stderr_has("unknown field `include_everything`");
}
