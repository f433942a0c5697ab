//! Help and version output specs

use crate::prelude::*;

#[test]
fn no_subcommand_prints_help() {
    cli()
        .passes()
        .stdout_has("Usage: cronfleet")
        .stdout_has("list")
        .stdout_has("sources");
}

#[test]
fn version_flag_prints_version() {
    cli()
        .args(&["--version"])
        .passes()
        .stdout_eq(&format!("cronfleet {}\n", env!("CARGO_PKG_VERSION")));
}

#[test]
fn list_help_shows_source_flags() {
    cli()
        .args(&["list", "--help"])
        .passes()
        .stdout_has("--include-root")
        .stdout_has("--include-run-parts")
        .stdout_has("--etc-dir")
        .stdout_has("--no-user-crontab")
        .stdout_has("--output");
}
