//! Partial and total failure specs
//!
//! A source that cannot be read becomes a warning on stderr; only a run in
//! which every source fails is an error.

use crate::prelude::*;

#[test]
fn missing_user_crontab_is_a_warning() {
    let host = Host::empty();
    host.file("crontab", "0 4 * * * root /usr/bin/nightly\n");

    host.cronfleet()
        .args(&["list"])
        .passes()
        .stdout_has("/usr/bin/nightly")
        .stderr_has("warning: localhost: USER_CRONTAB")
        .stderr_has("no crontab for alice");
}

#[test]
fn malformed_line_is_skipped_with_location() {
    let host = Host::empty();
    host.file(
        "cron.d/mixed",
        "0 1 * * * root /usr/bin/first\n61 * * * * root /usr/bin/broken\n0 3 * * * root /usr/bin/third\n",
    );
    host.user_crontab("");
    let origin = host.etc_path("cron.d/mixed");

    host.cronfleet()
        .args(&["list"])
        .passes()
        .stdout_has("/usr/bin/first")
        .stdout_has("/usr/bin/third")
        .stdout_lacks("/usr/bin/broken")
        .stderr_has(&format!("warning: localhost: CRON_D {origin}:2:"));
}

#[test]
fn unreadable_cron_d_file_does_not_hide_siblings() {
    let host = Host::empty();
    host.file("cron.d/good", "0 1 * * * root /usr/bin/good\n");
    std::os::unix::fs::symlink(
        host.etc().join("does-not-exist"),
        host.etc().join("cron.d/dangling"),
    )
    .unwrap();
    host.user_crontab("");

    host.cronfleet()
        .args(&["list"])
        .passes()
        .stdout_has("/usr/bin/good")
        .stderr_has(&host.etc_path("cron.d/dangling"));
}

#[test]
fn every_source_failing_is_an_error() {
    let host = Host::empty();

    let run = host.cronfleet().args(&["list"]).fails();

    assert_eq!(run.code(), Some(1));
    run.stderr_has("warning: localhost: USER_CRONTAB")
        .stderr_has("warning: localhost: SYSTEM_CRONTAB")
        .stderr_has("Error: all 4 cron sources are unavailable");
}

#[test]
fn every_source_failing_is_an_error_in_json_too() {
    let host = Host::empty();

    let run = host.cronfleet().args(&["-o", "json", "list"]).fails();

    assert!(run.stdout().is_empty(), "stdout: {}", run.stdout());
    run.stderr_has("Error: all 4 cron sources are unavailable");
}

#[test]
fn disabled_root_does_not_count_as_a_source() {
    let host = Host::empty();
    host.root_crontab("0 0 * * * /root/bin/job\n");

    // Root is the only readable source but is not enabled
    host.cronfleet()
        .args(&["list", "--no-user-crontab"])
        .fails()
        .stderr_has("all 3 cron sources are unavailable");

    host.cronfleet()
        .args(&["list", "--no-user-crontab", "--include-root"])
        .passes()
        .stdout_has("/root/bin/job");
}
