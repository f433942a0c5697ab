//! `cronfleet sources` specs

use crate::prelude::*;

#[test]
fn lists_every_local_source_in_read_order() {
    let host = Host::empty();

    let run = host.cronfleet().args(&["sources"]).passes();
    let stdout = run.stdout();
    let lines: Vec<&str> = stdout.lines().collect();

    assert_eq!(lines.len(), 6, "{stdout}");
    assert!(lines[0].starts_with("HOST"));
    assert!(lines[1].contains("USER_CRONTAB"));
    assert!(lines[2].contains("ROOT_CRONTAB"));
    assert!(lines[2].ends_with("disabled (--include-root)"));
    assert!(lines[3].contains(&host.etc_path("crontab")));
    assert!(lines[4].contains(&host.etc_path("cron.d")));
    assert!(lines[5].contains("RUN_PARTS"));
}

#[test]
fn json_reports_enabled_flags() {
    let host = Host::empty();

    let out = host
        .cronfleet()
        .args(&["sources", "--include-root", "--no-user-crontab", "-o", "json"])
        .passes()
        .json();
    let rows = out.as_array().unwrap();

    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0]["source"], "ROOT_CRONTAB");
    assert_eq!(rows[0]["owner"], "root");
    assert!(rows.iter().all(|r| r["enabled"] == true));
}

#[test]
fn sources_does_not_read_anything() {
    // Nothing exists on this host, yet listing sources succeeds
    let host = Host::empty();

    host.cronfleet()
        .args(&["sources"])
        .passes()
        .stderr_lacks("warning:");
}
