//! `cronfleet list -o json` specs
//!
//! JSON output is the whole aggregation: jobs plus diagnostics.

use crate::prelude::*;
use serde_json::Value;

fn host() -> Host {
    let host = Host::empty();
    host.file("crontab", "0 4 * * * root /usr/bin/nightly\n@reboot root /usr/bin/on-boot\n");
    host.file("cron.d/broken", "not a cron line\n");
    host
}

fn list_json(host: &Host) -> Value {
    host.cronfleet().args(&["-o", "json", "list"]).passes().json()
}

#[test]
fn jobs_carry_provenance_and_schedule() {
    let host = host();
    let out = list_json(&host);
    let jobs = out["jobs"].as_array().unwrap();

    assert_eq!(jobs.len(), 2, "{jobs:?}");
    let nightly = &jobs[0];
    assert_eq!(nightly["host"], "localhost");
    assert_eq!(nightly["source"], "SYSTEM_CRONTAB");
    assert_eq!(nightly["owner_user"], "root");
    assert_eq!(nightly["schedule_raw"], "0 4 * * *");
    assert_eq!(nightly["schedule_kind"], "FIVE_FIELD");
    assert_eq!(nightly["command"], "/usr/bin/nightly");
    assert_eq!(nightly["origin_path"], host.etc_path("crontab"));
    assert_eq!(nightly["line"], 1);
    assert!(nightly["next_run"].is_string(), "{nightly}");
    assert_eq!(nightly["id"].as_str().unwrap().len(), 16);

    let reboot = &jobs[1];
    assert_eq!(reboot["schedule_kind"], "NAMED");
    assert!(reboot["next_run"].is_null());
}

#[test]
fn diagnostics_are_part_of_the_document() {
    let host = host();
    let out = list_json(&host);
    let diagnostics = out["diagnostics"].as_array().unwrap();

    let kinds: Vec<&str> = diagnostics
        .iter()
        .map(|d| d["kind"].as_str().unwrap())
        .collect();
    assert_eq!(kinds, vec!["source_unavailable", "source_unavailable", "parse_warning"]);

    let user = &diagnostics[0];
    assert_eq!(user["source"], "USER_CRONTAB");
    assert_eq!(user["reason"]["type"], "command_failed");
    assert_eq!(user["reason"]["stderr"], "no crontab for alice");

    let run_parts = &diagnostics[1];
    assert_eq!(run_parts["source"], "RUN_PARTS");
    assert_eq!(run_parts["reason"]["type"], "missing");

    let warning = &diagnostics[2];
    assert_eq!(warning["origin_path"], host.etc_path("cron.d/broken"));
    assert_eq!(warning["line"], 1);
    assert_eq!(warning["text"], "not a cron line");
}

#[test]
fn json_mode_keeps_stderr_quiet() {
    let host = host();

    host.cronfleet()
        .args(&["-o", "json", "list"])
        .passes()
        .stderr_lacks("warning:");
}

#[test]
fn ids_are_stable_across_runs() {
    let host = host();

    let ids = |v: Value| -> Vec<String> {
        v["jobs"]
            .as_array()
            .unwrap()
            .iter()
            .map(|j| j["id"].as_str().unwrap().to_string())
            .collect()
    };
    let first = ids(list_json(&host));
    let second = ids(list_json(&host));

    assert_eq!(first, second);
    assert_ne!(first[0], first[1]);
}
