//! run-parts handling specs
//!
//! By default the scripts in `cron.<period>` are listed and the crontab lines
//! that invoke `run-parts` on them are hidden; `--include-run-parts` flips it.

use crate::prelude::*;

fn anacron_host() -> Host {
    let host = Host::empty();
    host.file("cron.d/0hourly", "01 * * * * root run-parts /etc/cron.hourly\n");
    host.script("cron.hourly/snapper");
    host.user_crontab("");
    host
}

#[test]
fn scripts_replace_run_parts_lines_by_default() {
    let host = anacron_host();

    let run = host.cronfleet().args(&["-o", "json", "list"]).passes();
    let jobs = run.json()["jobs"].as_array().unwrap().clone();

    assert_eq!(jobs.len(), 1, "{jobs:?}");
    assert_eq!(jobs[0]["source"], "RUN_PARTS");
    assert_eq!(jobs[0]["schedule_raw"], "@hourly");
    assert_eq!(jobs[0]["schedule_kind"], "RUN_PARTS_IMPLICIT");
    assert_eq!(jobs[0]["owner_user"], "root");
    assert_eq!(jobs[0]["command"], host.etc_path("cron.hourly/snapper"));
}

#[test]
fn include_run_parts_keeps_the_line_instead() {
    let host = anacron_host();

    let run = host
        .cronfleet()
        .args(&["-o", "json", "list", "--include-run-parts"])
        .passes();
    let jobs = run.json()["jobs"].as_array().unwrap().clone();

    assert_eq!(jobs.len(), 1, "{jobs:?}");
    assert_eq!(jobs[0]["source"], "CRON_D");
    assert_eq!(jobs[0]["command"], "run-parts /etc/cron.hourly");
    assert_eq!(jobs[0]["origin_path"], host.etc_path("cron.d/0hourly"));
}

#[test]
fn non_executable_files_are_not_scripts() {
    let host = Host::empty();
    host.script("cron.daily/logrotate");
    host.file("cron.daily/README", "not a script\n");
    host.script("cron.daily/.hidden");

    host.cronfleet()
        .args(&["list"])
        .passes()
        .stdout_has("cron.daily/logrotate")
        .stdout_lacks("README")
        .stdout_lacks(".hidden");
}

#[test]
fn explicit_line_absorbs_matching_script() {
    let host = Host::empty();
    let script = host.etc_path("cron.daily/logrotate");
    host.script("cron.daily/logrotate");
    host.file("cron.d/logrotate", &format!("@daily root {script}\n"));
    host.user_crontab("");

    let run = host.cronfleet().args(&["-o", "json", "list"]).passes();
    let jobs = run.json()["jobs"].as_array().unwrap().clone();

    assert_eq!(jobs.len(), 1, "{jobs:?}");
    assert_eq!(jobs[0]["source"], "CRON_D");
    assert_eq!(jobs[0]["merged_from"], serde_json::json!([script]));
}

#[test]
fn run_parts_on_unread_directory_is_always_a_job() {
    let host = Host::empty();
    host.file("cron.d/backup", "0 4 * * * root run-parts /opt/backup/cron.daily\n");
    host.script("cron.daily/logrotate");
    host.user_crontab("");

    for flags in [&["list"][..], &["list", "--include-run-parts"][..]] {
        host.cronfleet()
            .args(flags)
            .passes()
            .stdout_has("run-parts /opt/backup/cron.daily")
            .stdout_has("cron.daily/logrotate");
    }
}

#[test]
fn logged_mention_of_run_parts_is_not_an_aggregator() {
    let host = Host::empty();
    host.file(
        "cron.d/notice",
        "0 6 * * * root logger about to run-parts /etc/cron.daily\n",
    );
    host.script("cron.daily/logrotate");
    host.user_crontab("");

    host.cronfleet()
        .args(&["list"])
        .passes()
        .stdout_has("logger about to run-parts /etc/cron.daily")
        .stdout_has("cron.daily/logrotate");
}
