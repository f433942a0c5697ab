//! `cronfleet list` source coverage specs
//!
//! Every local source contributes jobs; root's crontab only on request.

use crate::prelude::*;

const SYSTEM_CRONTAB: &str = "\
SHELL=/bin/sh
PATH=/usr/local/sbin:/usr/local/bin:/sbin:/bin:/usr/sbin:/usr/bin

17 *\t* * *\troot    cd / && /usr/bin/system-sweep
";

fn populated() -> Host {
    let host = Host::empty();
    host.file("crontab", SYSTEM_CRONTAB);
    host.file("cron.d/certbot", "0 */12 * * * root certbot -q renew\n");
    host.file("cron.d/.placeholder", "* * * * * root /never/listed\n");
    host.file("cron.d/certbot.dpkg-old", "* * * * * root /never/listed\n");
    host.user_crontab("# m h dom mon dow command\n30 2 * * 1 /home/alice/bin/backup.sh\n");
    host.root_crontab("@reboot /root/bin/on-boot\n");
    host
}

#[test]
fn lists_jobs_from_every_unprivileged_source() {
    let host = populated();

    host.cronfleet()
        .args(&["list"])
        .passes()
        .stdout_has("USER_CRONTAB")
        .stdout_has("/home/alice/bin/backup.sh")
        .stdout_has("SYSTEM_CRONTAB")
        .stdout_has("cd / && /usr/bin/system-sweep")
        .stdout_has("CRON_D")
        .stdout_has("certbot -q renew")
        .stdout_lacks("/never/listed")
        .stdout_lacks("ROOT_CRONTAB");
}

#[test]
fn root_crontab_is_opt_in() {
    let host = populated();

    host.cronfleet()
        .args(&["list"])
        .passes()
        .stdout_lacks("/root/bin/on-boot");

    host.cronfleet()
        .args(&["list", "--include-root"])
        .passes()
        .stdout_has("ROOT_CRONTAB")
        .stdout_has("/root/bin/on-boot");
}

#[test]
fn root_crontab_env_switch() {
    let host = populated();

    host.cronfleet()
        .env("CRONFLEET_INCLUDE_ROOT_CRONTAB", "1")
        .args(&["list"])
        .passes()
        .stdout_has("/root/bin/on-boot");
}

#[test]
fn root_crontab_config_switch() {
    let host = populated();
    host.config("[aggregation]\ninclude_root_crontab = true\n");

    host.cronfleet()
        .args(&["list"])
        .passes()
        .stdout_has("/root/bin/on-boot");
}

#[test]
fn env_switch_overrides_config() {
    let host = populated();
    host.config("[aggregation]\ninclude_root_crontab = true\n");

    host.cronfleet()
        .env("CRONFLEET_INCLUDE_ROOT_CRONTAB", "0")
        .args(&["list"])
        .passes()
        .stdout_lacks("/root/bin/on-boot");
}

#[test]
fn no_user_crontab_skips_the_listing() {
    let host = populated();

    host.cronfleet()
        .args(&["list", "--no-user-crontab"])
        .passes()
        .stdout_lacks("USER_CRONTAB")
        .stdout_has("certbot -q renew");
}

#[test]
fn user_crontab_is_read_without_user_or_logname() {
    let host = Host::empty();
    host.user_crontab("30 2 * * 1 /home/alice/bin/backup.sh\n");

    let out = host
        .cronfleet()
        .env_unset("USER")
        .args(&["list", "-o", "json"])
        .passes()
        .json();
    let jobs = out["jobs"].as_array().unwrap();

    assert_eq!(jobs.len(), 1, "{out}");
    assert_eq!(jobs[0]["source"], "USER_CRONTAB");
    assert_eq!(jobs[0]["command"], "/home/alice/bin/backup.sh");
    assert_eq!(jobs[0]["owner_user"], "");
}

#[test]
fn etc_dir_flag_overrides_env() {
    let host = populated();
    let other = Host::empty();
    other.file("crontab", "0 5 * * * root /opt/other-host-job\n");

    host.cronfleet()
        .args(&["list", "--etc-dir", &other.etc().to_string_lossy()])
        .passes()
        .stdout_has("/opt/other-host-job")
        .stdout_lacks("certbot -q renew");
}

#[test]
fn empty_user_crontab_lists_nothing() {
    let host = Host::empty();
    host.user_crontab("");

    host.cronfleet()
        .args(&["list"])
        .passes()
        .stdout_eq("No cron jobs found\n");
}
