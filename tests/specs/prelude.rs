//! Test helpers for behavioral specifications.
//!
//! Provides a high-level DSL for running cronfleet against a throwaway
//! cron layout.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, dead_code)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

// Tight timeouts keep failure specs fast.
const FILE_TIMEOUT_MS: &str = "500";
const CRONTAB_TIMEOUT_MS: &str = "2000";

/// Stands in for `crontab -l [-u USER]`; listings live next to the script.
/// Like the real one it needs no `$USER`: without it the caller is alice.
const FAKE_CRONTAB: &str = r#"#!/bin/sh
dir="$(dirname "$0")"
if [ "$2" = "-u" ]; then
    who="$3"
else
    who="${USER:-alice}"
fi
if [ -f "$dir/crontab.$who" ]; then
    cat "$dir/crontab.$who"
else
    echo "no crontab for $who" >&2
    exit 1
fi
"#;

/// Stands in for `sudo -n ...`: drops `-n` and runs the rest.
const FAKE_SUDO: &str = r#"#!/bin/sh
[ "$1" = "-n" ] && shift
exec "$@"
"#;

/// The user every spec runs as.
pub const SPEC_USER: &str = "alice";

/// Returns the path to the cronfleet binary, checking the llvm-cov target
/// directory first and falling back to assert_cmd's lookup.
fn cronfleet_binary() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));

    let llvm_cov_path = manifest_dir.join("target/llvm-cov-target/debug/cronfleet");
    if llvm_cov_path.exists() {
        return llvm_cov_path;
    }

    let standard = manifest_dir.join("target/debug/cronfleet");
    if standard.exists() {
        return standard;
    }

    assert_cmd::cargo::cargo_bin("cronfleet")
}

/// High-level CLI builder for fluent test assertions
pub struct CliBuilder {
    args: Vec<String>,
    envs: Vec<(String, String)>,
    unset: Vec<String>,
}

impl CliBuilder {
    fn new() -> Self {
        Self {
            args: Vec::new(),
            envs: vec![
                ("CRONFLEET_FILE_TIMEOUT_MS".into(), FILE_TIMEOUT_MS.into()),
                ("CRONFLEET_CRONTAB_TIMEOUT_MS".into(), CRONTAB_TIMEOUT_MS.into()),
                ("USER".into(), SPEC_USER.into()),
                ("NO_COLOR".into(), "1".into()),
            ],
            unset: Vec::new(),
        }
    }

    /// Add CLI arguments
    pub fn args(mut self, args: &[&str]) -> Self {
        self.args.extend(args.iter().map(|s| s.to_string()));
        self
    }

    /// Set environment variable
    pub fn env(mut self, key: &str, value: impl AsRef<Path>) -> Self {
        self.envs.push((
            key.to_string(),
            value.as_ref().to_string_lossy().to_string(),
        ));
        self
    }

    /// Run without `key` in the environment
    pub fn env_unset(mut self, key: &str) -> Self {
        self.envs.retain(|(k, _)| k != key);
        self.unset.push(key.to_string());
        self
    }

    /// Build the command without running it
    pub fn command(self) -> Command {
        let mut cmd = Command::new(cronfleet_binary());
        cmd.args(&self.args);

        // Keep the caller's settings out of the specs
        for key in [
            "RUST_LOG",
            "COLOR",
            "LOGNAME",
            "XDG_CONFIG_HOME",
            "CRONFLEET_INCLUDE_ROOT_CRONTAB",
            "CRONFLEET_INCLUDE_RUN_PARTS",
        ] {
            cmd.env_remove(key);
        }
        for key in &self.unset {
            cmd.env_remove(key);
        }

        for (key, value) in self.envs {
            cmd.env(key, value);
        }

        cmd
    }

    /// Run and expect success (exit code 0)
    pub fn passes(self) -> RunAssert {
        let output = self.command().output().expect("command should run");
        assert!(
            output.status.success(),
            "expected command to pass, got exit code {:?}\nstdout: {}\nstderr: {}",
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        RunAssert { output }
    }

    /// Run and expect failure (non-zero exit code)
    pub fn fails(self) -> RunAssert {
        let output = self.command().output().expect("command should run");
        assert!(
            !output.status.success(),
            "expected command to fail, but it passed\nstdout: {}\nstderr: {}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        RunAssert { output }
    }
}

/// Result of a CLI run for chaining assertions
pub struct RunAssert {
    output: Output,
}

impl RunAssert {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    pub fn code(&self) -> Option<i32> {
        self.output.status.code()
    }

    /// Parse stdout as JSON.
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.output.stdout)
            .unwrap_or_else(|e| panic!("stdout is not JSON ({e}): {}", self.stdout()))
    }

    /// Assert stdout equals expected exactly (with diff on failure).
    pub fn stdout_eq(self, expected: &str) -> Self {
        similar_asserts::assert_eq!(self.stdout(), expected);
        self
    }

    /// Assert stderr equals expected exactly (with diff on failure).
    pub fn stderr_eq(self, expected: &str) -> Self {
        similar_asserts::assert_eq!(self.stderr(), expected);
        self
    }

    pub fn stdout_has(self, expected: &str) -> Self {
        let stdout = self.stdout();
        assert!(
            stdout.contains(expected),
            "stdout does not contain '{}'\nstdout: {}",
            expected,
            stdout
        );
        self
    }

    pub fn stdout_lacks(self, unexpected: &str) -> Self {
        let stdout = self.stdout();
        assert!(
            !stdout.contains(unexpected),
            "stdout should not contain '{}'\nstdout: {}",
            unexpected,
            stdout
        );
        self
    }

    pub fn stderr_has(self, expected: &str) -> Self {
        let stderr = self.stderr();
        assert!(
            stderr.contains(expected),
            "stderr does not contain '{}'\nstderr: {}",
            expected,
            stderr
        );
        self
    }

    pub fn stderr_lacks(self, unexpected: &str) -> Self {
        let stderr = self.stderr();
        assert!(
            !stderr.contains(unexpected),
            "stderr should not contain '{}'\nstderr: {}",
            unexpected,
            stderr
        );
        self
    }
}

// =============================================================================
// Host fixture
// =============================================================================

/// A throwaway `/etc` cron layout plus fake `crontab` and `sudo` binaries.
pub struct Host {
    dir: tempfile::TempDir,
}

impl Host {
    /// An empty layout: no crontab files, no listings.
    pub fn empty() -> Self {
        let host = Self {
            dir: tempfile::tempdir().unwrap(),
        };
        std::fs::create_dir_all(host.etc()).unwrap();
        host.executable(&host.bin().join("crontab"), FAKE_CRONTAB);
        host.executable(&host.bin().join("sudo"), FAKE_SUDO);
        host
    }

    pub fn etc(&self) -> PathBuf {
        self.dir.path().join("etc")
    }

    fn bin(&self) -> PathBuf {
        self.dir.path().join("bin")
    }

    /// Absolute path of `rel` inside the fake `/etc`.
    pub fn etc_path(&self, rel: &str) -> String {
        self.etc().join(rel).to_string_lossy().into_owned()
    }

    /// Write a file under the fake `/etc` (parent directories created automatically)
    pub fn file(&self, rel: &str, content: &str) {
        let path = self.etc().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }

    /// Write an executable script under the fake `/etc`
    pub fn script(&self, rel: &str) {
        self.executable(&self.etc().join(rel), "#!/bin/sh\nexit 0\n");
    }

    /// What `crontab -l` prints for the spec user
    pub fn user_crontab(&self, content: &str) {
        std::fs::write(self.bin().join(format!("crontab.{SPEC_USER}")), content).unwrap();
    }

    /// What `crontab -l -u root` prints
    pub fn root_crontab(&self, content: &str) {
        std::fs::write(self.bin().join("crontab.root"), content).unwrap();
    }

    /// Write `config.toml` for this host
    pub fn config(&self, content: &str) {
        std::fs::write(self.config_path(), content).unwrap();
    }

    fn config_path(&self) -> PathBuf {
        self.dir.path().join("config.toml")
    }

    fn executable(&self, path: &Path, content: &str) {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).unwrap();
    }

    /// Run cronfleet against this host
    pub fn cronfleet(&self) -> CliBuilder {
        CliBuilder::new()
            .env("CRONFLEET_ETC_DIR", self.etc())
            .env("CRONFLEET_CRONTAB_BIN", self.bin().join("crontab"))
            .env("CRONFLEET_SUDO_BIN", self.bin().join("sudo"))
            .env("CRONFLEET_CONFIG", self.config_path())
    }
}

/// `cronfleet` with no host fixture (help, argument errors).
pub fn cli() -> CliBuilder {
    CliBuilder::new()
}
