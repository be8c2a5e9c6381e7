//! CLI integration tests
//!
//! Only paths that never reach `next`/`wrangler` are exercised here:
//! argument errors, config validation and fully skipped builds.

use assert_cmd::Command;
use predicates::str::contains;
use std::fs;

fn ocf() -> Command {
    let mut cmd = Command::cargo_bin("ocf").unwrap();
    cmd.env_remove("SKIP_NEXT_APP_BUILD")
        .env_remove("SKIP_WRANGLER_CONFIG_CHECK")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn no_command_fails() {
    let temp = tempfile::tempdir().unwrap();
    ocf()
        .current_dir(&temp)
        .assert()
        .failure()
        .stderr(contains("invalid command"));
}

#[test]
fn unknown_command_lists_valid_ones() {
    let temp = tempfile::tempdir().unwrap();
    ocf()
        .current_dir(&temp)
        .arg("frobnicate")
        .assert()
        .failure()
        .stderr(contains("'build' | 'preview' | 'deploy' | 'upload' | 'populateCache'"))
        .stderr(contains("frobnicate"));
}

#[test]
fn invalid_populate_cache_target_stops_early() {
    let temp = tempfile::tempdir().unwrap();
    ocf()
        .current_dir(&temp)
        .args(["populateCache", "staging"])
        .assert()
        .failure()
        .stderr(contains("expected 'local' | 'remote'"));

    // dispatcher never ran, so no config was created
    assert!(!temp.path().join("open-next.config.json").exists());
}

#[test]
fn output_must_be_a_directory() {
    let temp = tempfile::tempdir().unwrap();
    fs::write(temp.path().join("dist"), "not a dir").unwrap();

    ocf()
        .current_dir(&temp)
        .args(["deploy", "--output", "dist"])
        .assert()
        .failure()
        .stderr(contains("the provided \"output\" input is not a directory"));
}

#[test]
fn invalid_cache_chunk_size() {
    let temp = tempfile::tempdir().unwrap();
    ocf()
        .current_dir(&temp)
        .args(["upload", "--cacheChunkSize", "many"])
        .assert()
        .failure()
        .stderr(contains("invalid cache chunk size"));
}

#[test]
fn skipped_build_succeeds_and_creates_config() {
    let temp = tempfile::tempdir().unwrap();
    ocf()
        .current_dir(&temp)
        .args(["build", "--skipBuild", "--skipWranglerConfigCheck"])
        .assert()
        .success()
        .stderr(contains("Cloudflare build"))
        .stderr(contains("build ready"));

    assert!(temp.path().join("open-next.config.json").exists());
    assert!(
        temp.path()
            .join(".open-next/.build/open-next.config.edge.json")
            .exists()
    );
}

#[test]
fn env_overrides_skip_the_build() {
    let temp = tempfile::tempdir().unwrap();
    ocf()
        .current_dir(&temp)
        .env("SKIP_NEXT_APP_BUILD", "true")
        .env("SKIP_WRANGLER_CONFIG_CHECK", "yes")
        .args(["build", "-o", "out"])
        .assert()
        .success()
        .stderr(contains("minify: on"));

    assert!(temp.path().join("out").is_dir());
}

#[test]
fn wrangler_config_without_nodejs_compat_fails_build() {
    let temp = tempfile::tempdir().unwrap();
    fs::write(temp.path().join("wrangler.json"), r#"{"name":"app"}"#).unwrap();

    ocf()
        .current_dir(&temp)
        .args(["build", "--skipBuild", "--noMinify"])
        .assert()
        .failure()
        .stderr(contains("nodejs_compat"));
}

#[test]
fn incompatible_config_fails() {
    let temp = tempfile::tempdir().unwrap();
    fs::write(
        temp.path().join("open-next.config.json"),
        r#"{"default":{"override":{"wrapper":"aws-lambda"}}}"#,
    )
    .unwrap();

    ocf()
        .current_dir(&temp)
        .args(["build", "--skipBuild"])
        .assert()
        .failure()
        .stderr(contains("not compatible with Cloudflare"))
        .stderr(contains("cloudflare-node"));
}

#[test]
fn populate_cache_without_build_output_fails() {
    let temp = tempfile::tempdir().unwrap();
    ocf()
        .current_dir(&temp)
        .args(["populateCache", "local"])
        .assert()
        .failure()
        .stderr(contains("cache data not found"));
}

#[cfg(unix)]
#[test]
fn non_utf8_argument_is_reported() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    use predicates::prelude::PredicateBooleanExt;

    let temp = tempfile::tempdir().unwrap();
    ocf()
        .current_dir(&temp)
        .arg("deploy")
        .arg(OsStr::from_bytes(b"--tag=\xff"))
        .assert()
        .failure()
        .stderr(contains("argument is not valid UTF-8"))
        .stderr(contains("panicked").not());
}
