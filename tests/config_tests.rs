//! Configuration loading tests that depend on the working directory

use repodash::config::Config;
use serial_test::serial;
use std::env;
use std::fs;
use tempfile::TempDir;

struct CwdGuard(std::path::PathBuf);

impl CwdGuard {
    fn enter(dir: &std::path::Path) -> Self {
        let previous = env::current_dir().unwrap();
        env::set_current_dir(dir).unwrap();
        Self(previous)
    }
}

impl Drop for CwdGuard {
    fn drop(&mut self) {
        let _ = env::set_current_dir(&self.0);
    }
}

#[test]
#[serial]
fn test_default_config_file_is_picked_up() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("repodash.yaml"),
        "output_dir: public_site\nport: 9000\nignore:\n  - vendor\n",
    )
    .unwrap();
    let _guard = CwdGuard::enter(temp.path());

    let config = Config::load_or_default(None).unwrap();

    assert_eq!(config.output_dir, "public_site");
    assert_eq!(config.port, 9000);
    assert_eq!(config.ignore, vec!["vendor"]);
    assert_eq!(config.host, "127.0.0.1");
}

#[test]
#[serial]
fn test_defaults_without_config_file() {
    let temp = TempDir::new().unwrap();
    let _guard = CwdGuard::enter(temp.path());

    let config = Config::load_or_default(None).unwrap();

    assert_eq!(config, Config::default());
    assert_eq!(config.output_dir, "dashboard_site");
    assert_eq!(config.port, 4173);
}

#[test]
#[serial]
fn test_invalid_default_config_is_reported() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("repodash.yaml"), "ignore:\n  - a/b\n").unwrap();
    let _guard = CwdGuard::enter(temp.path());

    let err = Config::load_or_default(None).unwrap_err();
    assert!(err.to_string().contains("Invalid configuration"));
}

#[test]
#[serial]
fn test_cli_overrides_win_over_file() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("repodash.yaml"), "port: 9000\n").unwrap();
    let _guard = CwdGuard::enter(temp.path());

    let config = Config::load_or_default(None)
        .unwrap()
        .with_overrides(Some("out".to_string()), Some(8080), None)
        .unwrap();

    assert_eq!(config.output_dir, "out");
    assert_eq!(config.port, 8080);
}
