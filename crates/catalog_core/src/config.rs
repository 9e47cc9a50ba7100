//! Configuration loading from environment variables.

use crate::constants::{
    DEFAULT_EXPORT_FILE_NAME, DEFAULT_PAGE_SIZE, ENV_EXPORT_ENABLED, ENV_EXPORT_PATH,
    ENV_PAGE_SIZE, ENV_SEED_PATH,
};
use std::env;
use std::path::PathBuf;

/// Runtime configuration for the catalog view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Optional JSON seed file replacing the bundled product list.
    pub seed_path: Option<PathBuf>,
    /// Initial page size (`take`) of the grid.
    pub page_size: usize,
    /// Destination file for PDF exports.
    pub export_path: PathBuf,
    /// Whether the PDF export surface is mounted at startup.
    pub export_enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed_path: None,
            page_size: DEFAULT_PAGE_SIZE,
            export_path: default_export_path(),
            export_enabled: true,
        }
    }
}

/// Expand tilde (~) in paths to the user's home directory
fn expand_tilde(path: String) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = resolve_home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

fn resolve_home_dir() -> Option<PathBuf> {
    if let Ok(home) = env::var("HOME") {
        if !home.trim().is_empty() {
            return Some(PathBuf::from(home));
        }
    }

    if let Ok(profile) = env::var("USERPROFILE") {
        if !profile.trim().is_empty() {
            return Some(PathBuf::from(profile));
        }
    }

    None
}

fn default_export_path() -> PathBuf {
    match resolve_home_dir() {
        Some(home) => home.join("Downloads").join(DEFAULT_EXPORT_FILE_NAME),
        None => env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(DEFAULT_EXPORT_FILE_NAME),
    }
}

/// Parse a boolean-like environment flag value.
///
/// # Supported Values
/// - Truthy: `1`, `true`, `yes`, `on`
/// - Falsy: `0`, `false`, `no`, `off`, empty string
///
/// Matching is case-insensitive and ignores surrounding whitespace.
///
/// # Returns
/// `Some(bool)` when the value is recognized, otherwise `None`.
pub fn parse_env_flag(value: &str) -> Option<bool> {
    let normalized = value.trim().to_ascii_lowercase();
    match normalized.as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "" | "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Read a boolean flag from the environment, falling back to `default`
/// when the variable is missing or unrecognized.
pub fn env_flag_or(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|value| parse_env_flag(&value))
        .unwrap_or(default)
}

/// Parse a page size override. Zero and non-numeric input are rejected.
pub fn parse_page_size(value: &str) -> Option<usize> {
    value.trim().parse::<usize>().ok().filter(|size| *size > 0)
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Returns
    /// A populated [`Config`] with defaults applied when env vars are missing.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            seed_path: env::var(ENV_SEED_PATH)
                .ok()
                .filter(|value| !value.trim().is_empty())
                .map(expand_tilde),
            page_size: env::var(ENV_PAGE_SIZE)
                .ok()
                .and_then(|value| parse_page_size(&value))
                .unwrap_or(defaults.page_size),
            export_path: env::var(ENV_EXPORT_PATH)
                .ok()
                .filter(|value| !value.trim().is_empty())
                .map(expand_tilde)
                .unwrap_or(defaults.export_path),
            export_enabled: env_flag_or(ENV_EXPORT_ENABLED, defaults.export_enabled),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{env_lock, EnvGuard};

    #[test]
    fn parse_env_flag_accepts_truthy_values() {
        for value in ["1", "true", "TRUE", " yes ", "on"] {
            assert_eq!(parse_env_flag(value), Some(true), "value: {}", value);
        }
    }

    #[test]
    fn parse_env_flag_accepts_falsy_values() {
        for value in ["", "0", "false", "FALSE", " no ", "off"] {
            assert_eq!(parse_env_flag(value), Some(false), "value: {}", value);
        }
    }

    #[test]
    fn parse_page_size_rejects_zero_and_garbage() {
        assert_eq!(parse_page_size(" 50 "), Some(50));
        assert_eq!(parse_page_size("0"), None);
        assert_eq!(parse_page_size("many"), None);
    }

    #[test]
    fn from_env_applies_overrides() {
        let _lock = env_lock().lock().expect("env lock");
        let _seed = EnvGuard::set(ENV_SEED_PATH, "/tmp/seed.json");
        let _size = EnvGuard::set(ENV_PAGE_SIZE, "10");
        let _export = EnvGuard::set(ENV_EXPORT_PATH, "/tmp/out.pdf");
        let _enabled = EnvGuard::set(ENV_EXPORT_ENABLED, "off");

        let config = Config::from_env();
        assert_eq!(config.seed_path, Some(PathBuf::from("/tmp/seed.json")));
        assert_eq!(config.page_size, 10);
        assert_eq!(config.export_path, PathBuf::from("/tmp/out.pdf"));
        assert!(!config.export_enabled);
    }

    #[test]
    fn from_env_falls_back_to_defaults() {
        let _lock = env_lock().lock().expect("env lock");
        let _seed = EnvGuard::remove(ENV_SEED_PATH);
        let _size = EnvGuard::set(ENV_PAGE_SIZE, "0");
        let _export = EnvGuard::remove(ENV_EXPORT_PATH);
        let _enabled = EnvGuard::set(ENV_EXPORT_ENABLED, "sometimes");

        let config = Config::from_env();
        assert_eq!(config.seed_path, None);
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert!(config.export_path.ends_with(DEFAULT_EXPORT_FILE_NAME));
        assert!(config.export_enabled);
    }
}
