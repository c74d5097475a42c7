use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::cli::Cli;
use crate::error::ConfigError;

/// Environment variable consulted when `--api-key` is absent or empty.
pub const API_KEY_ENV: &str = "API_KEY";

/// Validated run settings. Resolving them performs no network I/O.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_base_url: String,
    pub api_key: String,
    pub file: PathBuf,
    pub explicit_date: Option<String>,
    pub execution_level: i64,
    pub timeout: Duration,
}

impl Settings {
    /// Combine parsed flags with the `API_KEY` environment value.
    ///
    /// Checks run in order: API key, diary file, base URL, timeout.
    pub fn resolve(cli: &Cli, env_api_key: Option<&str>) -> Result<Self, ConfigError> {
        let api_key =
            resolve_api_key(cli.api_key.as_deref(), env_api_key).ok_or(ConfigError::MissingApiKey)?;

        let file = expand_path(&cli.file);
        if !file.is_file() {
            return Err(ConfigError::FileNotFound(file));
        }

        let api_base_url = normalize_base_url(&cli.api_base_url)?;

        if cli.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout);
        }

        Ok(Self {
            api_base_url,
            api_key,
            file,
            explicit_date: cli.date.clone().filter(|d| !d.is_empty()),
            execution_level: cli.execution_level,
            timeout: Duration::from_secs(cli.timeout_secs),
        })
    }
}

/// A non-empty flag value is used verbatim; otherwise the environment value,
/// trimmed.
pub fn resolve_api_key(flag: Option<&str>, env: Option<&str>) -> Option<String> {
    if let Some(key) = flag.filter(|k| !k.is_empty()) {
        return Some(key.to_string());
    }
    env.map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
}

/// Trim whitespace and trailing slashes, and require an http(s) URL with a host.
pub fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let invalid = |reason: String| ConfigError::InvalidBaseUrl {
        url: raw.to_string(),
        reason,
    };

    let parsed = Url::parse(trimmed).map_err(|e| invalid(e.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(invalid(format!(
            "scheme must be http or https, got {}",
            parsed.scheme()
        )));
    }
    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(invalid("missing host".to_string()));
    }
    Ok(trimmed.to_string())
}

fn expand_path(path: &std::path::Path) -> PathBuf {
    let raw = path.to_string_lossy();
    PathBuf::from(shellexpand::tilde(&raw).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["diary-upsert"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    fn diary_file(dir: &TempDir, name: &str) -> String {
        let path = dir.path().join(name);
        fs::write(&path, "# Today\nwrote tests\n").unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn flag_key_wins_over_env() {
        assert_eq!(
            resolve_api_key(Some("flag-key"), Some("env-key")).as_deref(),
            Some("flag-key")
        );
    }

    #[test]
    fn empty_flag_falls_back_to_trimmed_env() {
        assert_eq!(
            resolve_api_key(Some(""), Some("  env-key \n")).as_deref(),
            Some("env-key")
        );
        assert_eq!(resolve_api_key(None, Some("env-key")).as_deref(), Some("env-key"));
    }

    #[test]
    fn blank_sources_yield_no_key() {
        assert_eq!(resolve_api_key(None, None), None);
        assert_eq!(resolve_api_key(Some(""), Some("   ")), None);
    }

    #[test]
    fn missing_key_is_reported_before_file() {
        let args = cli(&["--file", "/definitely/not/here.md"]);
        let err = Settings::resolve(&args, None).unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey));
    }

    #[test]
    fn missing_file_is_rejected() {
        let args = cli(&["--file", "/definitely/not/here.md", "--api-key", "k"]);
        let err = Settings::resolve(&args, None).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    #[test]
    fn directory_is_not_a_diary_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().to_string_lossy().into_owned();
        let args = cli(&["--file", &path, "--api-key", "k"]);
        let err = Settings::resolve(&args, None).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    #[test]
    fn resolves_valid_settings() {
        let dir = TempDir::new().unwrap();
        let file = diary_file(&dir, "2024-03-01.md");
        let args = cli(&[
            "--file",
            &file,
            "--api-base-url",
            "https://api.moltbb.com/",
            "--execution-level",
            "9",
        ]);

        let settings = Settings::resolve(&args, Some("env-key")).unwrap();

        assert_eq!(settings.api_key, "env-key");
        assert_eq!(settings.api_base_url, "https://api.moltbb.com");
        assert_eq!(settings.file, PathBuf::from(&file));
        assert_eq!(settings.execution_level, 9);
        assert_eq!(settings.explicit_date, None);
        assert_eq!(settings.timeout, Duration::from_secs(30));
    }

    #[test]
    fn empty_date_flag_is_treated_as_absent() {
        let dir = TempDir::new().unwrap();
        let file = diary_file(&dir, "note.md");
        let args = cli(&["--file", &file, "--api-key", "k", "--date", ""]);
        let settings = Settings::resolve(&args, None).unwrap();
        assert_eq!(settings.explicit_date, None);
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let dir = TempDir::new().unwrap();
        let file = diary_file(&dir, "note.md");
        let args = cli(&["--file", &file, "--api-key", "k", "--timeout-secs", "0"]);
        let err = Settings::resolve(&args, None).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTimeout));
    }

    #[test]
    fn base_url_normalization() {
        assert_eq!(
            normalize_base_url("  https://api.moltbb.com//  ").unwrap(),
            "https://api.moltbb.com"
        );
        assert_eq!(
            normalize_base_url("http://127.0.0.1:8080/prefix/").unwrap(),
            "http://127.0.0.1:8080/prefix"
        );
    }

    #[test]
    fn base_url_rejects_other_schemes_and_garbage() {
        assert!(normalize_base_url("ftp://api.moltbb.com").is_err());
        assert!(normalize_base_url("api.moltbb.com").is_err());
        assert!(normalize_base_url("").is_err());
    }

    #[test]
    fn tilde_is_expanded() {
        let expanded = expand_path(std::path::Path::new("~/diary/2024-03-01.md"));
        assert!(!expanded.to_string_lossy().starts_with('~'));
        assert!(expanded.ends_with("diary/2024-03-01.md"));
    }
}
