// Configuration loading and parsing (client.toml).

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::protocol::ReviewVersion;

/// Environment variable that overrides `api.base_url`.
pub const API_URL_ENV: &str = "REVIEWER2_API_URL";

/// The one config file this client reads, under `config/` (and shipped
/// under `defaults/`).
const CLIENT_FILE: &str = "client.toml";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Top-level assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub api: ApiConfig,
    pub default_version: ReviewVersion,
    pub display: DisplayConfig,
}

/// How the client reaches the review backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiMode {
    /// Talk to the HTTP backend at `base_url`.
    Http,
    /// Serve canned answers locally; no server needed.
    Demo,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    #[serde(default = "default_mode")]
    pub mode: ApiMode,
    /// Per-request timeout. Zero leaves requests unbounded.
    #[serde(default)]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    /// Reveal rate for review text in the message list.
    pub chars_per_second: u32,
}

fn default_mode() -> ApiMode {
    ApiMode::Http
}

// ---------------------------------------------------------------------------
// client.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for the entire client.toml file.
#[derive(Debug, Clone, Deserialize)]
struct ClientFile {
    api: ApiConfig,
    review: ReviewSection,
    display: DisplayConfig,
}

#[derive(Debug, Clone, Deserialize)]
struct ReviewSection {
    default_version: String,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate configuration from `config/client.toml` relative to
/// the given `base_dir`.
///
/// This does not copy defaults and does not apply environment overrides.
/// Prefer `load_config()` which handles both.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let client_path = base_dir.join("config").join(CLIENT_FILE);
    let client_text = read_file(&client_path)?;
    let client_file: ClientFile =
        toml::from_str(&client_text).map_err(|e| ConfigError::ParseError {
            path: client_path.clone(),
            source: e,
        })?;

    let default_version = client_file
        .review
        .default_version
        .parse::<ReviewVersion>()
        .map_err(|message| ConfigError::ValidationError {
            field: "review.default_version".into(),
            message,
        })?;

    let config = Config {
        api: client_file.api,
        default_version,
        display: client_file.display,
    };

    validate(&config)?;

    Ok(config)
}

/// Create `config/client.toml` from `defaults/client.toml` when it is missing.
///
/// An existing `config/client.toml` is never touched. Returns the path of the
/// freshly created file, or `None` when one was already in place.
pub fn ensure_client_config(base_dir: &Path) -> Result<Option<PathBuf>, ConfigError> {
    let target = base_dir.join("config").join(CLIENT_FILE);
    if target.exists() {
        return Ok(None);
    }

    let source = base_dir.join("defaults").join(CLIENT_FILE);
    if !source.is_file() {
        return Err(ConfigError::DefaultsCopyError {
            message: format!(
                "no config/{CLIENT_FILE} and no defaults/{CLIENT_FILE} under {}; \
                 run from the crate directory",
                base_dir.display()
            ),
        });
    }

    if let Some(config_dir) = target.parent() {
        std::fs::create_dir_all(config_dir).map_err(|e| ConfigError::DefaultsCopyError {
            message: format!("failed to create {}: {e}", config_dir.display()),
        })?;
    }
    std::fs::copy(&source, &target).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to copy {} to {}: {e}", source.display(), target.display()),
    })?;

    Ok(Some(target))
}

/// Convenience wrapper: loads config relative to the current working
/// directory, copying defaults first and applying `REVIEWER2_API_URL`.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    if let Some(created) = ensure_client_config(&cwd)? {
        info!("Created {} from shipped defaults", created.display());
    }
    let mut config = load_config_from(&cwd)?;
    apply_env_overrides(&mut config, std::env::var(API_URL_ENV).ok())?;
    Ok(config)
}

/// Apply an `api.base_url` override (from the environment) and re-validate.
pub fn apply_env_overrides(
    config: &mut Config,
    api_url: Option<String>,
) -> Result<(), ConfigError> {
    if let Some(url) = api_url.filter(|u| !u.trim().is_empty()) {
        config.api.base_url = url.trim().to_string();
        validate(config)?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    let url = config.api.base_url.trim();
    if config.api.mode == ApiMode::Http {
        if url.is_empty() {
            return Err(ConfigError::ValidationError {
                field: "api.base_url".into(),
                message: "must not be empty".into(),
            });
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::ValidationError {
                field: "api.base_url".into(),
                message: format!("must start with http:// or https://, got {url}"),
            });
        }
    }

    if config.display.chars_per_second == 0 {
        return Err(ConfigError::ValidationError {
            field: "display.chars_per_second".into(),
            message: "must be greater than 0".into(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const VALID: &str = r#"
[api]
base_url = "http://localhost:3001"
mode = "http"
request_timeout_secs = 0

[review]
default_version = "default"

[display]
chars_per_second = 1000
"#;

    /// Create a fresh temp dir holding `config/client.toml` with `contents`.
    fn write_config(name: &str, contents: &str) -> PathBuf {
        let tmp = std::env::temp_dir().join(name);
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(tmp.join("config")).unwrap();
        fs::write(tmp.join("config/client.toml"), contents).unwrap();
        tmp
    }

    /// Path to the crate's shipped defaults (cwd is the crate root under
    /// `cargo test`, or the workspace root).
    fn project_root() -> PathBuf {
        let cwd = std::env::current_dir().unwrap();
        if cwd.join("defaults").exists() {
            cwd
        } else if cwd.join("review-assistant/defaults").exists() {
            cwd.join("review-assistant")
        } else {
            panic!("Cannot locate defaults/ directory from CWD {:?}", cwd);
        }
    }

    #[test]
    fn load_valid_config() {
        let tmp = write_config("review_config_valid", VALID);
        let config = load_config_from(&tmp).expect("should load valid config");
        assert_eq!(config.api.base_url, "http://localhost:3001");
        assert_eq!(config.api.mode, ApiMode::Http);
        assert_eq!(config.api.request_timeout_secs, 0);
        assert_eq!(config.default_version, ReviewVersion::Default);
        assert_eq!(config.display.chars_per_second, 1000);
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn shipped_defaults_are_valid() {
        let root = project_root();
        let tmp = std::env::temp_dir().join("review_config_shipped");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(tmp.join("config")).unwrap();
        fs::copy(
            root.join("defaults/client.toml"),
            tmp.join("config/client.toml"),
        )
        .unwrap();
        let config = load_config_from(&tmp).expect("shipped defaults should load");
        assert_eq!(config.api.base_url, "http://localhost:3001");
        assert_eq!(config.display.chars_per_second, 1000);
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn mode_and_timeout_are_optional() {
        let tmp = write_config(
            "review_config_optional",
            r#"
[api]
base_url = "https://reviews.example.org"

[review]
default_version = "detailed"

[display]
chars_per_second = 50
"#,
        );
        let config = load_config_from(&tmp).unwrap();
        assert_eq!(config.api.mode, ApiMode::Http);
        assert_eq!(config.api.request_timeout_secs, 0);
        assert_eq!(config.default_version, ReviewVersion::Detailed);
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn demo_mode_allows_empty_url() {
        let tmp = write_config(
            "review_config_demo",
            &VALID
                .replace("http://localhost:3001", "")
                .replace("mode = \"http\"", "mode = \"demo\""),
        );
        let config = load_config_from(&tmp).unwrap();
        assert_eq!(config.api.mode, ApiMode::Demo);
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_empty_base_url_in_http_mode() {
        let tmp = write_config(
            "review_config_empty_url",
            &VALID.replace("http://localhost:3001", ""),
        );
        match load_config_from(&tmp).unwrap_err() {
            ConfigError::ValidationError { field, .. } => assert_eq!(field, "api.base_url"),
            other => panic!("expected ValidationError, got: {other}"),
        }
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_base_url_without_scheme() {
        let tmp = write_config(
            "review_config_no_scheme",
            &VALID.replace("http://localhost:3001", "localhost:3001"),
        );
        match load_config_from(&tmp).unwrap_err() {
            ConfigError::ValidationError { field, message } => {
                assert_eq!(field, "api.base_url");
                assert!(message.contains("localhost:3001"));
            }
            other => panic!("expected ValidationError, got: {other}"),
        }
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_unknown_version() {
        let tmp = write_config(
            "review_config_bad_version",
            &VALID.replace("default_version = \"default\"", "default_version = \"fancy\""),
        );
        match load_config_from(&tmp).unwrap_err() {
            ConfigError::ValidationError { field, .. } => {
                assert_eq!(field, "review.default_version");
            }
            other => panic!("expected ValidationError, got: {other}"),
        }
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_zero_chars_per_second() {
        let tmp = write_config(
            "review_config_zero_cps",
            &VALID.replace("chars_per_second = 1000", "chars_per_second = 0"),
        );
        match load_config_from(&tmp).unwrap_err() {
            ConfigError::ValidationError { field, .. } => {
                assert_eq!(field, "display.chars_per_second");
            }
            other => panic!("expected ValidationError, got: {other}"),
        }
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn file_not_found_for_missing_client_toml() {
        let tmp = std::env::temp_dir().join("review_config_missing");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&tmp).unwrap();
        match load_config_from(&tmp).unwrap_err() {
            ConfigError::FileNotFound { path } => assert!(path.ends_with("client.toml")),
            other => panic!("expected FileNotFound, got: {other}"),
        }
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn parse_error_for_invalid_toml() {
        let tmp = write_config("review_config_invalid", "[api\nbase_url = ");
        assert!(matches!(
            load_config_from(&tmp).unwrap_err(),
            ConfigError::ParseError { .. }
        ));
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn env_override_replaces_base_url() {
        let tmp = write_config("review_config_env", VALID);
        let mut config = load_config_from(&tmp).unwrap();
        apply_env_overrides(&mut config, Some(" http://10.0.0.5:3001 ".into())).unwrap();
        assert_eq!(config.api.base_url, "http://10.0.0.5:3001");
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn env_override_ignores_blank_and_validates() {
        let tmp = write_config("review_config_env_blank", VALID);
        let mut config = load_config_from(&tmp).unwrap();
        apply_env_overrides(&mut config, Some("   ".into())).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:3001");
        assert!(apply_env_overrides(&mut config, Some("ftp://nope".into())).is_err());
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_client_config_copies_defaults() {
        let tmp = std::env::temp_dir().join("review_config_ensure_copies");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(tmp.join("defaults")).unwrap();
        fs::write(tmp.join("defaults/client.toml"), VALID).unwrap();

        let created = ensure_client_config(&tmp).expect("should succeed");
        assert_eq!(created, Some(tmp.join("config/client.toml")));
        assert!(load_config_from(&tmp).is_ok());

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_client_config_keeps_existing() {
        let tmp = std::env::temp_dir().join("review_config_ensure_skips");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(tmp.join("defaults")).unwrap();
        fs::create_dir_all(tmp.join("config")).unwrap();
        fs::write(tmp.join("defaults/client.toml"), VALID).unwrap();
        fs::write(tmp.join("config/client.toml"), "# custom\n").unwrap();

        assert_eq!(ensure_client_config(&tmp).expect("should succeed"), None);
        let content = fs::read_to_string(tmp.join("config/client.toml")).unwrap();
        assert_eq!(content, "# custom\n");

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_client_config_works_without_defaults_when_config_exists() {
        let tmp = write_config("review_config_no_defaults", VALID);
        assert_eq!(ensure_client_config(&tmp).unwrap(), None);
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_client_config_errors_when_nothing_to_copy() {
        let tmp = std::env::temp_dir().join("review_config_both_missing");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&tmp).unwrap();

        match ensure_client_config(&tmp).unwrap_err() {
            ConfigError::DefaultsCopyError { message } => {
                assert!(message.contains("no defaults/client.toml"));
            }
            other => panic!("expected DefaultsCopyError, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }
}
