use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Deserialize;
use thiserror::Error;
use url::Url;

pub const DEFAULT_API_URL: &str = "http://localhost:9000";
pub const DEFAULT_CONFIG_PATH: &str = "conlang.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },
    #[error("failed to build http client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_url: String,
    pub request_timeout: Option<Duration>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.into(),
            request_timeout: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    api_url: Option<String>,
    request_timeout_secs: Option<u64>,
}

/// Defaults, then the TOML file, then environment overrides.
///
/// An explicit `config_path` must exist; the default `conlang.toml` is optional.
pub fn load_settings(config_path: Option<&Path>) -> Result<Settings, ConfigError> {
    let mut settings = Settings::default();

    let (path, required) = match config_path {
        Some(path) => (path.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_CONFIG_PATH), false),
    };
    match fs::read_to_string(&path) {
        Ok(raw) => apply_file(&mut settings, &path, &raw)?,
        Err(source) if required || source.kind() != std::io::ErrorKind::NotFound => {
            return Err(ConfigError::Read { path, source });
        }
        Err(_) => {}
    }

    apply_env(&mut settings, |key| std::env::var(key).ok())?;
    Ok(settings)
}

fn apply_file(settings: &mut Settings, path: &Path, raw: &str) -> Result<(), ConfigError> {
    let file_cfg: FileSettings = toml::from_str(raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    if let Some(v) = file_cfg.api_url {
        settings.api_url = normalize_api_url("api_url", &v)?;
    }
    if let Some(secs) = file_cfg.request_timeout_secs {
        settings.request_timeout = timeout_from_secs(secs);
    }
    Ok(())
}

fn apply_env(
    settings: &mut Settings,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<(), ConfigError> {
    for key in ["CONLANG_API_URL", "APP__API_URL"] {
        if let Some(v) = lookup(key) {
            settings.api_url = normalize_api_url(key, &v)?;
        }
    }

    if let Some(v) = lookup("APP__REQUEST_TIMEOUT_SECS") {
        let secs = v
            .trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidValue {
                key: "APP__REQUEST_TIMEOUT_SECS".into(),
                reason: e.to_string(),
            })?;
        settings.request_timeout = timeout_from_secs(secs);
    }
    Ok(())
}

// Zero disables the timeout.
fn timeout_from_secs(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}

pub fn normalize_api_url(key: &str, raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let invalid = |reason: String| ConfigError::InvalidValue {
        key: key.to_string(),
        reason,
    };

    let url = Url::parse(trimmed).map_err(|e| invalid(format!("'{trimmed}': {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!(
            "'{trimmed}' must start with http:// or https://"
        )));
    }
    if url.cannot_be_a_base() || url.host_str().is_none() {
        return Err(invalid(format!("'{trimmed}' has no host")));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use std::{
        collections::HashMap,
        env,
        time::{SystemTime, UNIX_EPOCH},
    };

    use super::*;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_point_at_local_service() {
        let settings = Settings::default();
        assert_eq!(settings.api_url, "http://localhost:9000");
        assert_eq!(settings.request_timeout, None);
    }

    #[test]
    fn normalizes_trailing_slash() {
        assert_eq!(
            normalize_api_url("api_url", " https://lang.example.com/ ").expect("valid"),
            "https://lang.example.com"
        );
    }

    #[test]
    fn rejects_non_http_scheme() {
        let err = normalize_api_url("api_url", "ftp://lang.example.com").expect_err("invalid");
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
        assert!(normalize_api_url("api_url", "not a url").is_err());
    }

    #[test]
    fn file_values_apply_then_env_wins() {
        let mut settings = Settings::default();
        apply_file(
            &mut settings,
            Path::new("conlang.toml"),
            "api_url = \"http://file.example:9100/\"\nrequest_timeout_secs = 5\n",
        )
        .expect("file");
        assert_eq!(settings.api_url, "http://file.example:9100");
        assert_eq!(settings.request_timeout, Some(Duration::from_secs(5)));

        apply_env(
            &mut settings,
            env_of(&[
                ("APP__API_URL", "http://env.example:9200"),
                ("APP__REQUEST_TIMEOUT_SECS", "0"),
            ]),
        )
        .expect("env");
        assert_eq!(settings.api_url, "http://env.example:9200");
        assert_eq!(settings.request_timeout, None);
    }

    #[test]
    fn invalid_timeout_env_is_an_error() {
        let mut settings = Settings::default();
        let err = apply_env(&mut settings, env_of(&[("APP__REQUEST_TIMEOUT_SECS", "soon")]))
            .expect_err("invalid");
        assert!(matches!(err, ConfigError::InvalidValue { key, .. } if key == "APP__REQUEST_TIMEOUT_SECS"));
    }

    #[test]
    fn malformed_file_is_reported() {
        let mut settings = Settings::default();
        let err = apply_file(&mut settings, Path::new("conlang.toml"), "api_url = [")
            .expect_err("parse error");
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn explicit_config_path_must_exist() {
        let suffix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos();
        let missing = env::temp_dir().join(format!("conlang_missing_{suffix}.toml"));
        let err = load_settings(Some(&missing)).expect_err("missing file");
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn explicit_config_path_is_loaded() {
        let suffix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos();
        let path = env::temp_dir().join(format!("conlang_config_{suffix}.toml"));
        fs::write(&path, "request_timeout_secs = 12\n").expect("write config");

        let settings = load_settings(Some(&path)).expect("load");
        assert_eq!(settings.request_timeout, Some(Duration::from_secs(12)));

        fs::remove_file(path).expect("cleanup");
    }
}
