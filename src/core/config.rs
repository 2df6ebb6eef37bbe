use std::env;
use std::time::Duration;

use url::Url;

use crate::errors::ClarifyError;

pub const DEFAULT_SESSION_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_NOTIFICATION_MS: u64 = 3000;
pub const DEFAULT_SAVED_ACK_MS: u64 = 2000;
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub session_timeout: Duration,
    pub notification_duration: Duration,
    pub saved_ack_duration: Duration,
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub openai_model: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            session_timeout: Duration::from_secs(DEFAULT_SESSION_TIMEOUT_SECS),
            notification_duration: Duration::from_millis(DEFAULT_NOTIFICATION_MS),
            saved_ack_duration: Duration::from_millis(DEFAULT_SAVED_ACK_MS),
            openai_api_key: None,
            openai_base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            openai_model: DEFAULT_OPENAI_MODEL.to_string(),
        }
    }
}

impl AppConfig {
    /// # Errors
    ///
    /// Returns `ConfigError` if a numeric variable does not parse or the base URL is invalid.
    pub fn from_env() -> Result<Self, ClarifyError> {
        let defaults = Self::default();

        let openai_base_url = match env::var("OPENAI_BASE_URL") {
            Ok(raw) => parse_base_url(&raw)?,
            Err(_) => defaults.openai_base_url,
        };

        Ok(Self {
            session_timeout: Duration::from_secs(env_u64(
                "MEDCLARIFY_SESSION_TIMEOUT_SECS",
                DEFAULT_SESSION_TIMEOUT_SECS,
            )?),
            notification_duration: Duration::from_millis(env_u64(
                "MEDCLARIFY_NOTIFICATION_MS",
                DEFAULT_NOTIFICATION_MS,
            )?),
            saved_ack_duration: Duration::from_millis(env_u64(
                "MEDCLARIFY_SAVED_ACK_MS",
                DEFAULT_SAVED_ACK_MS,
            )?),
            openai_api_key: env::var("OPENAI_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            openai_base_url,
            openai_model: env::var("OPENAI_MODEL").unwrap_or(defaults.openai_model),
        })
    }
}

fn env_u64(name: &str, default: u64) -> Result<u64, ClarifyError> {
    match env::var(name) {
        Ok(raw) => parse_u64(name, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_base_url(raw: &str) -> Result<String, ClarifyError> {
    let url = Url::parse(raw.trim())
        .map_err(|e| ClarifyError::ConfigError(format!("OPENAI_BASE_URL: {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ClarifyError::ConfigError(format!(
            "OPENAI_BASE_URL: unsupported scheme {}",
            url.scheme()
        )));
    }
    Ok(url.as_str().trim_end_matches('/').to_string())
}

fn parse_u64(name: &str, raw: &str) -> Result<u64, ClarifyError> {
    raw.trim()
        .parse::<u64>()
        .map_err(|e| ClarifyError::ConfigError(format!("{name}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_extension_timings() {
        let config = AppConfig::default();
        assert_eq!(config.session_timeout, Duration::from_secs(30));
        assert_eq!(config.notification_duration, Duration::from_secs(3));
        assert_eq!(config.saved_ack_duration, Duration::from_secs(2));
        assert!(config.openai_api_key.is_none());
        assert_eq!(config.openai_base_url, "https://api.openai.com/v1");
    }

    #[test]
    fn base_url_is_normalized_and_validated() {
        assert_eq!(
            parse_base_url("http://localhost:8080/v1/").unwrap(),
            "http://localhost:8080/v1"
        );
        assert!(parse_base_url("not a url").is_err());
        assert!(parse_base_url("ftp://example.com").is_err());
    }

    #[test]
    fn parse_u64_rejects_garbage() {
        assert_eq!(parse_u64("X", " 45 ").unwrap(), 45);
        let err = parse_u64("MEDCLARIFY_SESSION_TIMEOUT_SECS", "soon").unwrap_err();
        assert!(err.to_string().contains("MEDCLARIFY_SESSION_TIMEOUT_SECS"));
    }
}
