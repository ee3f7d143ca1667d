use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
pub const BASE_URL_ENV: &str = "ACTIVITIES_API_URL";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout. `None` waits forever.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_ms: Option<u64>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_ms: None,
        }
    }
}

impl ClientConfig {
    /// Relative paths against the page's own origin.
    pub fn same_origin() -> Self {
        Self {
            base_url: String::new(),
            request_timeout_ms: None,
        }
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Applies the env var and the command-line flag on top of `self`.
    /// The flag wins over the env var. Blank values are ignored.
    pub fn with_overrides(mut self, env_url: Option<String>, flag_url: Option<String>) -> Self {
        for url in [env_url, flag_url].into_iter().flatten() {
            let url = url.trim();
            if !url.is_empty() {
                self.base_url = url.to_string();
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_fields_default_when_missing() {
        let cfg = ClientConfig::from_json("{}").unwrap();
        assert_eq!(cfg, ClientConfig::default());

        let cfg = ClientConfig::from_json(r#"{"request_timeout_ms": 2500}"#).unwrap();
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.request_timeout_ms, Some(2500));
    }

    #[test]
    fn precedence_is_flag_then_env_then_file() {
        let file = ClientConfig::from_json(r#"{"base_url": "http://file:1"}"#).unwrap();

        let cfg = file.clone().with_overrides(None, None);
        assert_eq!(cfg.base_url, "http://file:1");

        let cfg = file
            .clone()
            .with_overrides(Some("http://env:2".to_string()), None);
        assert_eq!(cfg.base_url, "http://env:2");

        let cfg = file.with_overrides(
            Some("http://env:2".to_string()),
            Some("http://flag:3".to_string()),
        );
        assert_eq!(cfg.base_url, "http://flag:3");
    }

    #[test]
    fn blank_overrides_are_ignored() {
        let cfg = ClientConfig::default().with_overrides(Some("  ".to_string()), Some(String::new()));
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
    }
}
