//! File and environment loading for [`BudgetConfig`]

use super::budget::BudgetConfig;
use crate::error::{ChatError, ChatResult};
use std::fs;
use std::path::Path;

/// Prefix shared by all environment overrides
pub const ENV_PREFIX: &str = "CHATWIN_";

/// Load configuration from a file
///
/// The format is picked from the extension: `.toml`, `.yaml`/`.yml`,
/// anything else is parsed as JSON. A missing file yields the defaults.
pub fn load_from_file(path: &Path) -> ChatResult<BudgetConfig> {
    if !path.exists() {
        tracing::debug!("Config file {} not found, using defaults", path.display());
        return Ok(BudgetConfig::default());
    }

    let content = fs::read_to_string(path).map_err(|e| {
        ChatError::config_with_context(
            format!("Failed to read config file: {}", e),
            format!("Reading configuration from '{}'", path.display()),
        )
    })?;

    let config: BudgetConfig = match path.extension().and_then(|s| s.to_str()) {
        Some("toml") => toml::from_str(&content).map_err(|e| {
            ChatError::config_with_context(
                format!("Failed to parse TOML config: {}", e),
                format!("Deserializing TOML configuration from '{}'", path.display()),
            )
        })?,
        Some("yaml") | Some("yml") => serde_yaml::from_str(&content).map_err(|e| {
            ChatError::config_with_context(
                format!("Failed to parse YAML config: {}", e),
                format!("Deserializing YAML configuration from '{}'", path.display()),
            )
        })?,
        _ => serde_json::from_str(&content).map_err(|e| {
            ChatError::config_with_context(
                format!("Failed to parse JSON config: {}", e),
                format!("Deserializing JSON configuration from '{}'", path.display()),
            )
        })?,
    };

    Ok(config)
}

impl BudgetConfig {
    /// Load from a file, apply environment overrides, then validate
    pub fn load(path: &Path) -> ChatResult<Self> {
        let mut config = load_from_file(path)?;
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `CHATWIN_*` environment variables on top of this configuration
    pub fn apply_env_overrides(&mut self) -> ChatResult<()> {
        self.apply_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup
    ///
    /// Keys are the full variable names, e.g. `CHATWIN_MAX_PROMPT_TOKENS`.
    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> ChatResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read_usize = |name: &str| -> ChatResult<Option<usize>> {
            let key = format!("{}{}", ENV_PREFIX, name);
            match lookup(&key) {
                Some(raw) => raw
                    .trim()
                    .parse::<usize>()
                    .map(Some)
                    .map_err(|_| ChatError::config(format!("Invalid {} value: {}", key, raw))),
                None => Ok(None),
            }
        };

        if let Some(v) = read_usize("MAX_PROMPT_TOKENS")? {
            self.max_prompt_tokens = v;
        }
        if let Some(v) = read_usize("RESERVED_RESPONSE_TOKENS")? {
            self.reserved_response_tokens = v;
        }
        if let Some(v) = read_usize("RECENT_MESSAGES_TO_KEEP")? {
            self.recent_messages_to_keep = v;
        }
        if let Some(v) = read_usize("MIN_RECENT_MESSAGES_TO_KEEP")? {
            self.min_recent_messages_to_keep = v;
        }

        let temp_key = format!("{}SUMMARY_TEMPERATURE", ENV_PREFIX);
        if let Some(raw) = lookup(&temp_key) {
            self.summary_temperature = raw
                .trim()
                .parse::<f32>()
                .map_err(|_| ChatError::config(format!("Invalid {} value: {}", temp_key, raw)))?;
        }

        if let Some(model) = lookup(&format!("{}MODEL", ENV_PREFIX)) {
            if !model.trim().is_empty() {
                self.model = Some(model.trim().to_string());
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = load_from_file(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config, BudgetConfig::default());
    }

    #[test]
    fn test_load_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("chatwin.toml");
        fs::write(
            &path,
            "max_prompt_tokens = 400\nreserved_response_tokens = 50\nrecent_messages_to_keep = 4\n",
        )
        .unwrap();

        let config = load_from_file(&path).unwrap();
        assert_eq!(config.max_prompt_tokens, 400);
        assert_eq!(config.effective_budget(), 350);
        assert_eq!(config.recent_messages_to_keep, 4);
        assert_eq!(config.min_recent_messages_to_keep, 2);
    }

    #[test]
    fn test_load_yaml_and_json() {
        let dir = TempDir::new().unwrap();

        let yaml = dir.path().join("chatwin.yaml");
        fs::write(&yaml, "max_prompt_tokens: 2048\nmodel: mistral\n").unwrap();
        let config = load_from_file(&yaml).unwrap();
        assert_eq!(config.max_prompt_tokens, 2048);
        assert_eq!(config.model.as_deref(), Some("mistral"));

        let json = dir.path().join("chatwin.json");
        fs::write(&json, r#"{"recent_messages_to_keep": 8}"#).unwrap();
        let config = load_from_file(&json).unwrap();
        assert_eq!(config.recent_messages_to_keep, 8);
    }

    #[test]
    fn test_invalid_file_reports_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.toml");
        fs::write(&path, "max_prompt_tokens = \"lots\"").unwrap();

        let err = load_from_file(&path).unwrap_err();
        assert_eq!(err.error_code(), "CHAT_CONFIG");
        assert!(err.to_string().contains("TOML"));
    }

    #[test]
    fn test_overrides_from_lookup() {
        let vars: HashMap<&str, &str> = [
            ("CHATWIN_MAX_PROMPT_TOKENS", "1000"),
            ("CHATWIN_RESERVED_RESPONSE_TOKENS", " 100 "),
            ("CHATWIN_SUMMARY_TEMPERATURE", "0.1"),
            ("CHATWIN_MODEL", "qwen2"),
        ]
        .into_iter()
        .collect();

        let mut config = BudgetConfig::default();
        config
            .apply_overrides_from(|k| vars.get(k).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.max_prompt_tokens, 1000);
        assert_eq!(config.reserved_response_tokens, 100);
        assert_eq!(config.recent_messages_to_keep, 6);
        assert!((config.summary_temperature - 0.1).abs() < f32::EPSILON);
        assert_eq!(config.model.as_deref(), Some("qwen2"));
    }

    #[test]
    fn test_invalid_override_is_rejected() {
        let mut config = BudgetConfig::default();
        let err = config
            .apply_overrides_from(|k| {
                (k == "CHATWIN_RECENT_MESSAGES_TO_KEEP").then(|| "six".to_string())
            })
            .unwrap_err();
        assert!(err.to_string().contains("CHATWIN_RECENT_MESSAGES_TO_KEEP"));
    }
}
