use crate::error::ScoreError;
use crate::narrative::{Role, Style};
use serde::Deserialize;
use std::path::PathBuf;

pub const DEFAULT_COMMIT_WINDOW: usize = 15;
pub const DEFAULT_HISTORY_LIMIT: usize = 50;
const MAX_COMMIT_WINDOW: usize = 100;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScoreConfig {
    #[serde(default)]
    pub project: ProjectConfig,
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub narrative: NarrativeConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Overrides for repository metadata the local provider would otherwise detect.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectConfig {
    pub name: Option<String>,
    pub description: Option<String>,
    pub language: Option<String>,
    pub license: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderConfig {
    pub commit_window: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NarrativeConfig {
    pub command: Option<String>,
    #[serde(default)]
    pub args: Vec<String>,
    pub style: Option<String>,
    pub role: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageConfig {
    pub dir: Option<PathBuf>,
    pub cache: Option<bool>,
    pub history_limit: Option<usize>,
}

impl ScoreConfig {
    pub fn commit_window(&self) -> usize {
        self.provider.commit_window.unwrap_or(DEFAULT_COMMIT_WINDOW)
    }

    pub fn history_limit(&self) -> usize {
        self.storage.history_limit.unwrap_or(DEFAULT_HISTORY_LIMIT)
    }

    pub fn cache_enabled(&self) -> bool {
        self.storage.cache.unwrap_or(true)
    }

    pub fn style(&self) -> Result<Style, ScoreError> {
        match &self.narrative.style {
            Some(style) => style
                .parse()
                .map_err(|e: String| ScoreError::ConfigParse(format!("narrative.style: {e}"))),
            None => Ok(Style::default()),
        }
    }

    pub fn role(&self) -> Role {
        self.narrative
            .role
            .as_deref()
            .map(Role::from)
            .unwrap_or_default()
    }

    pub fn validate(&self) -> Result<(), ScoreError> {
        if let Some(window) = self.provider.commit_window {
            if !(1..=MAX_COMMIT_WINDOW).contains(&window) {
                return Err(ScoreError::ConfigParse(format!(
                    "provider.commit_window must be between 1 and {MAX_COMMIT_WINDOW} (found {window})"
                )));
            }
            if window != DEFAULT_COMMIT_WINDOW {
                tracing::warn!(
                    window,
                    "commit volume thresholds are calibrated for a {DEFAULT_COMMIT_WINDOW}-commit window"
                );
            }
        }

        if self.storage.history_limit == Some(0) {
            return Err(ScoreError::ConfigParse(
                "storage.history_limit must be greater than 0".to_string(),
            ));
        }

        if let Some(command) = &self.narrative.command {
            if command.trim().is_empty() {
                return Err(ScoreError::ConfigParse(
                    "narrative.command cannot be empty".to_string(),
                ));
            }
        }

        if let Some(role) = &self.narrative.role {
            if role.trim().is_empty() {
                return Err(ScoreError::ConfigParse(
                    "narrative.role cannot be empty".to_string(),
                ));
            }
        }

        self.style()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let cfg: ScoreConfig = toml::from_str("").expect("empty config should parse");
        assert_eq!(cfg.commit_window(), 15);
        assert_eq!(cfg.history_limit(), 50);
        assert!(cfg.cache_enabled());
        assert_eq!(cfg.style().expect("default style"), Style::Clarity);
        assert_eq!(cfg.role(), Role::Student);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn parse_full_config() {
        let toml_str = r#"
[project]
name = "octo/demo"
description = "Scores repositories deterministically"
license = "MIT"

[provider]
commit_window = 15

[narrative]
command = "gen-narrative"
args = ["--model", "fast"]
style = "professional"
role = "Engineering Manager"

[storage]
dir = "/tmp/reposcore"
cache = false
history_limit = 10
"#;
        let cfg: ScoreConfig = toml::from_str(toml_str).expect("full config should parse");
        assert_eq!(cfg.project.name.as_deref(), Some("octo/demo"));
        assert_eq!(cfg.narrative.args, vec!["--model", "fast"]);
        assert_eq!(cfg.style().expect("style"), Style::Professional);
        assert_eq!(cfg.role(), Role::Custom("Engineering Manager".to_string()));
        assert!(!cfg.cache_enabled());
        assert_eq!(cfg.history_limit(), 10);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn validate_rejects_unknown_style() {
        let cfg: ScoreConfig = toml::from_str(
            r#"
[narrative]
style = "poetic"
"#,
        )
        .expect("config should parse");
        let err = cfg.validate().expect_err("validation should fail");
        assert!(err.to_string().contains("narrative.style"));
    }

    #[test]
    fn validate_rejects_zero_commit_window() {
        let cfg: ScoreConfig = toml::from_str(
            r#"
[provider]
commit_window = 0
"#,
        )
        .expect("config should parse");
        let err = cfg.validate().expect_err("validation should fail");
        assert!(err.to_string().contains("provider.commit_window"));
    }

    #[test]
    fn validate_rejects_zero_history_limit() {
        let cfg: ScoreConfig = toml::from_str(
            r#"
[storage]
history_limit = 0
"#,
        )
        .expect("config should parse");
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn unknown_sections_are_rejected() {
        let result = toml::from_str::<ScoreConfig>(
            r#"
[metrics.weights]
codeQuality = 0.5
"#,
        );
        assert!(result.is_err());
    }
}
