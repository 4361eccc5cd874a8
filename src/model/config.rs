use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration from project.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub project: ProjectInfo,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub views: ViewsConfig,
    #[serde(default)]
    pub log: LogConfig,
}

impl ProjectConfig {
    /// Config for a freshly initialized project
    pub fn new(name: impl Into<String>) -> Self {
        ProjectConfig {
            project: ProjectInfo { name: name.into() },
            ui: UiConfig::default(),
            views: ViewsConfig::default(),
            log: LogConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectInfo {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UiConfig {
    /// Start the dashboard in card layout instead of the list
    #[serde(default)]
    pub card_view: bool,
    /// Hex color overrides keyed by theme slot (background, text, highlight, dim, ...)
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

/// Whether a view instance survives navigating away from it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReusePolicy {
    /// Created on first use, reused for the rest of the session
    Singleton,
    /// Created fresh on every navigation
    PerNavigation,
}

/// Reuse policy per view kind
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewsConfig {
    #[serde(default = "default_singleton")]
    pub home: ReusePolicy,
    #[serde(default = "default_per_navigation")]
    pub well_data: ReusePolicy,
    #[serde(default = "default_singleton")]
    pub geometry: ReusePolicy,
}

impl Default for ViewsConfig {
    fn default() -> Self {
        ViewsConfig {
            home: ReusePolicy::Singleton,
            well_data: ReusePolicy::PerNavigation,
            geometry: ReusePolicy::Singleton,
        }
    }
}

fn default_singleton() -> ReusePolicy {
    ReusePolicy::Singleton
}

fn default_per_navigation() -> ReusePolicy {
    ReusePolicy::PerNavigation
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// tracing EnvFilter directive, used when RUST_LOG is unset
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            filter: default_log_filter(),
        }
    }
}

fn default_log_filter() -> String {
    "wellboard=info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_uses_defaults() {
        let config: ProjectConfig = toml::from_str("[project]\nname = \"North Field\"\n").unwrap();
        assert_eq!(config.project.name, "North Field");
        assert!(!config.ui.card_view);
        assert_eq!(config.views.home, ReusePolicy::Singleton);
        assert_eq!(config.views.well_data, ReusePolicy::PerNavigation);
        assert_eq!(config.views.geometry, ReusePolicy::Singleton);
        assert_eq!(config.log.filter, "wellboard=info");
    }

    #[test]
    fn partial_views_table_keeps_other_defaults() {
        let config: ProjectConfig = toml::from_str(
            r#"[project]
name = "p"

[views]
geometry = "per_navigation"
"#,
        )
        .unwrap();
        assert_eq!(config.views.geometry, ReusePolicy::PerNavigation);
        assert_eq!(config.views.home, ReusePolicy::Singleton);
        assert_eq!(config.views.well_data, ReusePolicy::PerNavigation);
    }

    #[test]
    fn unknown_policy_is_rejected() {
        let result: Result<ProjectConfig, _> = toml::from_str(
            r#"[project]
name = "p"

[views]
home = "sometimes"
"#,
        );
        assert!(result.is_err());
    }
}
