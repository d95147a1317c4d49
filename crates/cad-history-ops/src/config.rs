//! Configuration for the operations layer.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use cad_history_graph::{LaneLayoutConfig, LoadOptions, LoadPolicy, PositionSource};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::{OpsError, OpsResult};

/// Environment variable overriding the config file location.
pub const CONFIG_PATH_ENV: &str = "CAD_HISTORY_CONFIG";
/// Environment variable overriding `data_path`.
pub const DATA_PATH_ENV: &str = "CAD_HISTORY_DATA";
/// Environment variable overriding `share_base_url`.
pub const SHARE_URL_ENV: &str = "CAD_HISTORY_SHARE_URL";

/// Where commit positions come from when a session opens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    /// Use the `x`/`y` recorded in the data source.
    #[default]
    Supplied,
    /// Recompute positions with the lane layout.
    Computed,
}

impl fmt::Display for LayoutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutMode::Supplied => write!(f, "supplied"),
            LayoutMode::Computed => write!(f, "computed"),
        }
    }
}

impl FromStr for LayoutMode {
    type Err = OpsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "supplied" => Ok(LayoutMode::Supplied),
            "computed" => Ok(LayoutMode::Computed),
            other => Err(OpsError::Config(format!(
                "Invalid layout mode: {} (expected supplied or computed)",
                other
            ))),
        }
    }
}

/// Configuration for history browsing sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// JSON project data file. The built-in sample is used when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_path: Option<PathBuf>,

    /// Supplied or computed commit positions.
    #[serde(default)]
    pub layout: LayoutMode,

    /// Vertical distance between branch lanes (computed layout).
    #[serde(default = "default_lane_spacing")]
    pub lane_spacing: f64,

    /// Horizontal distance between generations (computed layout).
    #[serde(default = "default_column_spacing")]
    pub column_spacing: f64,

    #[serde(default = "default_origin")]
    pub origin_x: f64,

    #[serde(default = "default_origin")]
    pub origin_y: f64,

    /// Margin added past the furthest commit for the canvas bounds.
    #[serde(default = "default_canvas_margin")]
    pub canvas_margin: f64,

    /// Reject dangling parent references instead of skipping them.
    #[serde(default = "default_true")]
    pub strict_integrity: bool,

    /// Start every tree with its root expanded.
    #[serde(default = "default_true")]
    pub expand_root_on_load: bool,

    /// Origin used to build share links.
    #[serde(default = "default_share_base_url")]
    pub share_base_url: String,

    /// Commit selected when a session opens.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_commit: Option<String>,
}

fn default_lane_spacing() -> f64 {
    70.0
}

fn default_column_spacing() -> f64 {
    100.0
}

fn default_origin() -> f64 {
    50.0
}

fn default_canvas_margin() -> f64 {
    100.0
}

fn default_true() -> bool {
    true
}

fn default_share_base_url() -> String {
    "http://localhost:3000".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: std::env::var(DATA_PATH_ENV).ok().map(PathBuf::from),
            layout: LayoutMode::default(),
            lane_spacing: default_lane_spacing(),
            column_spacing: default_column_spacing(),
            origin_x: default_origin(),
            origin_y: default_origin(),
            canvas_margin: default_canvas_margin(),
            strict_integrity: true,
            expand_root_on_load: true,
            share_base_url: std::env::var(SHARE_URL_ENV)
                .unwrap_or_else(|_| default_share_base_url()),
            initial_commit: None,
        }
    }
}

impl Config {
    /// Keys accepted by [`Config::get`] and [`Config::set`].
    pub const KEYS: &'static [&'static str] = &[
        "data_path",
        "layout",
        "lane_spacing",
        "column_spacing",
        "origin_x",
        "origin_y",
        "canvas_margin",
        "strict_integrity",
        "expand_root_on_load",
        "share_base_url",
        "initial_commit",
    ];

    /// Load configuration from disk with environment overrides.
    pub fn load() -> OpsResult<Self> {
        let config = match Self::config_file_path() {
            Some(path) if path.exists() => {
                let contents = std::fs::read_to_string(&path)?;
                serde_json::from_str(&contents)?
            }
            _ => Self::default(),
        };

        // Override with environment variables
        let config = Self {
            data_path: std::env::var(DATA_PATH_ENV)
                .ok()
                .map(PathBuf::from)
                .or(config.data_path),
            share_base_url: std::env::var(SHARE_URL_ENV).unwrap_or(config.share_base_url),
            ..config
        };

        Ok(config)
    }

    /// Save configuration to disk.
    pub fn save(&self) -> OpsResult<()> {
        if let Some(path) = Self::config_file_path() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let contents = serde_json::to_string_pretty(self)?;
            std::fs::write(&path, contents)?;
        }
        Ok(())
    }

    /// Get the path to the configuration file.
    pub fn config_file_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            return Some(PathBuf::from(path));
        }
        ProjectDirs::from("com", "cad-history", "cad-history")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Lane layout parameters.
    pub fn layout_config(&self) -> LaneLayoutConfig {
        LaneLayoutConfig {
            origin_x: self.origin_x,
            origin_y: self.origin_y,
            column_spacing: self.column_spacing,
            lane_spacing: self.lane_spacing,
        }
    }

    /// Options for loading the commit graph.
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            policy: if self.strict_integrity {
                LoadPolicy::Strict
            } else {
                LoadPolicy::Lenient
            },
            positions: match self.layout {
                LayoutMode::Supplied => PositionSource::Supplied,
                LayoutMode::Computed => PositionSource::Computed(self.layout_config()),
            },
        }
    }

    /// Get a configuration value by key.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "data_path" => self.data_path.as_ref().map(|p| p.display().to_string()),
            "layout" => Some(self.layout.to_string()),
            "lane_spacing" => Some(self.lane_spacing.to_string()),
            "column_spacing" => Some(self.column_spacing.to_string()),
            "origin_x" => Some(self.origin_x.to_string()),
            "origin_y" => Some(self.origin_y.to_string()),
            "canvas_margin" => Some(self.canvas_margin.to_string()),
            "strict_integrity" => Some(self.strict_integrity.to_string()),
            "expand_root_on_load" => Some(self.expand_root_on_load.to_string()),
            "share_base_url" => Some(self.share_base_url.clone()),
            "initial_commit" => self.initial_commit.clone(),
            _ => None,
        }
    }

    /// Set a configuration value by key.
    pub fn set(&mut self, key: &str, value: &str) -> OpsResult<()> {
        match key {
            "data_path" => self.data_path = Some(PathBuf::from(value)),
            "layout" => self.layout = value.parse()?,
            "lane_spacing" => self.lane_spacing = parse_spacing(value)?,
            "column_spacing" => self.column_spacing = parse_spacing(value)?,
            "origin_x" => self.origin_x = parse_number(value)?,
            "origin_y" => self.origin_y = parse_number(value)?,
            "canvas_margin" => self.canvas_margin = parse_spacing(value)?,
            "strict_integrity" => self.strict_integrity = parse_bool(value)?,
            "expand_root_on_load" => self.expand_root_on_load = parse_bool(value)?,
            "share_base_url" => self.share_base_url = value.trim_end_matches('/').to_string(),
            "initial_commit" => {
                self.initial_commit = (!value.is_empty()).then(|| value.to_string());
            }
            _ => {
                return Err(OpsError::Config(format!("Unknown config key: {}", key)));
            }
        }
        Ok(())
    }
}

fn parse_number(value: &str) -> OpsResult<f64> {
    value
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| OpsError::Config(format!("Invalid number: {}", value)))
}

fn parse_spacing(value: &str) -> OpsResult<f64> {
    let n = parse_number(value)?;
    if n < 0.0 {
        return Err(OpsError::Config(format!("Must not be negative: {}", value)));
    }
    Ok(n)
}

fn parse_bool(value: &str) -> OpsResult<bool> {
    value
        .parse()
        .map_err(|_| OpsError::Config(format!("Invalid boolean: {}", value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_take_defaults() {
        let config: Config = serde_json::from_str(r#"{"layout":"computed"}"#).unwrap();

        assert_eq!(config.layout, LayoutMode::Computed);
        assert_eq!(config.lane_spacing, 70.0);
        assert_eq!(config.canvas_margin, 100.0);
        assert!(config.strict_integrity);
        assert!(config.expand_root_on_load);
        assert_eq!(config.share_base_url, "http://localhost:3000");
    }

    #[test]
    fn test_set_and_get_round_trip() {
        let mut config: Config = serde_json::from_str("{}").unwrap();

        config.set("layout", "Computed").unwrap();
        config.set("lane_spacing", "80").unwrap();
        config.set("strict_integrity", "false").unwrap();
        config.set("share_base_url", "https://cad.example.com/").unwrap();

        assert_eq!(config.get("layout").as_deref(), Some("computed"));
        assert_eq!(config.get("lane_spacing").as_deref(), Some("80"));
        assert_eq!(config.get("strict_integrity").as_deref(), Some("false"));
        assert_eq!(
            config.get("share_base_url").as_deref(),
            Some("https://cad.example.com")
        );
        assert_eq!(config.get("initial_commit"), None);
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config: Config = serde_json::from_str("{}").unwrap();

        assert!(config.set("lane_spacing", "-5").is_err());
        assert!(config.set("origin_x", "wide").is_err());
        assert!(config.set("layout", "radial").is_err());
        assert!(config.set("no_such_key", "1").is_err());
    }

    #[test]
    fn test_load_options_follow_config() {
        let mut config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config.load_options(), LoadOptions::default());

        config.strict_integrity = false;
        config.layout = LayoutMode::Computed;
        config.lane_spacing = 40.0;

        let options = config.load_options();
        assert_eq!(options.policy, LoadPolicy::Lenient);
        match options.positions {
            PositionSource::Computed(layout) => assert_eq!(layout.lane_spacing, 40.0),
            PositionSource::Supplied => panic!("expected computed positions"),
        }
    }

    #[test]
    fn test_every_key_is_gettable_or_optional() {
        let config: Config = serde_json::from_str("{}").unwrap();
        for key in Config::KEYS {
            if !matches!(*key, "data_path" | "initial_commit") {
                assert!(config.get(key).is_some(), "missing value for {key}");
            }
        }
    }
}
