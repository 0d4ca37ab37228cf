//! Configuration file support for Aegis.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/aegis/config.toml`.

use crate::{ChartArea, Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub chart: ChartConfig,

    #[serde(default)]
    pub assessment: AssessmentConfig,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Chart rendering defaults
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(default = "default_chart_width")]
    pub width: f64,

    #[serde(default = "default_chart_height")]
    pub height: f64,

    #[serde(default = "default_chart_margin")]
    pub margin: f64,

    #[serde(default = "default_donut_size")]
    pub donut_size: f64,

    #[serde(default = "default_palette")]
    pub palette: Vec<String>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: default_chart_width(),
            height: default_chart_height(),
            margin: default_chart_margin(),
            donut_size: default_donut_size(),
            palette: default_palette(),
        }
    }
}

impl ChartConfig {
    /// Canvas for line and bar charts from the configured defaults
    pub fn area(&self) -> ChartArea {
        ChartArea::new(self.width, self.height, self.margin)
    }

    /// Color for slice `i`, cycling through the palette
    pub fn color(&self, i: usize) -> &str {
        &self.palette[i % self.palette.len()]
    }
}

/// Assessment engine configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AssessmentConfig {
    /// Days of report history loaded for pattern recognition
    #[serde(default = "default_history_window_days")]
    pub history_window_days: i64,
}

impl Default for AssessmentConfig {
    fn default() -> Self {
        Self {
            history_window_days: default_history_window_days(),
        }
    }
}

// Default value functions
fn default_data_dir() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| {
        let home = std::env::var("HOME").expect("HOME environment variable not set");
        PathBuf::from(home).join(".local/share")
    });
    base.join("aegis")
}

fn default_chart_width() -> f64 {
    300.0
}

fn default_chart_height() -> f64 {
    150.0
}

fn default_chart_margin() -> f64 {
    20.0
}

fn default_donut_size() -> f64 {
    120.0
}

fn default_palette() -> Vec<String> {
    vec![
        "#60a5fa".into(),
        "#34d399".into(),
        "#f472b6".into(),
        "#fbbf24".into(),
        "#a78bfa".into(),
    ]
}

fn default_history_window_days() -> i64 {
    7
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| {
            let home = std::env::var("HOME").expect("HOME environment variable not set");
            PathBuf::from(home).join(".config")
        });
        base.join("aegis").join("config.toml")
    }

    /// Save the current configuration to the default path
    pub fn save(&self) -> Result<()> {
        let config_path = Self::default_config_path();
        self.save_to(&config_path)
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.chart.palette.is_empty() {
            return Err(Error::Config("chart palette must not be empty".into()));
        }
        if self.chart.margin * 2.0 >= self.chart.width
            || self.chart.margin * 2.0 >= self.chart.height
        {
            return Err(Error::Config(
                "chart margin leaves no drawable area".into(),
            ));
        }
        if self.assessment.history_window_days < 0 {
            return Err(Error::Config("history window must be non-negative".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.chart.width, 300.0);
        assert_eq!(config.chart.donut_size, 120.0);
        assert_eq!(config.assessment.history_window_days, 7);
        assert!(!config.chart.palette.is_empty());
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(config.chart.width, parsed.chart.width);
        assert_eq!(config.chart.palette, parsed.chart.palette);
        assert_eq!(
            config.assessment.history_window_days,
            parsed.assessment.history_window_days
        );
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[chart]
width = 600.0
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.chart.width, 600.0);
        assert_eq!(config.chart.height, 150.0); // default
        assert_eq!(config.assessment.history_window_days, 7); // default
    }

    #[test]
    fn test_palette_cycles() {
        let config = ChartConfig::default();
        let n = config.palette.len();
        assert_eq!(config.color(0), config.color(n));
    }

    #[test]
    fn test_invalid_margin_rejected() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[chart]
width = 30.0
margin = 20.0
"#,
        )
        .unwrap();

        let result = Config::load_from(&path);
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
