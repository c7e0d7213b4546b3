use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::core::CorridorEngine;
use crate::models::TierRadiusTable;

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub corridor: CorridorSettings,
    #[serde(default)]
    pub catalog: CatalogSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }

#[derive(Debug, Clone, Deserialize)]
pub struct CorridorSettings {
    /// Radius of tier `i + 1` at index `i`
    #[serde(default = "default_tier_radii_km")]
    pub tier_radii_km: Vec<f64>,
    #[serde(default = "default_margin_km")]
    pub margin_km: f64,
    #[serde(default = "default_parallel_threshold")]
    pub parallel_threshold: usize,
}

impl Default for CorridorSettings {
    fn default() -> Self {
        Self {
            tier_radii_km: default_tier_radii_km(),
            margin_km: default_margin_km(),
            parallel_threshold: default_parallel_threshold(),
        }
    }
}

fn default_tier_radii_km() -> Vec<f64> { vec![80.0, 30.0, 8.0] }
fn default_margin_km() -> f64 { crate::core::filters::DEFAULT_MARGIN_KM }
fn default_parallel_threshold() -> usize { crate::core::engine::DEFAULT_PARALLEL_THRESHOLD }

impl CorridorSettings {
    /// Build the engine, rejecting negative or non-finite distances
    pub fn to_engine(&self) -> Result<CorridorEngine, ConfigError> {
        if let Some(bad) = self.tier_radii_km.iter().find(|r| !r.is_finite() || **r < 0.0) {
            return Err(ConfigError::Message(format!(
                "corridor.tier_radii_km entries must be finite and non-negative, got {}",
                bad
            )));
        }
        if !self.margin_km.is_finite() || self.margin_km < 0.0 {
            return Err(ConfigError::Message(format!(
                "corridor.margin_km must be finite and non-negative, got {}",
                self.margin_km
            )));
        }

        Ok(CorridorEngine::new(TierRadiusTable::from_radii(&self.tier_radii_km), self.margin_km)
            .with_parallel_threshold(self.parallel_threshold))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogSettings {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
    #[serde(default = "default_max_datasets")]
    pub max_datasets: u64,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            ttl_secs: default_ttl_secs(),
            max_datasets: default_max_datasets(),
        }
    }
}

fn default_data_dir() -> String { "data".to_string() }
fn default_ttl_secs() -> u64 { 3600 }
fn default_max_datasets() -> u64 { 32 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with CORRIDOR_)
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., CORRIDOR__SERVER__PORT -> server.port
            .add_source(environment())
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?
            .try_deserialize()
    }
}

fn environment() -> Environment {
    Environment::with_prefix("CORRIDOR")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("corridor.tier_radii_km")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_corridor_settings() {
        let corridor = CorridorSettings::default();
        assert_eq!(corridor.tier_radii_km, vec![80.0, 30.0, 8.0]);
        assert_eq!(corridor.margin_km, 50.0);

        let engine = corridor.to_engine().unwrap();
        assert_eq!(engine.buffer_km(), 130.0);
    }

    #[test]
    fn test_default_logging() {
        let level = default_log_level();
        let format = default_log_format();
        assert_eq!(level, "info");
        assert_eq!(format, "json");
    }

    #[test]
    fn test_negative_radius_rejected() {
        let corridor = CorridorSettings {
            tier_radii_km: vec![80.0, -1.0],
            ..CorridorSettings::default()
        };
        assert!(corridor.to_engine().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(
            file,
            "[server]\nport = 9090\n\n[corridor]\ntier_radii_km = [100.0, 40.0]\nmargin_km = 25.0\n"
        )
        .unwrap();

        let settings = Settings::load_from(file.path()).unwrap();

        assert_eq!(settings.server.port, 9090);
        assert_eq!(settings.corridor.tier_radii_km, vec![100.0, 40.0]);
        assert_eq!(settings.catalog.data_dir, "data");
        assert_eq!(settings.corridor.to_engine().unwrap().buffer_km(), 125.0);
    }
}
