use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::evaluator::{RingClosure, Validator};

fn default_strict_rings() -> bool {
    false
}
fn default_verbose() -> bool {
    false
}

#[derive(Debug, Deserialize, Default)]
pub struct FileConfig {
    /// Reject open polygon rings instead of closing them
    #[serde(default = "default_strict_rings")]
    pub strict_rings: bool,
    #[serde(default = "default_verbose")]
    pub verbose: bool,
    #[serde(default)]
    pub nominatim: Option<NominatimConfig>,
}

fn default_nominatim_url() -> String {
    "https://nominatim.openstreetmap.org/search".to_string()
}

fn default_user_agent() -> String {
    concat!("plugit-geofence/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_rate_limit_ms() -> u64 {
    1000
}

#[derive(Debug, Deserialize, Clone)]
pub struct NominatimConfig {
    #[serde(default = "default_nominatim_url")]
    pub url: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Pause before each request (Nominatim allows 1 request per second)
    #[serde(default = "default_rate_limit_ms")]
    pub rate_limit_ms: u64,
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self {
            url: default_nominatim_url(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            rate_limit_ms: default_rate_limit_ms(),
        }
    }
}

impl FileConfig {
    /// Search the usual locations and use the first config that parses
    pub fn load() -> Option<Self> {
        for path in get_config_paths() {
            if path.exists()
                && let Ok(contents) = std::fs::read_to_string(&path)
            {
                match toml::from_str(&contents) {
                    Ok(config) => return Some(config),
                    Err(e) => {
                        eprintln!("Warning: Failed to parse config file {:?}: {}", path, e);
                    }
                }
            }
        }
        None
    }

    /// Load an explicitly named config file
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    pub fn ring_closure(&self) -> RingClosure {
        if self.strict_rings {
            RingClosure::Reject
        } else {
            RingClosure::AutoClose
        }
    }

    pub fn validator(&self) -> Validator {
        Validator::new().with_ring_closure(self.ring_closure())
    }

    pub fn nominatim(&self) -> NominatimConfig {
        self.nominatim.clone().unwrap_or_default()
    }
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    paths.push(PathBuf::from("plugit-geofence.toml"));
    paths.push(PathBuf::from(".plugit-geofence.toml"));

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("plugit-geofence").join("config.toml"));
        paths.push(config_dir.join("plugit-geofence.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".plugit-geofence.toml"));
    }

    paths
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert!(!config.strict_rings);
        assert!(!config.verbose);
        assert_eq!(config.ring_closure(), RingClosure::AutoClose);

        let nominatim = config.nominatim();
        assert_eq!(nominatim.url, "https://nominatim.openstreetmap.org/search");
        assert_eq!(nominatim.timeout_secs, 30);
        assert_eq!(nominatim.rate_limit_ms, 1000);
        assert!(nominatim.user_agent.starts_with("plugit-geofence/"));
    }

    #[test]
    fn test_parse_full_config() {
        let config: FileConfig = toml::from_str(
            r#"
            strict_rings = true
            verbose = true

            [nominatim]
            url = "http://localhost:8080/search"
            timeout_secs = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.ring_closure(), RingClosure::Reject);
        assert_eq!(config.validator().ring_closure(), RingClosure::Reject);
        assert!(config.verbose);

        let nominatim = config.nominatim();
        assert_eq!(nominatim.url, "http://localhost:8080/search");
        assert_eq!(nominatim.timeout_secs, 5);
        assert_eq!(nominatim.rate_limit_ms, 1000);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "strict_rings = true").unwrap();

        let config = FileConfig::load_from(file.path()).unwrap();
        assert!(config.strict_rings);
    }

    #[test]
    fn test_load_from_missing_or_invalid() {
        let dir = tempfile::tempdir().unwrap();
        assert!(FileConfig::load_from(&dir.path().join("absent.toml")).is_err());

        let bad = dir.path().join("bad.toml");
        std::fs::write(&bad, "strict_rings = \"sometimes\"").unwrap();
        assert!(FileConfig::load_from(&bad).is_err());
    }
}
