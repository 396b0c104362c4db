use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

fn default_endpoint() -> String {
    "https://makeup-api.herokuapp.com/api/v1/products.json".to_string()
}

fn default_brand() -> Option<String> {
    Some("maybelline".to_string())
}

#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct Config {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Brand filter appended to the catalog request. `None` fetches the
    /// unfiltered list.
    #[serde(default = "default_brand")]
    pub brand: Option<String>,

    #[serde(default)]
    pub allow_insecure_certs: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            brand: default_brand(),
            allow_insecure_certs: false,
        }
    }
}

impl Config {
    fn get_path() -> Result<PathBuf> {
        if let Some(proj_dirs) = ProjectDirs::from("org", "maqui", "maqui") {
            let config_dir = proj_dirs.config_dir();
            if !config_dir.exists() {
                fs::create_dir_all(config_dir)?;
            }
            return Ok(config_dir.join("config.toml"));
        }
        Err(anyhow::anyhow!("Could not determine config path"))
    }

    /// Load the config file, or fall back to the built-in defaults so the
    /// app runs unconfigured.
    pub fn load_or_default() -> Self {
        match Self::get_path() {
            Ok(path) if path.exists() => fs::read_to_string(path)
                .ok()
                .and_then(|contents| toml::from_str(&contents).ok())
                .unwrap_or_default(),
            _ => Self::default(),
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::get_path()?;
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(path, toml_str)?;
        Ok(())
    }

    pub fn get_path_string() -> Result<String> {
        let path = Self::get_path()?;
        Ok(path.to_string_lossy().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_point_at_catalog() {
        let cfg = Config::default();
        assert!(cfg.endpoint.ends_with("/products.json"));
        assert_eq!(cfg.brand.as_deref(), Some("maybelline"));
        assert!(!cfg.allow_insecure_certs);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let cfg: Config = toml::from_str("brand = \"nyx\"").unwrap();
        assert_eq!(cfg.brand.as_deref(), Some("nyx"));
        assert_eq!(cfg.endpoint, default_endpoint());
    }
}
