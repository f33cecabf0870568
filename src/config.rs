use crate::error::{Result, SkycastError};
use dialoguer::Input;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    pub location: LocationConfig,
    #[serde(default)]
    pub openweathermap: Option<OpenWeatherMapConfig>,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LocationConfig {
    /// Fallback city when a fetch fails or nothing else is configured.
    pub default_city: String,
    /// Stand-in for device geolocation; when both are set the startup
    /// fetch queries by coordinates.
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            default_city: "London".into(),
            latitude: None,
            longitude: None,
        }
    }
}

#[derive(Clone, Deserialize, Serialize)]
pub struct OpenWeatherMapConfig {
    pub api_key: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl std::fmt::Debug for OpenWeatherMapConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherMapConfig")
            .field("api_key", &"[REDACTED]")
            .field("enabled", &self.enabled)
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UiConfig {
    /// Minutes between automatic refreshes of the current location.
    /// 0 disables auto-refresh.
    #[serde(default)]
    pub refresh_interval_mins: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            refresh_interval_mins: 0,
        }
    }
}

impl Config {
    pub fn load(config_override: Option<PathBuf>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) => p,
            None => Self::find_config_path()?,
        };

        if !config_path.exists() {
            return Err(SkycastError::Config(format!(
                "Config file not found at {:?}. Run `skycast init` to set up.",
                config_path
            )));
        }

        let config_str = std::fs::read_to_string(&config_path)
            .map_err(|e| SkycastError::Config(format!("Failed to read config: {}", e)))?;

        // Substitute environment variables
        let config_str = Self::substitute_env_vars(&config_str);

        let config: Config = serde_yaml::from_str(&config_str)
            .map_err(|e| SkycastError::Config(format!("Failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Search for config.yaml in standard locations.
    /// Returns the path of the first found config, or the XDG default path if none found.
    fn find_config_path() -> Result<PathBuf> {
        // Try current directory first
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Ok(local_config);
        }

        // Try XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("skycast").join("config.yaml");
            if xdg_config.exists() {
                return Ok(xdg_config);
            }
        }

        // Return XDG path as the default (will trigger "not found" in load)
        let default_path = dirs::config_dir()
            .ok_or_else(|| SkycastError::Config("Cannot determine config directory".into()))?
            .join("skycast")
            .join("config.yaml");
        Ok(default_path)
    }

    /// Returns true if a config file can be found in any standard location.
    pub fn exists(config_override: Option<&PathBuf>) -> bool {
        match config_override {
            Some(p) => p.exists(),
            None => Self::find_config_path()
                .map(|p| p.exists())
                .unwrap_or(false),
        }
    }

    /// Default path for writing new config files (~/.config/skycast/config.yaml).
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| SkycastError::Config("Cannot determine config directory".into()))?
            .join("skycast");
        Ok(config_dir.join("config.yaml"))
    }

    /// Run interactive setup prompts and write config to disk.
    /// Returns the loaded Config and the path it was written to.
    pub fn setup_interactive() -> Result<(Self, PathBuf)> {
        println!();
        println!("No configuration found. Let's set up skycast!");
        println!();

        println!("Location");
        let default_city: String = Input::new()
            .with_prompt("  Default city")
            .default("London".into())
            .interact_text()
            .map_err(|e| SkycastError::Config(format!("Input error: {}", e)))?;

        let latitude: String = Input::new()
            .with_prompt("  Latitude (blank to search by city)")
            .default(String::new())
            .allow_empty(true)
            .interact_text()
            .map_err(|e| SkycastError::Config(format!("Input error: {}", e)))?;

        let longitude: String = if latitude.is_empty() {
            String::new()
        } else {
            Input::new()
                .with_prompt("  Longitude")
                .default(String::new())
                .allow_empty(true)
                .interact_text()
                .map_err(|e| SkycastError::Config(format!("Input error: {}", e)))?
        };

        println!();

        println!("OpenWeatherMap (leave API key blank for demo data)");
        let api_key: String = Input::new()
            .with_prompt("  API key")
            .default(String::new())
            .allow_empty(true)
            .interact_text()
            .map_err(|e| SkycastError::Config(format!("Input error: {}", e)))?;

        let openweathermap = if api_key.is_empty() {
            None
        } else {
            Some(OpenWeatherMapConfig {
                api_key,
                enabled: true,
            })
        };

        println!();

        let config = Config {
            location: LocationConfig {
                default_city,
                latitude: latitude.parse().ok(),
                longitude: longitude.parse().ok(),
            },
            openweathermap,
            ui: UiConfig::default(),
        };

        // Write to default config path
        let config_path = Self::default_config_path()?;
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(&config)
            .map_err(|e| SkycastError::Config(format!("Failed to serialize config: {}", e)))?;

        // Write with a header comment
        let content = format!(
            "# skycast Configuration\n# Generated by `skycast init`\n# Environment variable substitution (${{VAR}}) is supported.\n\n{}",
            yaml
        );
        std::fs::write(&config_path, content)?;

        println!("Configuration saved to {}", config_path.display());
        println!();

        Ok((config, config_path))
    }

    fn substitute_env_vars(content: &str) -> String {
        let mut result = content.to_string();

        // Find all ${VAR_NAME} patterns and substitute
        let re = regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap();

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            if let Ok(value) = std::env::var(var_name) {
                result = result.replace(placeholder, &value);
            }
        }

        result
    }

    pub fn data_dir(data_dir_override: Option<&PathBuf>) -> Result<PathBuf> {
        // CLI override takes priority
        if let Some(dir) = data_dir_override {
            std::fs::create_dir_all(dir)?;
            return Ok(dir.clone());
        }

        // Then check env var
        if let Ok(dir) = std::env::var("SKYCAST_DATA_DIR") {
            let p = PathBuf::from(dir);
            std::fs::create_dir_all(&p)?;
            return Ok(p);
        }

        // Use XDG data directory
        let data_dir = dirs::data_dir()
            .ok_or_else(|| SkycastError::Config("Cannot determine data directory".into()))?
            .join("skycast");

        std::fs::create_dir_all(&data_dir)?;
        Ok(data_dir)
    }

    pub fn db_path(data_dir_override: Option<&PathBuf>) -> Result<PathBuf> {
        Ok(Self::data_dir(data_dir_override)?.join("skycast.db"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_yaml() {
        let yaml = "location:\n  default_city: Tokyo\n";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.location.default_city, "Tokyo");
        assert!(config.openweathermap.is_none());
        assert_eq!(config.ui.refresh_interval_mins, 0);
    }

    #[test]
    fn api_key_is_redacted_in_debug() {
        let config = OpenWeatherMapConfig {
            api_key: "secret".into(),
            enabled: true,
        };
        let debug = format!("{:?}", config);
        assert!(!debug.contains("secret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn env_substitution_replaces_known_vars() {
        std::env::set_var("SKYCAST_TEST_CITY", "Sydney");
        let out =
            Config::substitute_env_vars("location:\n  default_city: ${SKYCAST_TEST_CITY}\n");
        assert!(out.contains("Sydney"));

        // Unset vars are left as-is
        let out = Config::substitute_env_vars("key: ${SKYCAST_TEST_UNSET_VAR}\n");
        assert!(out.contains("${SKYCAST_TEST_UNSET_VAR}"));
    }
}
