use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigResult;
use std::path::Path;

/// Settings file picked up when no `--config` is given
pub const DEFAULT_CONFIG_PATH: &str = "job-harvest.toml";

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use job_harvest::config::load_config;
///
/// let config = load_config(Path::new("job-harvest.toml")).unwrap();
/// println!("Max results: {}", config.crawler.max_results);
/// ```
pub fn load_config(path: &Path) -> ConfigResult<Config> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parses and validates configuration from TOML text
pub fn parse_config(content: &str) -> ConfigResult<Config> {
    let config: Config = toml::from_str(content)?;
    validate(&config)?;
    Ok(config)
}

/// Loads the configuration for a run
///
/// An explicit path must load. Without one, the default settings file is used
/// if it exists, otherwise built-in defaults apply.
pub fn load_config_or_default(explicit: Option<&Path>) -> ConfigResult<Config> {
    match explicit {
        Some(path) => load_config(path),
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_PATH);
            if default_path.exists() {
                tracing::debug!("Using settings from {}", default_path.display());
                load_config(default_path)
            } else {
                Ok(Config::default())
            }
        }
    }
}
