use std::env;

use super::suite_config::Config;

pub struct AppConfig {
    pub config: Config,
    pub max_name_width: usize,
}

/// Load the application configuration from a YAML file and environment variables.
/// This function reads the configuration file specified by the `CONFIG_FILE` environment variable,
/// parses it into a `Config` struct, and overrides certain values with environment variables.
/// `SMOKEBOX_BASE_URL`, when set, points every suite at the same deployment so
/// one config file can be reused across environments.
pub fn load_config() -> AppConfig {
    let config_file_location = env::var("CONFIG_FILE").unwrap_or_else(|_| "config.yml".to_string());
    let config_str =
        std::fs::read_to_string(&config_file_location).expect("Failed to read config.yml");

    let mut config: Config = serde_yaml::from_str(&config_str).expect("Invalid YAML");
    assert!(!config.is_empty(), "Config contains no suites");

    if let Ok(base_url) = env::var("SMOKEBOX_BASE_URL") {
        log::info!("Overriding suite base URLs with {base_url}");
        for suite in config.values_mut() {
            suite.base_url = base_url.clone();
        }
    }

    let max_name_width = config
        .values()
        .flat_map(|suite| suite.checks.iter())
        .map(|check| check.name.chars().count())
        .max()
        .unwrap_or(10);

    AppConfig {
        config,
        max_name_width,
    }
}
