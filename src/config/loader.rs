use anyhow::{Context, Result};
use figment::{
    Figment,
    providers::{Env, Format, Json, Toml, Yaml},
};
use std::path::{Path, PathBuf};

use super::Settings;

// Embed the default config at compile time
const DEFAULT_CONFIG: &str = include_str!("../../default-config.toml");

impl Settings {
    /// Built-in defaults only, ignoring user files and the environment
    pub fn defaults() -> Result<Self> {
        Figment::new()
            .merge(Toml::string(DEFAULT_CONFIG))
            .extract()
            .context("Embedded default configuration is invalid")
    }

    pub fn load_with_custom_config(custom_config: Option<&str>) -> Result<Self> {
        if let Some(path) = custom_config {
            if !Path::new(path).is_file() {
                anyhow::bail!("Config file not found: {path}");
            }
        }

        Self::figment(custom_config)
            .extract()
            .context("Failed to load vctools configuration")
    }

    fn figment(custom_config: Option<&str>) -> Figment {
        let mut figment = Figment::new().merge(Toml::string(DEFAULT_CONFIG));

        // A custom config replaces the user config entirely
        if let Some(custom_path) = custom_config {
            figment = match extension_of(custom_path).as_str() {
                "json" => figment.merge(Json::file(custom_path)),
                "yaml" | "yml" => figment.merge(Yaml::file(custom_path)),
                _ => figment.merge(Toml::file(custom_path)),
            };
        } else if let Some(base) = user_config_base() {
            figment = figment
                .merge(Toml::file(base.with_extension("toml")))
                .merge(Json::file(base.with_extension("json")))
                .merge(Yaml::file(base.with_extension("yaml")))
                .merge(Yaml::file(base.with_extension("yml")));
        }

        // Environment variables always have highest priority
        figment.merge(Env::prefixed("VCTOOLS_").split("__"))
    }
}

/// `~/.config/vctools/config` without extension
fn user_config_base() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("vctools").join("config"))
}

fn extension_of(path: &str) -> String {
    Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_lowercase()
}
