use crate::config::Settings;
use anyhow::{Context, Result};
use clap::{Args, Subcommand, ValueEnum};

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration after all layers are merged
    Show {
        /// Output format
        #[arg(long, value_enum, default_value_t = ConfigFormat::Toml)]
        format: ConfigFormat,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConfigFormat {
    Toml,
    Json,
    Yaml,
}

pub async fn execute(args: ConfigArgs, settings: &Settings) -> Result<()> {
    match args.command {
        ConfigCommand::Show { format } => {
            let rendered = render(settings, format)?;
            println!("{}", rendered.trim_end());
        }
    }
    Ok(())
}

pub fn render(settings: &Settings, format: ConfigFormat) -> Result<String> {
    match format {
        ConfigFormat::Toml => {
            toml::to_string_pretty(settings).context("Failed to serialize configuration as TOML")
        }
        ConfigFormat::Json => serde_json::to_string_pretty(settings)
            .context("Failed to serialize configuration as JSON"),
        ConfigFormat::Yaml => {
            serde_yml::to_string(settings).context("Failed to serialize configuration as YAML")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_toml() {
        let settings = Settings::defaults().unwrap();
        let rendered = render(&settings, ConfigFormat::Toml).unwrap();
        assert!(rendered.contains("[veracrypt]"));
        assert!(rendered.contains("program = \"veracrypt\""));
    }

    #[test]
    fn test_render_json_round_trips_values() {
        let settings = Settings::defaults().unwrap();
        let rendered = render(&settings, ConfigFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value["entropy"]["bytes"], 300);
        assert_eq!(value["pass"]["program"], "pass");
    }

    #[test]
    fn test_render_yaml() {
        let settings = Settings::defaults().unwrap();
        let rendered = render(&settings, ConfigFormat::Yaml).unwrap();
        assert!(rendered.contains("update_entry_on_change: true"));
    }
}
