//! Configuration management commands

use std::path::PathBuf;

use anyhow::Result;
use clap::Subcommand;
use serde::Serialize;

use crate::cli::output::{print_formatted, print_success, OutputFormat};
use crate::config::Config;

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Get a specific config value
    Get {
        /// Config key (e.g., "ui.theme", "download.file_name")
        key: String,
    },

    /// Set a config value
    Set {
        /// Config key (e.g., "ui.theme", "download.file_name")
        key: String,

        /// Value to set
        value: String,
    },

    /// Show config file path
    Path,

    /// Restore default settings
    Reset,
}

#[derive(Serialize)]
struct ConfigPathResult {
    path: String,
    exists: bool,
}

#[derive(Serialize)]
struct ConfigValue<'a> {
    key: &'a str,
    value: String,
}

pub async fn run(command: ConfigCommands, format: OutputFormat, quiet: bool) -> Result<()> {
    match command {
        ConfigCommands::Show => show(format),
        ConfigCommands::Get { key } => get(&key, format),
        ConfigCommands::Set { key, value } => set(&key, &value, quiet),
        ConfigCommands::Path => path(format),
        ConfigCommands::Reset => reset(quiet),
    }
}

fn show(format: OutputFormat) -> Result<()> {
    let config = Config::load()?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&config)?),
        OutputFormat::Text => println!("{}", toml::to_string_pretty(&config)?),
    }

    Ok(())
}

fn get(key: &str, format: OutputFormat) -> Result<()> {
    let config = Config::load()?;
    let value = get_config_value(&config, key)?;

    print_formatted(&ConfigValue { key, value }, format, |v| v.value.clone())
}

fn get_config_value(config: &Config, key: &str) -> Result<String> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["ui", "theme"] => Ok(config.ui.theme.key().to_string()),
        ["ui", "locale"] => Ok(config.ui.locale.code().to_string()),
        ["download", "file_name"] => Ok(config.download.file_name.clone()),
        ["download", "remember_directory"] => Ok(config.download.remember_directory.to_string()),
        ["download", "last_directory"] => Ok(config
            .download
            .last_directory
            .as_ref()
            .map(|dir| dir.display().to_string())
            .unwrap_or_else(|| "<not set>".to_string())),
        _ => anyhow::bail!("Unknown config key: {}", key),
    }
}

fn set(key: &str, value: &str, quiet: bool) -> Result<()> {
    let mut config = Config::load()?;

    set_config_value(&mut config, key, value)?;
    config.save()?;

    print_success(&format!("Set {} = {}", key, get_config_value(&config, key)?), quiet);
    Ok(())
}

fn set_config_value(config: &mut Config, key: &str, value: &str) -> Result<()> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["ui", "theme"] => {
            config.ui.theme = value.parse()?;
        }
        ["ui", "locale"] => {
            config.ui.locale = value.parse()?;
        }
        ["download", "file_name"] => {
            config.download.set_file_name(value)?;
        }
        ["download", "remember_directory"] => {
            config.download.remember_directory = value.parse()?;
        }
        ["download", "last_directory"] => {
            config.download.last_directory = match value.trim() {
                "" => None,
                dir => Some(PathBuf::from(dir)),
            };
        }
        _ => anyhow::bail!("Unknown or read-only config key: {}", key),
    }

    Ok(())
}

fn path(format: OutputFormat) -> Result<()> {
    let path = Config::config_path()?;
    let exists = path.exists();

    let result = ConfigPathResult {
        path: path.to_string_lossy().to_string(),
        exists,
    };

    print_formatted(&result, format, |r| {
        format!("{}{}", r.path, if r.exists { "" } else { " (not found)" })
    })
}

fn reset(quiet: bool) -> Result<()> {
    Config::default().save()?;
    print_success("Configuration reset to defaults", quiet);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Locale;
    use crate::ui::theme::ThemePreset;

    #[test]
    fn test_get_defaults() {
        let config = Config::default();
        assert_eq!(get_config_value(&config, "ui.theme").unwrap(), "indigo");
        assert_eq!(get_config_value(&config, "ui.locale").unwrap(), "en");
        assert_eq!(get_config_value(&config, "download.file_name").unwrap(), "qr-code.png");
        assert_eq!(get_config_value(&config, "download.last_directory").unwrap(), "<not set>");
        assert!(get_config_value(&config, "ui.font").is_err());
    }

    #[test]
    fn test_set_values() {
        let mut config = Config::default();

        set_config_value(&mut config, "ui.theme", "paper").unwrap();
        set_config_value(&mut config, "ui.locale", "ja").unwrap();
        set_config_value(&mut config, "download.remember_directory", "false").unwrap();
        set_config_value(&mut config, "download.last_directory", "/tmp/qr").unwrap();

        assert_eq!(config.ui.theme, ThemePreset::Paper);
        assert_eq!(config.ui.locale, Locale::Ja);
        assert!(!config.download.remember_directory);
        assert_eq!(config.download.last_directory, Some(PathBuf::from("/tmp/qr")));

        set_config_value(&mut config, "download.last_directory", "").unwrap();
        assert!(config.download.last_directory.is_none());
    }

    #[test]
    fn test_set_file_name_adds_extension() {
        let mut config = Config::default();
        set_config_value(&mut config, "download.file_name", "ticket").unwrap();
        assert_eq!(config.download.file_name, "ticket.png");

        assert!(set_config_value(&mut config, "download.file_name", "  ").is_err());
        assert!(set_config_value(&mut config, "download.file_name", "a/b.png").is_err());
        assert_eq!(config.download.file_name, "ticket.png");
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = Config::default();
        assert!(set_config_value(&mut config, "ui.theme", "neon").is_err());
        assert!(set_config_value(&mut config, "download.remember_directory", "maybe").is_err());
        assert!(set_config_value(&mut config, "nope", "1").is_err());
    }
}
