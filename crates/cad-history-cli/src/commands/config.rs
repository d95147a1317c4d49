//! Config command implementation.
//!
//! Manages CLI configuration.

use anyhow::Result;
use cad_history_ops::Config;

/// Show current configuration.
pub fn show(config: &Config) -> Result<()> {
    println!("CAD History Configuration");
    println!("{:-<40}", "");

    for key in Config::KEYS {
        println!(
            "{:<22}{}",
            format!("{}:", key),
            config.get(key).unwrap_or_else(|| "(not set)".to_string())
        );
    }

    if let Some(config_path) = Config::config_file_path() {
        println!("\nConfig file: {}", config_path.display());
    }

    Ok(())
}

/// Set a configuration value.
pub fn set(config: &mut Config, key: &str, value: &str) -> Result<()> {
    config.set(key, value)?;
    config.save()?;
    println!(
        "Set {} to: {}",
        key,
        config.get(key).unwrap_or_else(|| "(not set)".to_string())
    );
    Ok(())
}

/// Get a configuration value.
pub fn get(config: &Config, key: &str) -> Result<()> {
    if !Config::KEYS.contains(&key) {
        anyhow::bail!(
            "Unknown config key: {}. Valid keys: {}",
            key,
            Config::KEYS.join(", ")
        );
    }

    println!(
        "{}",
        config.get(key).unwrap_or_else(|| "(not set)".to_string())
    );
    Ok(())
}

/// Print the config file location.
pub fn path() -> Result<()> {
    match Config::config_file_path() {
        Some(path) => println!("{}", path.display()),
        None => anyhow::bail!("No config directory available on this platform"),
    }
    Ok(())
}

/// Reset configuration to defaults.
pub fn reset() -> Result<()> {
    let config = Config::default();
    config.save()?;
    println!("Configuration reset to defaults");
    Ok(())
}
