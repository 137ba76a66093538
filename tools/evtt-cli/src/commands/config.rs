//! Show or initialize configuration.

use evtt_common::config::{config_file_path, AppConfig};

pub fn run(init: bool, config: &AppConfig) -> anyhow::Result<()> {
    if init {
        let path = AppConfig::default()
            .save()
            .map_err(|e| anyhow::anyhow!("Failed to write config: {e}"))?;
        println!("Wrote default configuration to {}", path.display());
        return Ok(());
    }

    println!("Configuration: {}", config_file_path().display());
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}
