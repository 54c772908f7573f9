//! `followup config` - print the effective configuration.

use std::path::Path;

use followup_infra::config::database_url;
use followup_types::config::AppConfig;

/// Print the configuration after defaults and file values are merged.
///
/// Only the *name* of the API key variable is shown, plus whether it is set.
pub fn show_config(config: &AppConfig, data_dir: &Path, json: bool) -> anyhow::Result<()> {
    let db_url = database_url(config, data_dir);
    let key_set = config.model.api_key_env.is_empty()
        || std::env::var(&config.model.api_key_env).is_ok_and(|v| !v.trim().is_empty());

    if json {
        let out = serde_json::json!({
            "data_dir": data_dir.display().to_string(),
            "database_url": db_url,
            "api_key_set": key_set,
            "config": config,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} {}",
        console::style("Data dir:").bold(),
        console::style(data_dir.display()).cyan()
    );
    println!("  {} {}", console::style("Database:").bold(), db_url);
    let key_status = if key_set {
        console::style("set").green()
    } else {
        console::style("missing").red()
    };
    println!(
        "  {} {} ({})",
        console::style("API key:").bold(),
        config.model.api_key_env,
        key_status
    );
    println!();
    println!("{}", toml::to_string_pretty(config)?);

    Ok(())
}
