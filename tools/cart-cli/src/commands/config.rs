//! Configuration management commands.

use std::path::PathBuf;

use anyhow::{bail, Context as _, Result};
use cart_commerce::Currency;

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CliConfig, CONFIG_NAMES};
use crate::context::Context;

/// Run the config command.
pub fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Get { key } => get_config(&key, ctx),
        ConfigCommand::Set { key, value } => set_config(&key, &value, ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match ctx.config_path {
        Some(ref path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    let widget = &ctx.config.widget;
    ctx.output.info("[widget]");
    ctx.output.kv("storage_key", &widget.storage_key);
    ctx.output.kv("currency", widget.currency.code());
    ctx.output.kv("checkout_url", &widget.checkout_url);
    ctx.output.kv("confirmation_url", &widget.confirmation_url);
    ctx.output.kv("notification_ms", &widget.notification_ms.to_string());
    ctx.output.kv("validate_prices", &widget.validate_prices.to_string());

    ctx.output.info("[storage]");
    ctx.output.kv("dir", &ctx.storage_dir().display().to_string());

    ctx.output.info("[pixel]");
    ctx.output.kv("enabled", &ctx.config.pixel.enabled.to_string());
    match ctx.config.pixel.log {
        Some(ref log) => ctx.output.kv("log", &log.display().to_string()),
        None => ctx.output.kv("log", "(stderr)"),
    }

    Ok(())
}

fn get_config(key: &str, ctx: &Context) -> Result<()> {
    let value = get_config_value(&ctx.config, key)?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "key": key, "value": value }));
    } else {
        println!("{}", value);
    }

    Ok(())
}

fn set_config(key: &str, value: &str, ctx: &Context) -> Result<()> {
    let Some(ref path) = ctx.config_path else {
        bail!("No config file found. Run `cart config init` to create one.");
    };

    let mut config = CliConfig::load(path)?;
    set_config_value(&mut config, key, value)?;
    config.save(path)?;

    ctx.output.success(&format!("Set {} = {}", key, value));
    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(&config_path, generate_default_config()?)
        .with_context(|| format!("Failed to write config file: {}", config_path.display()))?;

    ctx.output
        .success(&format!("Created: {}", config_path.display()));
    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let (errors, warnings) = check_config(&ctx.config);

    if errors.is_empty() && warnings.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &errors {
        ctx.output.error(&format!("Error: {}", error));
    }

    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    if !errors.is_empty() {
        bail!("Configuration has {} error(s)", errors.len());
    }

    ctx.output.success("Configuration is valid (with warnings)");
    Ok(())
}

/// Errors and warnings for a configuration.
fn check_config(config: &CliConfig) -> (Vec<String>, Vec<String>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let widget = &config.widget;

    if widget.storage_key.trim().is_empty() {
        errors.push("widget.storage_key must not be empty".to_string());
    }
    if widget.checkout_url.trim().is_empty() {
        errors.push("widget.checkout_url must not be empty".to_string());
    }
    if widget.confirmation_url.trim().is_empty() {
        errors.push("widget.confirmation_url must not be empty".to_string());
    }
    if widget.notification_ms == 0 {
        warnings.push("widget.notification_ms is 0; notifications vanish immediately".to_string());
    }
    if !widget.validate_prices {
        warnings.push("widget.validate_prices is off; negative prices are accepted".to_string());
    }
    if config.storage.dir.as_os_str().is_empty() {
        errors.push("storage.dir must not be empty".to_string());
    }

    (errors, warnings)
}

fn get_config_value(config: &CliConfig, key: &str) -> Result<String> {
    let parts: Vec<&str> = key.split('.').collect();
    let widget = &config.widget;

    match parts.as_slice() {
        ["widget", "storage_key"] => Ok(widget.storage_key.clone()),
        ["widget", "currency"] => Ok(widget.currency.code().to_string()),
        ["widget", "checkout_url"] => Ok(widget.checkout_url.clone()),
        ["widget", "confirmation_url"] => Ok(widget.confirmation_url.clone()),
        ["widget", "notification_ms"] => Ok(widget.notification_ms.to_string()),
        ["widget", "validate_prices"] => Ok(widget.validate_prices.to_string()),
        ["storage", "dir"] => Ok(config.storage.dir.display().to_string()),
        ["pixel", "enabled"] => Ok(config.pixel.enabled.to_string()),
        ["pixel", "log"] => Ok(config
            .pixel
            .log
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default()),
        _ => bail!("Unknown config key: {}", key),
    }
}

fn set_config_value(config: &mut CliConfig, key: &str, value: &str) -> Result<()> {
    let parts: Vec<&str> = key.split('.').collect();
    let widget = &mut config.widget;

    match parts.as_slice() {
        ["widget", "storage_key"] => widget.storage_key = value.to_string(),
        ["widget", "currency"] => {
            widget.currency = Currency::from_code(&value.to_ascii_uppercase())
                .with_context(|| format!("Unsupported currency: {}", value))?
        }
        ["widget", "checkout_url"] => widget.checkout_url = value.to_string(),
        ["widget", "confirmation_url"] => widget.confirmation_url = value.to_string(),
        ["widget", "notification_ms"] => widget.notification_ms = value.parse()?,
        ["widget", "validate_prices"] => widget.validate_prices = value.parse()?,
        ["storage", "dir"] => config.storage.dir = PathBuf::from(value),
        ["pixel", "enabled"] => config.pixel.enabled = value.parse()?,
        ["pixel", "log"] => {
            config.pixel.log = (!value.is_empty()).then(|| PathBuf::from(value));
        }
        _ => bail!("Unknown config key: {}", key),
    }

    Ok(())
}
