//! Configuration management commands.

use std::fs;

use anyhow::{bail, Context as _, Result};
use spice_commerce::config::{generate_default_config, StorefrontConfig};

use super::{ConfigArgs, ConfigCommand};
use crate::context::{find_config, Context, CONFIG_NAMES};

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx).await,
        ConfigCommand::Init { force } => init_config(force, ctx).await,
        ConfigCommand::Validate => validate_config(ctx).await,
    }
}

async fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    let store = &ctx.config.store;
    ctx.output.info("[store]");
    ctx.output.kv("business_name", &store.business_name);
    ctx.output.kv("site_name", &store.site_name);
    ctx.output.kv("currency", store.currency.code());
    ctx.output
        .kv("timezone_offset_minutes", &store.timezone_offset_minutes.to_string());

    let checkout = &ctx.config.checkout;
    ctx.output.info("[checkout]");
    ctx.output.kv("whatsapp_number", &checkout.whatsapp_number);
    ctx.output
        .kv("reset_delay_secs", &checkout.reset_delay_secs.to_string());
    ctx.output
        .kv("max_link_length", &checkout.max_link_length.to_string());

    let policy = ctx.config.delivery_policy();
    ctx.output.info("[delivery]");
    ctx.output.kv("free_threshold", &policy.free_threshold.display());
    ctx.output.kv("flat_fee", &policy.flat_fee.display());

    Ok(())
}

async fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())
        .with_context(|| format!("Failed to write config file: {}", config_path.display()))?;

    ctx.output
        .success(&format!("Created: {}", config_path.display()));

    Ok(())
}

async fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    // Reload from disk: the context falls back to defaults on a bad file.
    let config = match ctx.config_path.clone().or_else(|| find_config(&ctx.cwd)) {
        Some(path) => {
            ctx.output.kv("file", &path.display().to_string());
            StorefrontConfig::load(&path).with_context(|| format!("{} is invalid", path.display()))?
        }
        None => {
            ctx.output.info("No config file found, checking defaults");
            ctx.config.clone()
        }
    };

    let warnings = config_warnings(&config);
    if warnings.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }
    ctx.output.success("Configuration is valid (with warnings)");

    Ok(())
}

/// Settings that load fine but are probably mistakes.
fn config_warnings(config: &StorefrontConfig) -> Vec<String> {
    let mut warnings = Vec::new();

    if config.checkout.reset_delay_secs == 0 {
        warnings.push("checkout.reset_delay_secs is 0; the cart clears as soon as the order is sent".to_string());
    }
    if config.delivery.flat_fee == 0.0 {
        warnings.push("delivery.flat_fee is 0; every order ships free".to_string());
    }
    if config.checkout.whatsapp_number.len() < 8 {
        warnings.push(format!(
            "checkout.whatsapp_number '{}' looks too short for an international number",
            config.checkout.whatsapp_number
        ));
    }
    if config.checkout.max_link_length < 1024 {
        warnings.push(format!(
            "checkout.max_link_length {} will flag most orders as too long",
            config.checkout.max_link_length
        ));
    }

    warnings
}
