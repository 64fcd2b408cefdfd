//! `config` subcommand: show current configuration and file paths.

use std::path::Path;

use super::{Config, ConfigOutput, LightError, Result, kv, kv_indent, kv_width};

pub(super) fn cmd_config(json: bool, custom_path: Option<&Path>, write: bool) -> Result<()> {
    let config = super::load_config(custom_path);
    let config_path = custom_path.map(|p| p.to_path_buf()).or_else(Config::path);

    if write {
        let Some(path) = &config_path else {
            return Err(LightError::Config("no config directory; pass --config".into()));
        };
        config.save_to(path)?;
        log::info!("wrote {}", path.display());
    }
    let config_exists = config_path.as_ref().is_some_and(|p| p.exists());
    let errors: Vec<String> = match config.validate() {
        Ok(()) => Vec::new(),
        Err(errors) => errors.iter().map(|e| e.to_string()).collect(),
    };

    if json {
        let output = ConfigOutput {
            config_file: config_path.as_ref().map(|p| p.display().to_string()),
            config_file_exists: config_exists,
            settings: config,
            errors,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    // Human-readable output
    let w = kv_width(
        &["Config file:"],
        &[
            "led_dir:",
            "red_led:",
            "green_led:",
            "blue_led:",
            "rgb_blink_path:",
            "backlight_path:",
            "max_brightness:",
            "max_brightness_path:",
            "require_all_channels:",
        ],
    );

    match &config_path {
        Some(p) if config_exists => kv("Config file:", format_args!("{} (loaded)", p.display()), w),
        Some(p) => kv(
            "Config file:",
            format_args!("{} (not found, using defaults)", p.display()),
            w,
        ),
        None => kv("Config file:", "(no config directory)", w),
    }
    println!();

    println!("LEDs:");
    kv_indent("led_dir:", config.led_dir.display(), w);
    for (field, name) in [
        ("red_led:", &config.red_led),
        ("green_led:", &config.green_led),
        ("blue_led:", &config.blue_led),
    ] {
        kv_indent(field, format_args!("{name} -> {}", config.led_path(name).display()), w);
    }
    kv_indent("rgb_blink_path:", config.rgb_blink_path.display(), w);
    kv_indent("require_all_channels:", config.require_all_channels, w);
    println!();

    println!("Backlight:");
    kv_indent("backlight_path:", config.backlight_path.display(), w);
    match config.max_brightness {
        Some(max) => kv_indent("max_brightness:", max, w),
        None => kv_indent(
            "max_brightness_path:",
            config.max_brightness_path.display(),
            w,
        ),
    }

    if !errors.is_empty() {
        println!();
        println!("Problems:");
        for e in &errors {
            println!("  {e}");
        }
    }
    Ok(())
}
