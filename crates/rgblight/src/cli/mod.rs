//! CLI subcommands: one-shot light changes, ramp previews, the request loop.

mod config_cmd;
mod ramp;
mod roles;
mod serve;
mod set;

use std::path::Path;

use clap::Subcommand;
use serde::Serialize;

pub(super) use rgblight_lib::attribute::SysfsAttribute;
pub(super) use rgblight_lib::config::Config;
pub(super) use rgblight_lib::controller::{self, LightController};
pub(super) use rgblight_lib::error::{LightError, Result};
pub(super) use rgblight_lib::led;
pub(super) use rgblight_lib::service;
pub(super) use rgblight_lib::{LightState, Role};

const PADDING: usize = 2;

/// Compute alignment width for a command's key-value output.
/// Ensures at least PADDING spaces after the longest key in either level,
/// with top-level and indent values aligned to the same column.
pub(super) fn kv_width(top: &[&str], indent: &[&str]) -> usize {
    let top_max = top.iter().map(|k| k.len()).max().unwrap_or(0);
    let indent_max = indent.iter().map(|k| k.len()).max().unwrap_or(0);
    let top_need = if top.is_empty() { 0 } else { top_max + PADDING };
    // Indent keys lose 2 chars of inner width to the "  " prefix
    let indent_need = if indent.is_empty() {
        0
    } else {
        indent_max + PADDING + 2
    };
    top_need.max(indent_need)
}

pub(super) fn format_kv(key: &str, value: impl std::fmt::Display, w: usize) -> String {
    format!("{key:<width$}{value}", width = w)
}

pub(super) fn kv(key: &str, value: impl std::fmt::Display, w: usize) {
    println!("{}", format_kv(key, value, w));
}

pub(super) fn kv_indent(key: &str, value: impl std::fmt::Display, w: usize) {
    println!("  {key:<width$}{value}", width = w - 2);
}

/// Load config from `custom_path` if given, else from the platform default.
/// Parse problems are logged and defaults used.
pub(super) fn load_config(custom_path: Option<&Path>) -> Config {
    let (config, warnings) = match custom_path {
        Some(path) => Config::load_from(path),
        None => Config::load_with_warnings(),
    };
    for w in &warnings {
        log::warn!("{w}");
    }
    config
}

/// Validate `config` and open the sysfs controller it describes.
pub(super) fn open_controller(config: &Config) -> Result<LightController<SysfsAttribute>> {
    if let Err(errors) = config.validate() {
        let msg = errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        return Err(LightError::Config(msg));
    }
    LightController::open(config)
}

// ── JSON output structs ──

#[derive(Serialize)]
pub(super) struct SetOutput {
    pub role: Role,
    pub color: String,
    pub state: LightState,
    pub status: service::Status,
    pub active: Option<Role>,
}

#[derive(Serialize)]
pub(super) struct RoleJson {
    pub id: u32,
    pub name: &'static str,
}

#[derive(Serialize)]
pub(super) struct RolesOutput {
    pub roles: Vec<RoleJson>,
}

#[derive(Serialize)]
pub(super) struct ConfigOutput {
    pub config_file: Option<String>,
    pub config_file_exists: bool,
    pub settings: Config,
    pub errors: Vec<String>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Set one light role (one-shot; state is not kept between runs)
    Set {
        /// Role name or id (battery, notifications, attention, backlight)
        role: Role,
        /// Color as #RRGGBB, #AARRGGBB or a name; alpha dims the RGB LED
        color: String,
        /// Blink: milliseconds lit per cycle
        #[arg(long, requires = "off_ms")]
        on_ms: Option<u32>,
        /// Blink: milliseconds dark per cycle
        #[arg(long, requires = "on_ms")]
        off_ms: Option<u32>,
    },

    /// List the roles this service handles
    Roles,

    /// Show the blink ramp for one channel (no hardware required)
    Ramp {
        /// Channel brightness (0-255)
        brightness: u8,
        /// Milliseconds lit per cycle
        on_ms: u32,
        /// Milliseconds dark per cycle
        off_ms: u32,
        /// Channel index (0 red, 1 green, 2 blue)
        #[arg(long, default_value_t = 0)]
        index: u32,
    },

    /// Show current configuration and its file path
    Config {
        /// Write the effective configuration (defaults filled in) to the file
        #[arg(long)]
        write: bool,
    },

    /// Answer JSON requests from stdin, one per line, until EOF
    Serve,
}

/// Warn if `--json` was passed to a command that doesn't support it.
fn warn_json_unsupported(cmd_name: &str) {
    log::warn!("--json is not supported for `{cmd_name}` (ignored)");
}

pub fn run(cmd: Command, json: bool, config_path: Option<&Path>) -> Result<()> {
    match cmd {
        Command::Set {
            role,
            color,
            on_ms,
            off_ms,
        } => {
            let config = load_config(config_path);
            set::cmd_set(&config, role, &color, on_ms.zip(off_ms), json)
        }
        Command::Roles => roles::cmd_roles(json),
        Command::Ramp {
            brightness,
            on_ms,
            off_ms,
            index,
        } => ramp::cmd_ramp(index, brightness, on_ms, off_ms, json),
        Command::Config { write } => config_cmd::cmd_config(json, config_path, write),
        Command::Serve => {
            if json {
                warn_json_unsupported("serve");
            }
            let config = load_config(config_path);
            serve::cmd_serve(&config)
        }
    }
}

#[cfg(test)]
mod format_tests {
    use super::*;

    #[test]
    fn kv_width_top_only() {
        let w = kv_width(&["Short:", "Longer key:"], &[]);
        // "Longer key:" = 11 + PADDING = 13
        assert_eq!(w, 13);
    }

    #[test]
    fn kv_width_indent_drives_width() {
        let w = kv_width(&["A:"], &["max_brightness_path:"]);
        // 20 + PADDING + 2
        assert_eq!(w, 24);
    }

    #[test]
    fn values_align_across_levels() {
        let w = kv_width(&["Top:"], &["Indent:"]);
        let top = format_kv("Top:", "V", w);
        let indent = format!("  {:<width$}{}", "Indent:", "V", width = w - 2);
        assert_eq!(top.find('V'), indent.find('V'));
    }

    #[test]
    fn format_kv_overlong_key_is_not_padded() {
        assert_eq!(format_kv("ExactWidth:", "val", 10), "ExactWidth:val");
    }
}


#[cfg(test)]
mod json_struct_tests {
    use super::*;

    #[test]
    fn set_output_has_expected_fields() {
        let output = SetOutput {
            role: Role::Battery,
            color: "#FFFF0000".into(),
            state: LightState::steady(0xFFFF_0000),
            status: service::Status::Success,
            active: Some(Role::Battery),
        };
        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["role"], "battery");
        assert_eq!(json["status"], "success");
        assert_eq!(json["active"], "battery");
        assert_eq!(json["state"]["color"], 0xFFFF_0000u32);
        assert_eq!(json.as_object().unwrap().len(), 5);
    }

    #[test]
    fn roles_output_lists_ids() {
        let output = RolesOutput {
            roles: vec![RoleJson {
                id: Role::Attention.id(),
                name: Role::Attention.name(),
            }],
        };
        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["roles"][0]["id"], 5);
        assert_eq!(json["roles"][0]["name"], "attention");
    }
}
