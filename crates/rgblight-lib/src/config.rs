//! Service configuration: TOML-based, platform-aware paths.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Header comment prepended to saved config files.
const CONFIG_HEADER: &str =
    "# rgblight configuration: paths to the LED and backlight control attributes.\n\n";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory containing one subdirectory per LED. Default: "/sys/class/leds".
    #[serde(default = "default_led_dir")]
    pub led_dir: PathBuf,

    /// LED subdirectory names for the red, green and blue channels.
    #[serde(default = "default_red_led")]
    pub red_led: String,
    #[serde(default = "default_green_led")]
    pub green_led: String,
    #[serde(default = "default_blue_led")]
    pub blue_led: String,

    /// Attribute that starts all loaded blink ramps at once.
    #[serde(default = "default_rgb_blink_path")]
    pub rgb_blink_path: PathBuf,

    /// Panel backlight brightness attribute.
    #[serde(default = "default_backlight_path")]
    pub backlight_path: PathBuf,

    /// File holding the panel's maximum brightness, read once at startup.
    #[serde(default = "default_max_brightness_path")]
    pub max_brightness_path: PathBuf,

    /// Explicit maximum panel brightness. Overrides `max_brightness_path`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_brightness: Option<u32>,

    /// Refuse to start if any control attribute is missing, instead of
    /// silently skipping the affected channel.
    #[serde(default)]
    pub require_all_channels: bool,
}

fn default_led_dir() -> PathBuf {
    PathBuf::from("/sys/class/leds")
}
fn default_red_led() -> String {
    "red".into()
}
fn default_green_led() -> String {
    "green".into()
}
fn default_blue_led() -> String {
    "blue".into()
}
fn default_rgb_blink_path() -> PathBuf {
    PathBuf::from("/sys/class/leds/rgb/rgb_blink")
}
fn default_backlight_path() -> PathBuf {
    PathBuf::from("/sys/class/backlight/panel0-backlight/brightness")
}
fn default_max_brightness_path() -> PathBuf {
    PathBuf::from("/sys/class/backlight/panel0-backlight/max_brightness")
}

impl Default for Config {
    fn default() -> Self {
        Config {
            led_dir: default_led_dir(),
            red_led: default_red_led(),
            green_led: default_green_led(),
            blue_led: default_blue_led(),
            rgb_blink_path: default_rgb_blink_path(),
            backlight_path: default_backlight_path(),
            max_brightness_path: default_max_brightness_path(),
            max_brightness: None,
            require_all_channels: false,
        }
    }
}

/// Validation errors that [`Config::validate`] can return.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// An LED name is empty or contains a path separator.
    InvalidLedName { field: &'static str, reason: String },
    /// Two channels point at the same LED.
    DuplicateLed(String),
    /// A path field is empty.
    EmptyPath(&'static str),
    /// `max_brightness` is zero.
    ZeroMaxBrightness,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::InvalidLedName { field, reason } => {
                write!(f, "Invalid {field}: {reason}")
            }
            ValidationError::DuplicateLed(name) => {
                write!(f, "LED \"{name}\" is used by more than one channel")
            }
            ValidationError::EmptyPath(field) => write!(f, "{field} cannot be empty"),
            ValidationError::ZeroMaxBrightness => write!(f, "max_brightness must be at least 1"),
        }
    }
}

impl Config {
    /// Platform-specific config directory.
    pub fn dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("rgblight"))
    }

    /// Full path to config file.
    pub fn path() -> Option<PathBuf> {
        Self::dir().map(|d| d.join("config.toml"))
    }

    /// Write config to `path` with a header comment, creating parent
    /// directories. The file is replaced by rename, so readers never see a
    /// partial config.
    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        let body = toml::to_string_pretty(self).map_err(std::io::Error::other)?;
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let staged = path.with_extension("toml.new");
        std::fs::write(&staged, format!("{CONFIG_HEADER}{body}"))?;
        std::fs::rename(&staged, path).inspect_err(|_| {
            let _ = std::fs::remove_file(&staged);
        })
    }

    /// Load config from an arbitrary path, returning the config and any parse warnings.
    ///
    /// Returns `(defaults, [])` if the file doesn't exist.
    /// Returns `(defaults, [warning])` if the file exists but can't be parsed.
    pub fn load_from(path: &Path) -> (Self, Vec<String>) {
        match std::fs::read_to_string(path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => (config, vec![]),
                Err(e) => {
                    let warning = format!(
                        "config parse error ({}), using defaults: {e}",
                        path.display()
                    );
                    (Self::default(), vec![warning])
                }
            },
            Err(_) => (Self::default(), vec![]),
        }
    }

    /// Load config from the default path, returning the config and any parse warnings.
    pub fn load_with_warnings() -> (Self, Vec<String>) {
        let Some(path) = Self::path() else {
            return (Self::default(), vec![]);
        };
        Self::load_from(&path)
    }

    /// Attribute directory of one LED.
    pub fn led_path(&self, name: &str) -> PathBuf {
        self.led_dir.join(name)
    }

    /// `(channel index, LED name)` for red, green and blue.
    pub fn channels(&self) -> [(u32, &str); 3] {
        [
            (0, self.red_led.as_str()),
            (1, self.green_led.as_str()),
            (2, self.blue_led.as_str()),
        ]
    }

    /// Validate the entire config, collecting all errors.
    pub fn validate(&self) -> std::result::Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        let names = [
            ("red_led", &self.red_led),
            ("green_led", &self.green_led),
            ("blue_led", &self.blue_led),
        ];
        for (field, name) in names {
            let name = name.trim();
            if name.is_empty() {
                errors.push(ValidationError::InvalidLedName {
                    field,
                    reason: "cannot be empty".into(),
                });
            } else if name.contains('/') {
                errors.push(ValidationError::InvalidLedName {
                    field,
                    reason: format!("\"{name}\" must be a directory name, not a path"),
                });
            }
        }
        for (i, (_, a)) in names.iter().enumerate() {
            let a = a.trim();
            if a.is_empty() {
                continue;
            }
            if names[..i].iter().any(|(_, b)| b.trim() == a) {
                errors.push(ValidationError::DuplicateLed(a.to_string()));
            }
        }

        let paths = [
            ("led_dir", &self.led_dir),
            ("rgb_blink_path", &self.rgb_blink_path),
            ("backlight_path", &self.backlight_path),
        ];
        for (field, path) in paths {
            if path.as_os_str().is_empty() {
                errors.push(ValidationError::EmptyPath(field));
            }
        }
        if self.max_brightness.is_none() && self.max_brightness_path.as_os_str().is_empty() {
            errors.push(ValidationError::EmptyPath("max_brightness_path"));
        }

        if self.max_brightness == Some(0) {
            errors.push(ValidationError::ZeroMaxBrightness);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
