//! Light roles and requested light states.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LightError;

/// Logical purpose of a light.
///
/// This is the full vocabulary of the light API; a controller supports a
/// fixed subset of it (see [`crate::controller::SUPPORTED_ROLES`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Backlight,
    Keyboard,
    Buttons,
    Battery,
    Notifications,
    Attention,
    Bluetooth,
    Wifi,
}

impl Role {
    /// Every role, in id order.
    pub const ALL: [Role; 8] = [
        Role::Backlight,
        Role::Keyboard,
        Role::Buttons,
        Role::Battery,
        Role::Notifications,
        Role::Attention,
        Role::Bluetooth,
        Role::Wifi,
    ];

    /// Stable numeric id used by the light API.
    pub fn id(self) -> u32 {
        match self {
            Role::Backlight => 0,
            Role::Keyboard => 1,
            Role::Buttons => 2,
            Role::Battery => 3,
            Role::Notifications => 4,
            Role::Attention => 5,
            Role::Bluetooth => 6,
            Role::Wifi => 7,
        }
    }

    pub fn from_id(id: u32) -> Option<Role> {
        Role::ALL.iter().copied().find(|r| r.id() == id)
    }

    pub fn name(self) -> &'static str {
        match self {
            Role::Backlight => "backlight",
            Role::Keyboard => "keyboard",
            Role::Buttons => "buttons",
            Role::Battery => "battery",
            Role::Notifications => "notifications",
            Role::Attention => "attention",
            Role::Bluetooth => "bluetooth",
            Role::Wifi => "wifi",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Role {
    type Err = LightError;

    /// Accepts role names (case-insensitive, `notification` as an alias) or
    /// numeric ids.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(id) = s.parse::<u32>() {
            return Role::from_id(id)
                .ok_or_else(|| LightError::Config(format!("Unknown role id: {id}")));
        }
        let lower = s.to_lowercase();
        if lower == "notification" {
            return Ok(Role::Notifications);
        }
        Role::ALL
            .iter()
            .copied()
            .find(|r| r.name() == lower)
            .ok_or_else(|| LightError::Config(format!("Unknown role: {s}")))
    }
}

/// How a light should flash.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlashMode {
    /// Steady color.
    #[default]
    None,
    /// Blink with the requested on/off timing.
    Timed,
    /// Blink driven by an external hardware source. Shown steady here.
    Hardware,
}

/// A requested light state: ARGB color plus optional flash timing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LightState {
    /// Color as `0xAARRGGBB`.
    pub color: u32,
    #[serde(default)]
    pub flash_mode: FlashMode,
    #[serde(default)]
    pub flash_on_ms: u32,
    #[serde(default)]
    pub flash_off_ms: u32,
}

impl LightState {
    /// Steady color, no flashing.
    pub fn steady(color: u32) -> Self {
        LightState {
            color,
            ..Default::default()
        }
    }

    /// Timed blink with the given on/off durations.
    pub fn timed(color: u32, on_ms: u32, off_ms: u32) -> Self {
        LightState {
            color,
            flash_mode: FlashMode::Timed,
            flash_on_ms: on_ms,
            flash_off_ms: off_ms,
        }
    }

    /// True if any RGB bit is set. Alpha is ignored.
    pub fn is_lit(&self) -> bool {
        self.color & 0x00FF_FFFF != 0
    }
}
