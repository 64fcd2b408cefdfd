//! One physical LED's control surface: steady brightness and hardware blink ramps.

use serde::Serialize;

use crate::attribute::{Attribute, write_logged};

use super::color::MAX_BRIGHTNESS;

/// Steps in one ramp traversal.
pub const RAMP_SIZE: u32 = 8;

/// Default duration of one ramp step in milliseconds.
pub const RAMP_STEP_DURATION_MS: u32 = 50;

/// Ramp curve as percentages of peak brightness.
pub const BRIGHTNESS_RAMP: [u32; RAMP_SIZE as usize] = [0, 12, 25, 37, 50, 72, 85, 100];

/// Attribute leaf names, in [`LedAttributes`] field order.
pub const ATTRIBUTE_NAMES: [&str; 7] = [
    "brightness",
    "duty_pcts",
    "start_idx",
    "pause_lo",
    "pause_hi",
    "ramp_step_ms",
    "blink",
];

/// Duty-cycle list scaled to `brightness` (`pct * brightness / 255`, truncating).
pub fn scaled_duty_pcts(brightness: u8) -> [u32; RAMP_SIZE as usize] {
    BRIGHTNESS_RAMP.map(|pct| pct * u32::from(brightness) / MAX_BRIGHTNESS)
}

/// Ramp program for one channel of the hardware blink engine.
///
/// The ramp goes up and back down once per on-period, so it needs
/// `2 * RAMP_SIZE` steps. When `on_ms` is too short for that at the default
/// step duration, the steps are shortened to fit and there is no pause at the
/// peak.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlinkRamp {
    /// First slot of this channel's window in the shared ramp table.
    pub start_idx: u32,
    pub duty_pcts: [u32; RAMP_SIZE as usize],
    /// Time spent dark between ramps.
    pub pause_lo_ms: u32,
    /// Time held at peak brightness.
    pub pause_hi_ms: u32,
    pub step_ms: u32,
}

impl BlinkRamp {
    pub fn new(index: u32, brightness: u8, on_ms: u32, off_ms: u32) -> Self {
        let full_ramp_ms = RAMP_STEP_DURATION_MS * RAMP_SIZE * 2;
        let (step_ms, pause_hi_ms) = if on_ms >= full_ramp_ms {
            (RAMP_STEP_DURATION_MS, on_ms - full_ramp_ms)
        } else {
            (on_ms / (RAMP_SIZE * 2), 0)
        };
        BlinkRamp {
            start_idx: index * RAMP_SIZE,
            duty_pcts: scaled_duty_pcts(brightness),
            pause_lo_ms: off_ms,
            pause_hi_ms,
            step_ms,
        }
    }

    /// Duty-cycle list in the attribute's comma-joined format.
    pub fn duty_pcts_text(&self) -> String {
        self.duty_pcts
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// The seven control attributes of one LED.
#[derive(Debug)]
pub struct LedAttributes<A> {
    pub brightness: A,
    pub duty_pcts: A,
    pub start_idx: A,
    pub pause_lo: A,
    pub pause_hi: A,
    pub ramp_step_ms: A,
    pub blink: A,
}

impl<A: Attribute> LedAttributes<A> {
    /// Open every attribute by leaf name (see [`ATTRIBUTE_NAMES`]).
    pub fn from_fn(mut open: impl FnMut(&'static str) -> A) -> Self {
        LedAttributes {
            brightness: open("brightness"),
            duty_pcts: open("duty_pcts"),
            start_idx: open("start_idx"),
            pause_lo: open("pause_lo"),
            pause_hi: open("pause_hi"),
            ramp_step_ms: open("ramp_step_ms"),
            blink: open("blink"),
        }
    }

    fn iter(&self) -> impl Iterator<Item = &A> {
        [
            &self.brightness,
            &self.duty_pcts,
            &self.start_idx,
            &self.pause_lo,
            &self.pause_hi,
            &self.ramp_step_ms,
            &self.blink,
        ]
        .into_iter()
    }

    /// Labels of attributes that failed to open.
    pub fn missing(&self) -> Vec<String> {
        self.iter()
            .filter(|a| !a.is_open())
            .map(|a| a.label().to_string())
            .collect()
    }
}

/// One LED of the shared RGB package.
///
/// A channel with any attribute missing is unusable: every request on it is
/// dropped, so the LED never receives a partial program.
#[derive(Debug)]
pub struct LedChannel<A> {
    index: u32,
    name: String,
    attrs: LedAttributes<A>,
}

impl<A: Attribute> LedChannel<A> {
    pub fn new(index: u32, name: impl Into<String>, attrs: LedAttributes<A>) -> Self {
        LedChannel {
            index,
            name: name.into(),
            attrs,
        }
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// True if all seven attributes opened.
    pub fn is_valid(&self) -> bool {
        self.attrs.iter().all(Attribute::is_open)
    }

    /// Labels of attributes that failed to open.
    pub fn missing_attributes(&self) -> Vec<String> {
        self.attrs.missing()
    }

    /// Stop blinking and hold `brightness`.
    pub fn set_steady(&mut self, brightness: u8) {
        if !self.is_valid() {
            log::debug!("{}: unavailable, dropping set_steady({brightness})", self.name);
            return;
        }
        log::info!("{}: set_steady brightness={brightness}", self.name);
        write_logged(&mut self.attrs.blink, 0);
        write_logged(&mut self.attrs.brightness, brightness);
    }

    /// Load a blink ramp peaking at `brightness`.
    ///
    /// This only programs the ramp; the blink engine is started by the
    /// shared RGB blink attribute once all channels are loaded.
    pub fn set_blink(&mut self, brightness: u8, on_ms: u32, off_ms: u32) {
        if !self.is_valid() {
            log::debug!("{}: unavailable, dropping set_blink({brightness})", self.name);
            return;
        }
        let ramp = BlinkRamp::new(self.index, brightness, on_ms, off_ms);
        log::info!(
            "{}: set_blink brightness={brightness} on={on_ms}ms off={off_ms}ms step={}ms",
            self.name,
            ramp.step_ms
        );
        write_logged(&mut self.attrs.start_idx, ramp.start_idx);
        write_logged(&mut self.attrs.duty_pcts, ramp.duty_pcts_text());
        write_logged(&mut self.attrs.pause_lo, ramp.pause_lo_ms);
        write_logged(&mut self.attrs.pause_hi, ramp.pause_hi_ms);
        write_logged(&mut self.attrs.ramp_step_ms, ramp.step_ms);
    }

    pub fn off(&mut self) {
        self.set_steady(0);
    }
}
