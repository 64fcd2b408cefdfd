//! Panel backlight driven from the luma of a color.

use std::path::Path;

use crate::attribute::{Attribute, write_logged};

use super::color::{MAX_BRIGHTNESS, rgb_to_brightness};

/// Backlight brightness attribute plus the panel's maximum brightness.
#[derive(Debug)]
pub struct Backlight<A> {
    attr: A,
    max_brightness: u32,
}

impl<A: Attribute> Backlight<A> {
    pub fn new(attr: A, max_brightness: u32) -> Self {
        Backlight {
            attr,
            max_brightness,
        }
    }

    pub fn max_brightness(&self) -> u32 {
        self.max_brightness
    }

    pub fn attribute(&self) -> &A {
        &self.attr
    }

    /// Panel brightness for `color`: luma, rescaled linearly when the panel's
    /// maximum is not 255.
    pub fn brightness_for(&self, color: u32) -> u32 {
        let brightness = rgb_to_brightness(color);
        if self.max_brightness == MAX_BRIGHTNESS {
            return brightness;
        }
        // luma * max can exceed u32.
        let scaled = u64::from(brightness) * u64::from(self.max_brightness)
            / u64::from(MAX_BRIGHTNESS);
        let scaled = u32::try_from(scaled).unwrap_or(self.max_brightness);
        log::debug!("backlight: scaling brightness {brightness} => {scaled}");
        scaled
    }

    pub fn set(&mut self, color: u32) {
        let brightness = self.brightness_for(color);
        log::info!("backlight: brightness={brightness}");
        write_logged(&mut self.attr, brightness);
    }
}

/// Read a panel's `max_brightness` value.
pub fn read_max_brightness(path: &Path) -> crate::error::Result<u32> {
    let text = std::fs::read_to_string(path)?;
    text.trim().parse::<u32>().map_err(|e| {
        crate::LightError::Config(format!(
            "invalid max brightness {:?} in {}: {e}",
            text.trim(),
            path.display()
        ))
    })
}
