//! The shared RGB LED package: three channels plus the global blink trigger.

use crate::attribute::{Attribute, write_logged};
use crate::state::{FlashMode, LightState};

use super::channel::LedChannel;
use super::color::Argb;

/// Red, green and blue channels driven as one light.
#[derive(Debug)]
pub struct RgbLed<A> {
    red: LedChannel<A>,
    green: LedChannel<A>,
    blue: LedChannel<A>,
    /// Starts the blink engine for all loaded ramps at once.
    blink: A,
}

impl<A: Attribute> RgbLed<A> {
    pub fn new(red: LedChannel<A>, green: LedChannel<A>, blue: LedChannel<A>, blink: A) -> Self {
        RgbLed {
            red,
            green,
            blue,
            blink,
        }
    }

    pub fn channels(&self) -> [&LedChannel<A>; 3] {
        [&self.red, &self.green, &self.blue]
    }

    pub fn blink_attribute(&self) -> &A {
        &self.blink
    }

    /// Show `state`, with alpha applied as a dimmer.
    pub fn apply(&mut self, state: &LightState) {
        let (red, green, blue) = Argb::from_color(state.color).dimmed();
        log::debug!(
            "rgb: color=#{:08X} -> ({red}, {green}, {blue}) flash={:?}",
            state.color,
            state.flash_mode
        );

        write_logged(&mut self.blink, 0);

        match state.flash_mode {
            FlashMode::Timed => {
                let (on, off) = (state.flash_on_ms, state.flash_off_ms);
                self.red.set_blink(red, on, off);
                self.green.set_blink(green, on, off);
                self.blue.set_blink(blue, on, off);
                // Start only after all three ramps are loaded so they stay in phase.
                write_logged(&mut self.blink, 1);
            }
            FlashMode::None | FlashMode::Hardware => {
                self.red.set_steady(red);
                self.green.set_steady(green);
                self.blue.set_steady(blue);
            }
        }
    }

    /// All three channels steady at zero.
    pub fn off(&mut self) {
        self.red.off();
        self.green.off();
        self.blue.off();
    }
}
