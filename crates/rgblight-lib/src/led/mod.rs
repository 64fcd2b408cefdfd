//! LED control: channel ramp encoding, shared RGB package, backlight, colors.

mod backlight;
mod channel;
mod color;
mod rgb;

pub use backlight::{Backlight, read_max_brightness};
pub use channel::{
    ATTRIBUTE_NAMES, BRIGHTNESS_RAMP, BlinkRamp, LedAttributes, LedChannel, RAMP_SIZE,
    RAMP_STEP_DURATION_MS, scaled_duty_pcts,
};
pub use color::{Argb, MAX_BRIGHTNESS, format_color, parse_color, rgb_to_brightness};
pub use rgb::RgbLed;
