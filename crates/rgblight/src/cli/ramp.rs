//! `ramp` subcommand: show the blink ramp a channel would be loaded with.

use super::{Result, kv, kv_width, led};

pub(super) fn cmd_ramp(index: u32, brightness: u8, on_ms: u32, off_ms: u32, json: bool) -> Result<()> {
    let ramp = led::BlinkRamp::new(index, brightness, on_ms, off_ms);

    if json {
        println!("{}", serde_json::to_string_pretty(&ramp)?);
        return Ok(());
    }

    let w = kv_width(
        &["start_idx:", "duty_pcts:", "pause_lo:", "pause_hi:", "ramp_step_ms:"],
        &[],
    );
    kv("start_idx:", ramp.start_idx, w);
    kv("duty_pcts:", ramp.duty_pcts_text(), w);
    kv("pause_lo:", ramp.pause_lo_ms, w);
    kv("pause_hi:", ramp.pause_hi_ms, w);
    kv("ramp_step_ms:", ramp.step_ms, w);
    Ok(())
}
