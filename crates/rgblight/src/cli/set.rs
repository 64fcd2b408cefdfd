//! `set` subcommand: apply one role state to the hardware.

use super::{
    Config, LightError, LightState, Result, Role, SetOutput, controller, kv, kv_width, led,
    open_controller, service,
};

/// Build the requested state. `blink` is `(on_ms, off_ms)`.
fn requested_state(color: u32, blink: Option<(u32, u32)>) -> LightState {
    match blink {
        Some((on_ms, off_ms)) => LightState::timed(color, on_ms, off_ms),
        None => LightState::steady(color),
    }
}

pub(super) fn cmd_set(
    config: &Config,
    role: Role,
    color: &str,
    blink: Option<(u32, u32)>,
    json: bool,
) -> Result<()> {
    if !controller::is_supported(role) {
        return Err(LightError::RoleNotSupported(role));
    }
    let color = led::parse_color(color)?;
    let state = requested_state(color, blink);
    let lights = open_controller(config)?;

    let status = service::set_light(&lights, role, state)?;

    if json {
        let output = SetOutput {
            role,
            color: led::format_color(color),
            state,
            status,
            active: lights.active_role(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let w = kv_width(&["Role:", "Color:", "Flash:", "Showing:"], &[]);
    kv("Role:", role, w);
    kv("Color:", led::format_color(color), w);
    match blink {
        Some((on, off)) => kv("Flash:", format_args!("{on} ms on, {off} ms off"), w),
        None => kv("Flash:", "steady", w),
    }
    if role != Role::Backlight {
        match lights.active_role() {
            Some(active) => kv("Showing:", active, w),
            None => kv("Showing:", "(off)", w),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rgblight_lib::FlashMode;

    #[test]
    fn steady_without_blink() {
        let state = requested_state(0xFF00_FF00, None);
        assert_eq!(state.flash_mode, FlashMode::None);
        assert_eq!(state.color, 0xFF00_FF00);
    }

    #[test]
    fn timed_with_blink() {
        let state = requested_state(0xFF00_FF00, Some((500, 1500)));
        assert_eq!(state.flash_mode, FlashMode::Timed);
        assert_eq!((state.flash_on_ms, state.flash_off_ms), (500, 1500));
    }

    #[test]
    fn bad_color_fails_before_opening_hardware() {
        let config = Config {
            require_all_channels: true,
            ..Config::default()
        };
        let err = cmd_set(&config, Role::Battery, "not-a-color", None, false).unwrap_err();
        assert!(matches!(err, LightError::Color(_)));
    }

    #[test]
    fn unsupported_role_fails_before_opening_hardware() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            led_dir: dir.path().join("absent"),
            require_all_channels: true,
            max_brightness: Some(255),
            ..Config::default()
        };
        let err = cmd_set(&config, Role::Keyboard, "red", None, false).unwrap_err();
        assert!(matches!(err, LightError::RoleNotSupported(Role::Keyboard)));
    }
}
