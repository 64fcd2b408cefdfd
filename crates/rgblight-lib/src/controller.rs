//! Light controller: per-role state, priority arbitration, hardware writes.
//!
//! Battery, notification and attention requests all land on one RGB LED.
//! The controller keeps the latest state of each and shows the highest
//! priority lit one: notifications, then attention, then battery. The
//! backlight is independent and has no stored state.

use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};

use crate::attribute::{Attribute, SysfsAttribute};
use crate::config::Config;
use crate::error::{LightError, Result};
use crate::led::{self, Backlight, LedAttributes, LedChannel, RgbLed};
use crate::state::{LightState, Role};

/// Roles this controller handles.
pub const SUPPORTED_ROLES: [Role; 4] = [
    Role::Attention,
    Role::Backlight,
    Role::Battery,
    Role::Notifications,
];

/// True if [`LightController::set_light`] accepts `role`.
pub fn is_supported(role: Role) -> bool {
    SUPPORTED_ROLES.contains(&role)
}

/// Stored role states and the role currently shown on the RGB LED.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub battery: LightState,
    pub notifications: LightState,
    pub attention: LightState,
    /// `None` when no RGB role is lit.
    pub active: Option<Role>,
}

struct Inner<A> {
    rgb: RgbLed<A>,
    backlight: Backlight<A>,
    battery: LightState,
    notifications: LightState,
    attention: LightState,
    active: Option<Role>,
}

impl<A: Attribute> Inner<A> {
    /// Highest-priority lit RGB role and its state.
    fn effective(&self) -> Option<(Role, LightState)> {
        [
            (Role::Notifications, self.notifications),
            (Role::Attention, self.attention),
            (Role::Battery, self.battery),
        ]
        .into_iter()
        .find(|(_, state)| state.is_lit())
    }

    fn update_rgb(&mut self) {
        let effective = self.effective();
        match effective {
            Some((role, state)) => {
                log::debug!("rgb: showing {role}");
                self.rgb.apply(&state);
            }
            None => {
                log::debug!("rgb: no role lit, turning off");
                self.rgb.off();
            }
        }
        self.active = effective.map(|(role, _)| role);
    }
}

/// Arbitrates light roles onto the shared RGB LED and the backlight.
///
/// All state changes and the hardware writes they cause happen under one
/// lock, so concurrent callers never interleave writes to the LED.
pub struct LightController<A> {
    inner: Mutex<Inner<A>>,
}

impl<A: Attribute> LightController<A> {
    /// Controller with every RGB role off. Nothing is written until the first
    /// [`set_light`](Self::set_light).
    pub fn new(rgb: RgbLed<A>, backlight: Backlight<A>) -> Self {
        LightController {
            inner: Mutex::new(Inner {
                rgb,
                backlight,
                battery: LightState::default(),
                notifications: LightState::default(),
                attention: LightState::default(),
                active: None,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner<A>> {
        // Role states are replaced whole; a poisoned guard still holds valid data.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Apply `state` for `role`.
    ///
    /// Fails with [`LightError::RoleNotSupported`] for roles outside
    /// [`SUPPORTED_ROLES`], without touching hardware.
    pub fn set_light(&self, role: Role, state: LightState) -> Result<()> {
        match role {
            Role::Backlight => {
                self.lock().backlight.set(state.color);
            }
            Role::Battery => {
                let mut inner = self.lock();
                inner.battery = state;
                inner.update_rgb();
            }
            Role::Notifications => {
                let mut inner = self.lock();
                inner.notifications = state;
                inner.update_rgb();
            }
            Role::Attention => {
                let mut inner = self.lock();
                inner.attention = state;
                inner.update_rgb();
            }
            Role::Keyboard | Role::Buttons | Role::Bluetooth | Role::Wifi => {
                log::debug!("set_light: {role} not supported");
                return Err(LightError::RoleNotSupported(role));
            }
        }
        Ok(())
    }

    pub fn supported_roles(&self) -> &'static [Role] {
        &SUPPORTED_ROLES
    }

    /// Deliver the supported roles to a caller-supplied sink.
    pub fn get_supported_roles(&self, sink: impl FnOnce(&[Role])) {
        sink(self.supported_roles());
    }

    /// Role currently shown on the RGB LED.
    pub fn active_role(&self) -> Option<Role> {
        self.lock().active
    }

    pub fn snapshot(&self) -> Snapshot {
        let inner = self.lock();
        Snapshot {
            battery: inner.battery,
            notifications: inner.notifications,
            attention: inner.attention,
            active: inner.active,
        }
    }

    /// Labels of control attributes that failed to open.
    pub fn unavailable_attributes(&self) -> Vec<String> {
        let inner = self.lock();
        let mut missing: Vec<String> = inner
            .rgb
            .channels()
            .iter()
            .flat_map(|c| c.missing_attributes())
            .collect();
        for attr in [inner.rgb.blink_attribute(), inner.backlight.attribute()] {
            if !attr.is_open() {
                missing.push(attr.label().to_string());
            }
        }
        missing
    }
}

impl LightController<SysfsAttribute> {
    /// Open every control attribute named by `config`.
    ///
    /// Missing attributes are logged and the affected channels are skipped,
    /// unless `config.require_all_channels` is set, in which case this fails
    /// with [`LightError::ChannelUnavailable`].
    pub fn open(config: &Config) -> Result<Self> {
        let [red, green, blue] = config.channels().map(|(index, name)| {
            let dir = config.led_path(name);
            LedChannel::new(
                index,
                name,
                LedAttributes::from_fn(|leaf| SysfsAttribute::open(dir.join(leaf))),
            )
        });
        let rgb = RgbLed::new(red, green, blue, SysfsAttribute::open(&config.rgb_blink_path));

        let max_brightness = match config.max_brightness {
            Some(max) => max,
            None => match led::read_max_brightness(&config.max_brightness_path) {
                Ok(max) => max,
                Err(e) => {
                    log::warn!("backlight: {e}; assuming {}", led::MAX_BRIGHTNESS);
                    led::MAX_BRIGHTNESS
                }
            },
        };
        let backlight = Backlight::new(SysfsAttribute::open(&config.backlight_path), max_brightness);

        let controller = LightController::new(rgb, backlight);
        let missing = controller.unavailable_attributes();
        if !missing.is_empty() {
            if config.require_all_channels {
                return Err(LightError::ChannelUnavailable(missing.join(", ")));
            }
            for label in &missing {
                log::warn!("control attribute unavailable: {label}");
            }
        }
        log::info!("lights: max backlight brightness {max_brightness}");
        Ok(controller)
    }
}
