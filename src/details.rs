//! Per-device enumeration records.
//!
//! Built once during enumeration, immutable for the lifetime of the system.
//! All records serialize for diagnostics and persistence of control
//! configurations.

use serde::{Deserialize, Serialize};

use crate::driver::{HapticCaps, JoyDesc, KeyboardDesc, MouseDesc};

/// Identity of one logical keyboard.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct KeyDetails {
    pub name: String,
}

impl From<KeyboardDesc> for KeyDetails {
    fn from(desc: KeyboardDesc) -> Self {
        KeyDetails { name: desc.name }
    }
}

/// Identity and capability of one physical mouse.
///
/// The synthesized combined mouse aggregating all physical mice is not
/// listed here; it is addressed through
/// [`MouseSelector::Combined`](crate::source::MouseSelector).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MouseDetails {
    pub name: String,
    pub num_axes: u8,
    pub has_wheel: bool,
}

impl From<MouseDesc> for MouseDetails {
    fn from(desc: MouseDesc) -> Self {
        MouseDetails {
            name: desc.name,
            num_axes: desc.num_axes,
            has_wheel: desc.has_wheel,
        }
    }
}

/// Identity and capability of one joystick, including its haptic
/// capability flags and the device-reported maximum magnitude per effect
/// type.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct JoyDetails {
    pub name: String,
    pub num_axes: u8,
    pub num_povs: u8,
    pub num_buttons: u8,
    /// Haptic capabilities; all-`None` for sticks without force feedback.
    pub caps: HapticCaps,
}

impl JoyDetails {
    pub fn new(desc: JoyDesc, caps: HapticCaps) -> Self {
        JoyDetails {
            name: desc.name,
            num_axes: desc.num_axes,
            num_povs: desc.num_povs,
            num_buttons: desc.num_buttons,
            caps,
        }
    }

    pub fn has_force_feedback(&self) -> bool {
        self.caps.any()
    }

    pub fn has_constant_force(&self) -> bool {
        self.caps.constant.is_some()
    }

    pub fn has_vibration(&self) -> bool {
        self.caps.vibration.is_some()
    }

    pub fn has_spring(&self) -> bool {
        self.caps.spring.is_some()
    }

    pub fn has_friction(&self) -> bool {
        self.caps.friction.is_some()
    }
}
