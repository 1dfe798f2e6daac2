//! The injected device-driver seam.
//!
//! [`InputDriver`] abstracts the native input/haptics library behind a trait
//! so the rest of the crate never touches a platform API directly. The
//! emulator's platform layer supplies the real implementation; tests supply
//! a scripted fake.
//!
//! ## Conventions
//! - Devices are addressed by their enumeration index until opened; open
//!   joysticks and haptic contexts are addressed by the opaque handles the
//!   driver hands back.
//! - Mouse deltas are raw counts as reported by the OS; wheel deltas are in
//!   detent units.
//! - Joystick axis values use the driver's native signed range (typically
//!   `-32768..=32767`).
//! - All calls are non-blocking by contract; `pump_events` drains any
//!   internal event queue synchronously and is invoked once per poll cycle.

use serde::{Deserialize, Serialize};

use crate::error::DriverError;
use crate::state::{KeyBitset, MouseButtons, PovDirs};

/// Opaque handle to an open joystick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct JoystickHandle(pub u32);

/// Opaque handle to an open haptic context.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HapticHandle(pub u32);

/// Identifier of an effect uploaded to a haptic context.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EffectId(pub u32);

/// Keyboard descriptor reported at enumeration.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct KeyboardDesc {
    pub name: String,
}

/// Mouse descriptor reported at enumeration.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MouseDesc {
    pub name: String,
    pub num_axes: u8,
    pub has_wheel: bool,
}

/// Joystick descriptor reported at enumeration.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct JoyDesc {
    pub name: String,
    pub num_axes: u8,
    pub num_povs: u8,
    pub num_buttons: u8,
}

/// Instantaneous mouse state as read from the driver.
///
/// `x`/`y` are the accumulated pointer position, `dx`/`dy` the motion since
/// the previous read. Both are carried so consumers can choose
/// absolute-centered or relative-delta reporting.
#[derive(Clone, Copy, Debug, Default)]
pub struct RawMouseState {
    pub x: i32,
    pub y: i32,
    pub dx: i32,
    pub dy: i32,
    /// Wheel motion since the previous read, in detents.
    pub wheel_delta: i32,
    pub buttons: MouseButtons,
}

/// Instantaneous joystick state as read from the driver.
#[derive(Clone, Debug, Default)]
pub struct RawJoyState {
    pub axes: Vec<i32>,
    pub buttons: Vec<bool>,
    pub povs: Vec<PovDirs>,
}

/// Haptic capabilities and device-reported maximum magnitudes.
///
/// `Some(max)` means the effect type is supported and `max` is the largest
/// magnitude the device accepts for it; `None` means unsupported.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct HapticCaps {
    pub constant: Option<u32>,
    pub vibration: Option<u32>,
    pub spring: Option<u32>,
    pub friction: Option<u32>,
}

impl HapticCaps {
    /// True if at least one effect type is supported.
    pub fn any(&self) -> bool {
        self.constant.is_some()
            || self.vibration.is_some()
            || self.spring.is_some()
            || self.friction.is_some()
    }
}

/// The four independent force channels a joystick may support.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EffectKind {
    Constant,
    Vibration,
    Spring,
    Friction,
}

/// Effect definition uploaded to (or updated on) a haptic context.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EffectSpec {
    /// Directional constant force.
    Constant {
        /// Magnitude in device units, already scaled and clamped.
        level: i32,
        /// Bearing in degrees, as understood by the driver's descriptor.
        direction_deg: u16,
        /// Playback bound in milliseconds; 0 plays until explicitly stopped.
        duration_ms: u32,
    },
    /// Periodic vibration.
    Vibration { magnitude: i32 },
    /// Self-centering spring on the force channel.
    Spring { level: i32 },
    /// Friction resistance.
    Friction { level: i32 },
}

impl EffectSpec {
    pub fn kind(&self) -> EffectKind {
        match self {
            EffectSpec::Constant { .. } => EffectKind::Constant,
            EffectSpec::Vibration { .. } => EffectKind::Vibration,
            EffectSpec::Spring { .. } => EffectKind::Spring,
            EffectSpec::Friction { .. } => EffectKind::Friction,
        }
    }
}

/// Primitive operations the native input library must provide.
///
/// The input system owns every handle it opens through this trait and closes
/// each exactly once, haptic context before its joystick.
pub trait InputDriver {
    /// Drain the driver's event queue. Called once per poll cycle, before
    /// any state read.
    fn pump_events(&mut self) -> Result<(), DriverError>;

    fn num_keyboards(&mut self) -> Result<usize, DriverError>;
    fn keyboard_desc(&self, kbd: usize) -> Option<KeyboardDesc>;

    fn num_mice(&mut self) -> Result<usize, DriverError>;
    fn mouse_desc(&self, mse: usize) -> Option<MouseDesc>;

    fn num_joysticks(&mut self) -> Result<usize, DriverError>;
    fn joystick_desc(&self, joy: usize) -> Option<JoyDesc>;

    /// Scancode bitset for one physical keyboard.
    fn key_state(&mut self, kbd: usize) -> Result<KeyBitset, DriverError>;

    /// Position/delta/button state for one physical mouse.
    fn mouse_state(&mut self, mse: usize) -> Result<RawMouseState, DriverError>;

    fn open_joystick(&mut self, index: usize) -> Result<JoystickHandle, DriverError>;
    fn close_joystick(&mut self, handle: JoystickHandle);

    /// Whole-device state for an open joystick.
    fn joystick_state(&mut self, handle: JoystickHandle) -> Result<RawJoyState, DriverError>;

    fn open_haptic(&mut self, joy: JoystickHandle) -> Result<HapticHandle, DriverError>;
    fn close_haptic(&mut self, handle: HapticHandle);

    /// Supported effect types and their maxima for an open haptic context.
    fn haptic_caps(&mut self, handle: HapticHandle) -> Result<HapticCaps, DriverError>;

    fn upload_effect(
        &mut self,
        handle: HapticHandle,
        spec: &EffectSpec,
    ) -> Result<EffectId, DriverError>;

    /// Re-upload an effect's definition in place.
    ///
    /// Drivers without in-place updates return [`DriverError::Unsupported`];
    /// the effect manager then stops and restarts the effect instead.
    fn update_effect(
        &mut self,
        handle: HapticHandle,
        effect: EffectId,
        spec: &EffectSpec,
    ) -> Result<(), DriverError>;

    /// Start (or restart) playback of an uploaded effect.
    fn run_effect(&mut self, handle: HapticHandle, effect: EffectId) -> Result<(), DriverError>;

    /// Stop playback. Stopping an already-stopped effect is a no-op.
    fn stop_effect(&mut self, handle: HapticHandle, effect: EffectId);

    /// Release an uploaded effect's driver resources.
    fn destroy_effect(&mut self, handle: HapticHandle, effect: EffectId);

    fn set_mouse_visibility(&mut self, visible: bool);
}
