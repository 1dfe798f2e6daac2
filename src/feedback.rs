//! Force-feedback effect management.
//!
//! Each haptic-capable joystick owns four independent effect slots (constant
//! force, vibration, spring, friction). A slot is either unallocated or
//! holds a live effect registered with the driver, and stopping always
//! returns it to unallocated before any reuse.
//!
//! Commands for effect types the device does not support are silent no-ops:
//! the emulator issues feedback uniformly regardless of per-device
//! capability. A driver-level effect failure is logged and disables that
//! slot for the rest of the session rather than surfacing to the emulator
//! core.

use log::warn;

use crate::config::InputConfig;
use crate::details::JoyDetails;
use crate::driver::{EffectId, EffectKind, EffectSpec, HapticHandle, InputDriver};
use crate::error::DriverError;

/// Force-feedback command issued by the emulator's game-specific feedback
/// logic.
///
/// Magnitudes are normalized to `0.0..=1.0` and scaled by the device's
/// reported maximum (and the configured percentage) before reaching the
/// driver.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ForceFeedbackCmd {
    /// Stop every active effect on the device. Issued on loss of focus and
    /// at shutdown to guarantee no runaway motor output.
    Stop,
    /// Directional constant force. `duration_ms` bounds playback;
    /// 0 plays until explicitly stopped.
    ConstantForce {
        force: f32,
        direction_deg: u16,
        duration_ms: u32,
    },
    /// Self-centering spring.
    SelfCenter { force: f32 },
    /// Friction resistance.
    Friction { force: f32 },
    /// Periodic vibration.
    Vibrate { strength: f32 },
}

/// Per-effect scale factors derived from the configured percentages.
#[derive(Clone, Copy, Debug)]
pub(crate) struct FeedbackTuning {
    constant: f32,
    spring: f32,
    friction: f32,
    vibration: f32,
}

impl FeedbackTuning {
    pub(crate) fn from_config(cfg: &InputConfig) -> Self {
        FeedbackTuning {
            constant: cfg.constant_force_max as f32 / 100.0,
            spring: cfg.self_center_max as f32 / 100.0,
            friction: cfg.friction_max as f32 / 100.0,
            vibration: cfg.vibrate_max as f32 / 100.0,
        }
    }

    fn scale_for(&self, kind: EffectKind) -> f32 {
        match kind {
            EffectKind::Constant => self.constant,
            EffectKind::Spring => self.spring,
            EffectKind::Friction => self.friction,
            EffectKind::Vibration => self.vibration,
        }
    }
}

/// Scale a normalized magnitude into device units, clamped to the device's
/// valid range.
fn scale_level(force: f32, device_max: u32, scale: f32) -> i32 {
    let scaled = force.clamp(0.0, 1.0) * device_max as f32 * scale;
    (scaled.round() as i64).clamp(0, device_max as i64) as i32
}

/// One effect channel: unallocated, active, or disabled after a driver
/// failure.
#[derive(Debug, Default)]
struct EffectSlot {
    effect: Option<EffectId>,
    disabled: bool,
}

/// Haptic context of one joystick plus its four effect slots.
#[derive(Debug)]
pub(crate) struct HapticSlots {
    handle: HapticHandle,
    constant: EffectSlot,
    vibration: EffectSlot,
    spring: EffectSlot,
    friction: EffectSlot,
}

impl HapticSlots {
    pub(crate) fn new(handle: HapticHandle) -> Self {
        HapticSlots {
            handle,
            constant: EffectSlot::default(),
            vibration: EffectSlot::default(),
            spring: EffectSlot::default(),
            friction: EffectSlot::default(),
        }
    }

    fn slot_mut(&mut self, kind: EffectKind) -> &mut EffectSlot {
        match kind {
            EffectKind::Constant => &mut self.constant,
            EffectKind::Vibration => &mut self.vibration,
            EffectKind::Spring => &mut self.spring,
            EffectKind::Friction => &mut self.friction,
        }
    }

    /// Dispatch one feedback command against this device.
    ///
    /// A zero magnitude stops the addressed effect type; a command for an
    /// unsupported effect type does nothing.
    pub(crate) fn apply<D: InputDriver>(
        &mut self,
        driver: &mut D,
        details: &JoyDetails,
        tuning: &FeedbackTuning,
        cmd: ForceFeedbackCmd,
    ) {
        match cmd {
            ForceFeedbackCmd::Stop => self.stop_all(driver),
            ForceFeedbackCmd::ConstantForce {
                force,
                direction_deg,
                duration_ms,
            } => {
                if force == 0.0 {
                    self.stop(driver, EffectKind::Constant);
                    return;
                }
                let Some(max) = details.caps.constant else {
                    return;
                };
                let level = scale_level(force, max, tuning.scale_for(EffectKind::Constant));
                self.start_or_update(
                    driver,
                    EffectSpec::Constant {
                        level,
                        direction_deg,
                        duration_ms,
                    },
                );
            }
            ForceFeedbackCmd::SelfCenter { force } => {
                if force == 0.0 {
                    self.stop(driver, EffectKind::Spring);
                    return;
                }
                let Some(max) = details.caps.spring else {
                    return;
                };
                let level = scale_level(force, max, tuning.scale_for(EffectKind::Spring));
                self.start_or_update(driver, EffectSpec::Spring { level });
            }
            ForceFeedbackCmd::Friction { force } => {
                if force == 0.0 {
                    self.stop(driver, EffectKind::Friction);
                    return;
                }
                let Some(max) = details.caps.friction else {
                    return;
                };
                let level = scale_level(force, max, tuning.scale_for(EffectKind::Friction));
                self.start_or_update(driver, EffectSpec::Friction { level });
            }
            ForceFeedbackCmd::Vibrate { strength } => {
                if strength == 0.0 {
                    self.stop(driver, EffectKind::Vibration);
                    return;
                }
                let Some(max) = details.caps.vibration else {
                    return;
                };
                let magnitude = scale_level(strength, max, tuning.scale_for(EffectKind::Vibration));
                self.start_or_update(driver, EffectSpec::Vibration { magnitude });
            }
        }
    }

    /// Upload a fresh effect, or update the already-active one in place.
    ///
    /// Update-in-place is a capability probe: a driver answering
    /// `Unsupported` gets the effect stopped and re-uploaded instead. Any
    /// other failure disables the slot for the rest of the session.
    fn start_or_update<D: InputDriver>(&mut self, driver: &mut D, spec: EffectSpec) {
        let handle = self.handle;
        let kind = spec.kind();
        let slot = self.slot_mut(kind);
        if slot.disabled {
            return;
        }

        if let Some(effect) = slot.effect {
            match driver.update_effect(handle, effect, &spec) {
                Ok(()) => {
                    if let Err(err) = driver.run_effect(handle, effect) {
                        warn!("haptic run after update failed, disabling {kind:?}: {err}");
                        driver.stop_effect(handle, effect);
                        driver.destroy_effect(handle, effect);
                        slot.effect = None;
                        slot.disabled = true;
                    }
                    return;
                }
                Err(DriverError::Unsupported) => {
                    // No in-place update on this driver; recreate below.
                    driver.stop_effect(handle, effect);
                    driver.destroy_effect(handle, effect);
                    slot.effect = None;
                }
                Err(err) => {
                    warn!("haptic update failed, disabling {kind:?}: {err}");
                    driver.stop_effect(handle, effect);
                    driver.destroy_effect(handle, effect);
                    slot.effect = None;
                    slot.disabled = true;
                    return;
                }
            }
        }

        match driver.upload_effect(handle, &spec) {
            Ok(effect) => {
                if let Err(err) = driver.run_effect(handle, effect) {
                    warn!("haptic effect start failed, disabling {kind:?}: {err}");
                    driver.destroy_effect(handle, effect);
                    slot.disabled = true;
                    return;
                }
                slot.effect = Some(effect);
            }
            Err(err) => {
                warn!("haptic effect creation failed, disabling {kind:?}: {err}");
                slot.disabled = true;
            }
        }
    }

    /// Stop one effect type and return its slot to unallocated. Idempotent.
    pub(crate) fn stop<D: InputDriver>(&mut self, driver: &mut D, kind: EffectKind) {
        let handle = self.handle;
        let slot = self.slot_mut(kind);
        if let Some(effect) = slot.effect.take() {
            driver.stop_effect(handle, effect);
            driver.destroy_effect(handle, effect);
        }
    }

    /// Stop every active effect slot on this device.
    pub(crate) fn stop_all<D: InputDriver>(&mut self, driver: &mut D) {
        self.stop(driver, EffectKind::Constant);
        self.stop(driver, EffectKind::Vibration);
        self.stop(driver, EffectKind::Spring);
        self.stop(driver, EffectKind::Friction);
    }

    /// Stop everything and release the haptic context.
    pub(crate) fn close<D: InputDriver>(mut self, driver: &mut D) {
        self.stop_all(driver);
        driver.close_haptic(self.handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scaling_multiplies_by_device_max_and_tuning() {
        assert_eq!(scale_level(0.5, 100, 1.0), 50);
        assert_eq!(scale_level(0.5, 32767, 1.0), 16384);
        assert_eq!(scale_level(1.0, 100, 0.7), 70);
    }

    #[test]
    fn scaling_clamps_to_device_range() {
        assert_eq!(scale_level(2.0, 100, 1.0), 100);
        assert_eq!(scale_level(-0.5, 100, 1.0), 0);
        // Tuning above 100% still cannot exceed the device maximum.
        assert_eq!(scale_level(1.0, 100, 1.5), 100);
    }

    #[test]
    fn tuning_derives_from_percentages() {
        let cfg = InputConfig {
            constant_force_max: 70,
            vibrate_max: 25,
            ..InputConfig::default()
        };
        let tuning = FeedbackTuning::from_config(&cfg);
        assert_eq!(scale_level(1.0, 100, tuning.scale_for(EffectKind::Constant)), 70);
        assert_eq!(scale_level(1.0, 100, tuning.scale_for(EffectKind::Vibration)), 25);
        assert_eq!(scale_level(1.0, 100, tuning.scale_for(EffectKind::Spring)), 100);
    }
}
