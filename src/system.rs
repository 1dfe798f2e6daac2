//! The input-system facade.
//!
//! [`InputSystem`] owns the driver, every open device handle, and the
//! per-frame snapshots. The emulator calls [`InputSystem::poll`] once per
//! frame tick on its main thread; every accessor is a pure read against the
//! last snapshot. There is no internal locking: no concurrent mutation of
//! device state is permitted, and the driver's event pump is drained
//! synchronously inside `poll`.

use log::{debug, info, warn};

use crate::config::InputConfig;
use crate::details::{JoyDetails, KeyDetails, MouseDetails};
use crate::driver::{HapticCaps, InputDriver, JoyDesc, JoystickHandle};
use crate::error::InputError;
use crate::feedback::{FeedbackTuning, ForceFeedbackCmd, HapticSlots};
use crate::keymap;
use crate::source::{InputSource, MouseMotion, MouseSelector};
use crate::state::{JoyState, KeyBitset, MouseState, PovDirs};

/// Device-abstraction and polling engine over an injected [`InputDriver`].
///
/// Construction enumerates all attached devices and opens every joystick
/// (plus a haptic context for each stick that supports one). Handles are
/// owned exclusively by this value and closed exactly once on drop, haptic
/// context before its joystick.
pub struct InputSystem<D: InputDriver> {
    driver: D,
    config: InputConfig,
    tuning: FeedbackTuning,

    key_details: Vec<KeyDetails>,
    mouse_details: Vec<MouseDetails>,
    joy_details: Vec<JoyDetails>,

    joysticks: Vec<JoystickHandle>,
    haptics: Vec<Option<HapticSlots>>,

    // Snapshots, rewritten by `poll` and read by the accessors.
    key_states: Vec<KeyBitset>,
    merged_keys: KeyBitset,
    mouse_states: Vec<MouseState>,
    combined_mouse: MouseState,
    joy_states: Vec<JoyState>,
}

impl<D: InputDriver> InputSystem<D> {
    /// Enumerate devices and open joysticks/haptics.
    ///
    /// Fails with [`InputError::NoKeyboard`] if no usable keyboard exists
    /// (a keyboard is mandatory for menu navigation), and in that case no
    /// mouse or joystick is queried at all. Individual devices that fail to
    /// open are skipped with a warning; the system continues with the
    /// reduced device set.
    pub fn new(mut driver: D, config: InputConfig) -> Result<Self, InputError> {
        let num_keyboards = driver.num_keyboards()?;
        if num_keyboards == 0 {
            return Err(InputError::NoKeyboard);
        }

        let key_details = if config.merge_keyboards {
            vec![KeyDetails {
                name: "All keyboards".to_string(),
            }]
        } else {
            (0..num_keyboards)
                .map(|i| {
                    driver
                        .keyboard_desc(i)
                        .map(KeyDetails::from)
                        .unwrap_or_else(|| KeyDetails {
                            name: format!("Keyboard {i}"),
                        })
                })
                .collect()
        };

        let num_mice = driver.num_mice()?;
        let mouse_details: Vec<MouseDetails> = (0..num_mice)
            .map(|i| {
                driver
                    .mouse_desc(i)
                    .map(MouseDetails::from)
                    .unwrap_or_else(|| MouseDetails {
                        name: format!("Mouse {i}"),
                        num_axes: 2,
                        has_wheel: false,
                    })
            })
            .collect();

        let tuning = FeedbackTuning::from_config(&config);
        let mut system = InputSystem {
            driver,
            config,
            tuning,
            key_details,
            mouse_states: vec![MouseState::default(); mouse_details.len()],
            mouse_details,
            joy_details: Vec::new(),
            joysticks: Vec::new(),
            haptics: Vec::new(),
            key_states: vec![KeyBitset::default(); num_keyboards],
            merged_keys: KeyBitset::default(),
            combined_mouse: MouseState::default(),
            joy_states: Vec::new(),
        };

        // Joysticks opened from here on are released by Drop if
        // enumeration fails partway through.
        system.open_joysticks()?;

        info!(
            "input system ready: {} keyboard(s), {} mouse/mice, {} joystick(s)",
            system.num_keyboards(),
            system.num_mice(),
            system.num_joysticks()
        );
        Ok(system)
    }

    /// Open every attached joystick and probe haptic capabilities.
    fn open_joysticks(&mut self) -> Result<(), InputError> {
        let count = self.driver.num_joysticks()?;
        for index in 0..count {
            let desc = self.driver.joystick_desc(index).unwrap_or_else(|| JoyDesc {
                name: format!("Joystick {index}"),
                num_axes: 0,
                num_povs: 0,
                num_buttons: 0,
            });

            let handle = match self.driver.open_joystick(index) {
                Ok(handle) => handle,
                Err(err) => {
                    warn!("skipping joystick {index} ({}): {err}", desc.name);
                    continue;
                }
            };

            let (caps, slots) = match self.driver.open_haptic(handle) {
                Ok(haptic) => match self.driver.haptic_caps(haptic) {
                    Ok(caps) if caps.any() => (caps, Some(HapticSlots::new(haptic))),
                    Ok(_) => {
                        self.driver.close_haptic(haptic);
                        (HapticCaps::default(), None)
                    }
                    Err(err) => {
                        debug!("haptic probe failed for {}: {err}", desc.name);
                        self.driver.close_haptic(haptic);
                        (HapticCaps::default(), None)
                    }
                },
                Err(err) => {
                    debug!("no haptics on {}: {err}", desc.name);
                    (HapticCaps::default(), None)
                }
            };

            debug!(
                "opened joystick {index}: {} (force feedback: {})",
                desc.name,
                caps.any()
            );
            self.joysticks.push(handle);
            self.haptics.push(slots);
            self.joy_states.push(JoyState::default());
            self.joy_details.push(JoyDetails::new(desc, caps));
        }
        Ok(())
    }

    /// Stop all effects and release every handle, haptic contexts first.
    /// Safe to call more than once.
    fn close_joysticks(&mut self) {
        for slots in self.haptics.drain(..).flatten() {
            slots.close(&mut self.driver);
        }
        for handle in self.joysticks.drain(..) {
            self.driver.close_joystick(handle);
        }
        self.joy_states.clear();
        self.joy_details.clear();
    }

    /// Refresh every snapshot from the driver. Called once per frame.
    ///
    /// A device that fails to read keeps its last-known snapshot for this
    /// cycle; only an unrecoverable driver failure (a dead event pump)
    /// fails the poll itself.
    pub fn poll(&mut self) -> Result<(), InputError> {
        self.driver.pump_events()?;

        for (i, bank) in self.key_states.iter_mut().enumerate() {
            match self.driver.key_state(i) {
                Ok(fresh) => *bank = fresh,
                Err(err) => debug!("keyboard {i} read failed, serving stale state: {err}"),
            }
        }
        self.merged_keys.clear();
        for bank in &self.key_states {
            self.merged_keys.merge(bank);
        }

        for (i, state) in self.mouse_states.iter_mut().enumerate() {
            match self.driver.mouse_state(i) {
                Ok(raw) => state.refresh(&raw),
                Err(err) => debug!("mouse {i} read failed, serving stale state: {err}"),
            }
        }
        self.combined_mouse = MouseState::combine(&self.mouse_states);

        for (state, handle) in self.joy_states.iter_mut().zip(self.joysticks.iter()) {
            match self.driver.joystick_state(*handle) {
                Ok(raw) => state.refresh(raw),
                Err(err) => debug!("joystick read failed, serving stale state: {err}"),
            }
        }
        Ok(())
    }

    pub fn num_keyboards(&self) -> usize {
        self.key_details.len()
    }

    pub fn num_mice(&self) -> usize {
        self.mouse_details.len()
    }

    pub fn num_joysticks(&self) -> usize {
        self.joy_details.len()
    }

    pub fn key_details(&self, kbd: usize) -> Option<&KeyDetails> {
        self.key_details.get(kbd)
    }

    pub fn mouse_details(&self, mse: usize) -> Option<&MouseDetails> {
        self.mouse_details.get(mse)
    }

    pub fn joy_details(&self, joy: usize) -> Option<&JoyDetails> {
        self.joy_details.get(joy)
    }

    /// Index of a named key in the key table.
    pub fn key_index(&self, name: &str) -> Option<usize> {
        keymap::key_index(name)
    }

    /// Name of the key at a table index.
    pub fn key_name(&self, index: usize) -> Option<&'static str> {
        keymap::key_name(index)
    }

    /// Whether the key is down on the given logical keyboard.
    ///
    /// With `merge_keyboards` set, keyboard 0 is the merged bank of all
    /// physical keyboards. Out-of-range indices read as not pressed.
    pub fn is_key_pressed(&self, kbd: usize, key_index: usize) -> bool {
        let Some(scancode) = keymap::scancode(key_index) else {
            return false;
        };
        if self.config.merge_keyboards {
            kbd == 0 && self.merged_keys.is_set(scancode)
        } else {
            self.key_states
                .get(kbd)
                .map_or(false, |bank| bank.is_set(scancode))
        }
    }

    /// Last-poll snapshot of a mouse, or `None` for an absent physical
    /// mouse.
    pub fn mouse_snapshot(&self, mouse: MouseSelector) -> Option<&MouseState> {
        match mouse {
            MouseSelector::Combined => Some(&self.combined_mouse),
            MouseSelector::Physical(i) => self.mouse_states.get(i),
        }
    }

    /// Accumulated value of a mouse axis (0 = x, 1 = y, 2 = wheel).
    pub fn mouse_axis_value(&self, mouse: MouseSelector, axis: u8) -> i32 {
        self.mouse_snapshot(mouse).map_or(0, |s| s.axis(axis))
    }

    /// Per-poll delta of a mouse axis.
    pub fn mouse_delta_value(&self, mouse: MouseSelector, axis: u8) -> i32 {
        self.mouse_snapshot(mouse).map_or(0, |s| s.delta(axis))
    }

    /// Sign of the last poll's wheel motion: -1, 0 or 1.
    pub fn mouse_wheel_dir(&self, mouse: MouseSelector) -> i32 {
        self.mouse_snapshot(mouse).map_or(0, |s| s.wheel_dir)
    }

    pub fn is_mouse_button_pressed(&self, mouse: MouseSelector, button: u8) -> bool {
        self.mouse_snapshot(mouse).map_or(false, |s| s.button(button))
    }

    pub fn joy_axis_value(&self, joy: usize, axis: u8) -> i32 {
        self.joy_states.get(joy).map_or(0, |s| s.axis(axis))
    }

    /// Whether a POV hat is held in (at least) the given direction.
    /// Diagonals count for both of their component directions.
    pub fn is_joy_pov_in_dir(&self, joy: usize, pov: u8, dir: PovDirs) -> bool {
        self.joy_states
            .get(joy)
            .map_or(false, |s| !dir.is_empty() && s.pov(pov).contains(dir))
    }

    pub fn is_joy_button_pressed(&self, joy: usize, button: u8) -> bool {
        self.joy_states.get(joy).map_or(false, |s| s.button(button))
    }

    /// Dispatch a force-feedback command to one joystick.
    ///
    /// Returns whether the command reached a haptic-capable device. Effects
    /// bind per device; the axis argument is accepted for contract
    /// compatibility. Commands for absent devices or effect types the
    /// device lacks do nothing.
    pub fn process_force_feedback_cmd(
        &mut self,
        joy: usize,
        _axis: u8,
        cmd: ForceFeedbackCmd,
    ) -> bool {
        let Some(details) = self.joy_details.get(joy) else {
            return false;
        };
        let Some(slots) = self.haptics.get_mut(joy).and_then(Option::as_mut) else {
            return false;
        };
        slots.apply(&mut self.driver, details, &self.tuning, cmd);
        true
    }

    /// Stop every active effect on one joystick. Called on loss of focus.
    pub fn stop_all_effects(&mut self, joy: usize) {
        if let Some(slots) = self.haptics.get_mut(joy).and_then(Option::as_mut) {
            slots.stop_all(&mut self.driver);
        }
    }

    pub fn set_mouse_visibility(&mut self, visible: bool) {
        self.driver.set_mouse_visibility(visible);
    }

    /// Source for "whichever mouse moved": the combined mouse, reporting
    /// absolute-centered or relative-delta motion per configuration.
    pub fn any_mouse_axis_source(&self, axis: u8) -> InputSource {
        InputSource::MouseAxis {
            mouse: MouseSelector::Combined,
            axis,
            motion: if self.config.mouse_centered {
                MouseMotion::Absolute
            } else {
                MouseMotion::Delta
            },
        }
    }

    /// Resolve a source against the last snapshot. Buttons and keys read
    /// as 0/1; absent devices read as 0.
    pub fn read_source(&self, source: &InputSource) -> i32 {
        match *source {
            InputSource::Key { kbd, key_index } => self.is_key_pressed(kbd, key_index) as i32,
            InputSource::MouseAxis {
                mouse,
                axis,
                motion,
            } => match motion {
                MouseMotion::Absolute => self.mouse_axis_value(mouse, axis),
                MouseMotion::Delta => self.mouse_delta_value(mouse, axis),
            },
            InputSource::MouseButton { mouse, button } => {
                self.is_mouse_button_pressed(mouse, button) as i32
            }
            InputSource::JoyAxis { joy, axis } => self.joy_axis_value(joy, axis),
            InputSource::JoyPov { joy, pov, dir } => self.is_joy_pov_in_dir(joy, pov, dir) as i32,
            InputSource::JoyButton { joy, button } => self.is_joy_button_pressed(joy, button) as i32,
        }
    }

    /// Whether a source currently reads non-neutral.
    pub fn is_source_active(&self, source: &InputSource) -> bool {
        self.read_source(source) != 0
    }

    pub fn config(&self) -> &InputConfig {
        &self.config
    }
}

impl<D: InputDriver> Drop for InputSystem<D> {
    fn drop(&mut self) {
        self.close_joysticks();
    }
}
