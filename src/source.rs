//! Tagged input sources.
//!
//! A source identifies one control (a key, a mouse axis or button, a
//! joystick axis, POV direction or button) together with the indices needed
//! to query the snapshot cache. The set of kinds is closed, so sources are
//! plain enum variants resolved by
//! [`InputSystem::read_source`](crate::system::InputSystem::read_source)
//! rather than trait objects.

use crate::state::PovDirs;

/// Which mouse a mouse-bound source reads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MouseSelector {
    /// The synthesized combined mouse aggregating all physical mice.
    Combined,
    /// One physical mouse by enumeration index.
    Physical(usize),
}

/// How a mouse axis reports movement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MouseMotion {
    /// Accumulated absolute position (centered reporting).
    Absolute,
    /// Per-poll delta.
    Delta,
}

/// One bindable control, resolved against the last poll's snapshot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputSource {
    /// A key on one logical keyboard, by key-table index.
    Key { kbd: usize, key_index: usize },
    /// A mouse axis (0 = x, 1 = y, 2 = wheel).
    MouseAxis {
        mouse: MouseSelector,
        axis: u8,
        motion: MouseMotion,
    },
    MouseButton { mouse: MouseSelector, button: u8 },
    JoyAxis { joy: usize, axis: u8 },
    /// A POV hat held in (at least) the given direction.
    JoyPov {
        joy: usize,
        pov: u8,
        dir: PovDirs,
    },
    JoyButton { joy: usize, button: u8 },
}

impl InputSource {
    /// Build a key source from a key name, if the name is known.
    pub fn key(kbd: usize, name: &str) -> Option<InputSource> {
        crate::keymap::key_index(name).map(|key_index| InputSource::Key { kbd, key_index })
    }
}
