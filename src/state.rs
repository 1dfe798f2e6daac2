//! Per-poll snapshot types.
//!
//! These are the process-local buffers the poll cycle writes and the
//! accessors read. A snapshot is overwritten wholesale on every poll and is
//! immutable between polls: repeated accessor calls with the same arguments
//! between two polls always return the same value, and never touch the
//! driver.
//!
//! ## Conventions
//! - Mouse `x`/`y` are accumulated position, `dx`/`dy` per-poll deltas.
//! - `z` accumulates wheel detents across the session; `wheel_dir` is the
//!   sign of the last poll's wheel motion.
//! - POV hats report a direction mask (diagonals set two bits), empty =
//!   centered.

use bitflags::bitflags;

/// Number of scancodes tracked per keyboard bank.
pub const NUM_SCANCODES: usize = 512;

const KEY_WORDS: usize = NUM_SCANCODES / 64;

bitflags! {
    /// Mouse button mask captured in a snapshot.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct MouseButtons: u16 {
        const LEFT   = 1 << 0;
        const MIDDLE = 1 << 1;
        const RIGHT  = 1 << 2;
        const X1     = 1 << 3;
        const X2     = 1 << 4;
    }
}

bitflags! {
    /// POV hat direction mask. Diagonals combine two adjacent directions;
    /// an empty mask is centered.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct PovDirs: u8 {
        const UP    = 1 << 0;
        const RIGHT = 1 << 1;
        const DOWN  = 1 << 2;
        const LEFT  = 1 << 3;
    }
}

/// Raw keyboard bitset, indexed by scancode.
#[derive(Clone, Copy)]
pub struct KeyBitset([u64; KEY_WORDS]);

impl Default for KeyBitset {
    fn default() -> Self {
        KeyBitset([0; KEY_WORDS])
    }
}

impl KeyBitset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, scancode: u16) {
        let idx = scancode as usize;
        if idx < NUM_SCANCODES {
            self.0[idx / 64] |= 1 << (idx % 64);
        }
    }

    pub fn is_set(&self, scancode: u16) -> bool {
        let idx = scancode as usize;
        idx < NUM_SCANCODES && self.0[idx / 64] & (1 << (idx % 64)) != 0
    }

    /// OR another bank into this one. Used to merge physical keyboards
    /// into the single logical keyboard bank.
    pub fn merge(&mut self, other: &KeyBitset) {
        for (w, o) in self.0.iter_mut().zip(other.0.iter()) {
            *w |= o;
        }
    }

    pub fn clear(&mut self) {
        self.0 = [0; KEY_WORDS];
    }
}

impl std::fmt::Debug for KeyBitset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let pressed: Vec<usize> = (0..NUM_SCANCODES)
            .filter(|&i| self.is_set(i as u16))
            .collect();
        f.debug_tuple("KeyBitset").field(&pressed).finish()
    }
}

/// Snapshot of one mouse (or of the synthesized combined mouse).
///
/// Never partially updated: [`MouseState::refresh`] rewrites every field
/// from the raw driver state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MouseState {
    pub x: i32,
    pub y: i32,
    /// Accumulated wheel detents.
    pub z: i32,
    pub dx: i32,
    pub dy: i32,
    pub wheel_delta: i32,
    /// Sign of the last poll's wheel motion: -1, 0 or 1.
    pub wheel_dir: i32,
    pub buttons: MouseButtons,
}

impl MouseState {
    /// Overwrite this snapshot from a fresh driver read.
    pub fn refresh(&mut self, raw: &crate::driver::RawMouseState) {
        self.x = raw.x;
        self.y = raw.y;
        self.z += raw.wheel_delta;
        self.dx = raw.dx;
        self.dy = raw.dy;
        self.wheel_delta = raw.wheel_delta;
        self.wheel_dir = raw.wheel_delta.signum();
        self.buttons = raw.buttons;
    }

    /// Aggregate all physical mouse snapshots from the same poll into the
    /// combined logical mouse: arithmetic sum for every axis, bitwise OR
    /// for buttons.
    pub fn combine(states: &[MouseState]) -> MouseState {
        let mut comb = MouseState::default();
        for s in states {
            comb.x += s.x;
            comb.y += s.y;
            comb.z += s.z;
            comb.dx += s.dx;
            comb.dy += s.dy;
            comb.wheel_delta += s.wheel_delta;
            comb.buttons |= s.buttons;
        }
        comb.wheel_dir = comb.wheel_delta.signum();
        comb
    }

    /// Value of one mouse axis (0 = x, 1 = y, 2 = wheel accumulation).
    pub fn axis(&self, axis: u8) -> i32 {
        match axis {
            0 => self.x,
            1 => self.y,
            2 => self.z,
            _ => 0,
        }
    }

    /// Per-poll delta of one mouse axis.
    pub fn delta(&self, axis: u8) -> i32 {
        match axis {
            0 => self.dx,
            1 => self.dy,
            2 => self.wheel_delta,
            _ => 0,
        }
    }

    pub fn button(&self, button: u8) -> bool {
        MouseButtons::from_bits_truncate(1u16.checked_shl(button as u32).unwrap_or(0))
            .intersects(self.buttons)
    }
}

/// Snapshot of one joystick's axes, buttons and POV hats.
#[derive(Clone, Debug, Default)]
pub struct JoyState {
    pub axes: Vec<i32>,
    pub buttons: Vec<bool>,
    pub povs: Vec<PovDirs>,
}

impl JoyState {
    /// Overwrite this snapshot from a fresh driver read.
    pub fn refresh(&mut self, raw: crate::driver::RawJoyState) {
        self.axes = raw.axes;
        self.buttons = raw.buttons;
        self.povs = raw.povs;
    }

    pub fn axis(&self, axis: u8) -> i32 {
        self.axes.get(axis as usize).copied().unwrap_or(0)
    }

    pub fn button(&self, button: u8) -> bool {
        self.buttons.get(button as usize).copied().unwrap_or(false)
    }

    pub fn pov(&self, pov: u8) -> PovDirs {
        self.povs.get(pov as usize).copied().unwrap_or(PovDirs::empty())
    }
}
