//! Input tunables.
//!
//! [`InputConfig`] carries the settings this layer reads from the emulator's
//! configuration store: the per-effect force-feedback scale factors, the
//! mouse reporting mode, and the keyboard merge policy. It deserializes from
//! a TOML table and also answers the string-keyed lookups the configuration
//! store exposes.

use serde::{Deserialize, Serialize};

/// A tunable value as stored in the configuration node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Tunable {
    UInt(u32),
    Bool(bool),
}

/// Tunables consumed by the input system.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InputConfig {
    /// Constant-force scale, percent of the device-reported maximum.
    pub constant_force_max: u32,
    /// Self-center (spring) scale, percent of the device maximum.
    pub self_center_max: u32,
    /// Friction scale, percent of the device maximum.
    pub friction_max: u32,
    /// Vibration scale, percent of the device maximum.
    pub vibrate_max: u32,
    /// Report mouse axes as absolute-centered position instead of
    /// relative deltas.
    pub mouse_centered: bool,
    /// Expose all physical keyboards as one merged logical keyboard bank.
    pub merge_keyboards: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        InputConfig {
            constant_force_max: 100,
            self_center_max: 100,
            friction_max: 100,
            vibrate_max: 100,
            mouse_centered: false,
            merge_keyboards: true,
        }
    }
}

impl InputConfig {
    /// Parse a TOML table of tunables. Missing keys take their defaults.
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// String-keyed lookup matching the configuration store's key names.
    pub fn lookup(&self, key: &str) -> Option<Tunable> {
        match key {
            "constant_force_max" => Some(Tunable::UInt(self.constant_force_max)),
            "self_center_max" => Some(Tunable::UInt(self.self_center_max)),
            "friction_max" => Some(Tunable::UInt(self.friction_max)),
            "vibrate_max" => Some(Tunable::UInt(self.vibrate_max)),
            "mouse_centered" => Some(Tunable::Bool(self.mouse_centered)),
            "merge_keyboards" => Some(Tunable::Bool(self.merge_keyboards)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_apply_for_missing_keys() {
        let cfg = InputConfig::from_toml("constant_force_max = 80\n").unwrap();
        assert_eq!(cfg.constant_force_max, 80);
        assert_eq!(cfg.vibrate_max, 100);
        assert!(cfg.merge_keyboards);
        assert!(!cfg.mouse_centered);
    }

    #[test]
    fn lookup_answers_store_keys() {
        let cfg = InputConfig::default();
        assert_eq!(cfg.lookup("friction_max"), Some(Tunable::UInt(100)));
        assert_eq!(cfg.lookup("mouse_centered"), Some(Tunable::Bool(false)));
        assert_eq!(cfg.lookup("unknown"), None);
    }

    #[test]
    fn full_table_parses() {
        let cfg = InputConfig::from_toml(
            "constant_force_max = 70\n\
             self_center_max = 50\n\
             friction_max = 40\n\
             vibrate_max = 90\n\
             mouse_centered = true\n\
             merge_keyboards = false\n",
        )
        .unwrap();
        assert_eq!(
            cfg,
            InputConfig {
                constant_force_max: 70,
                self_center_max: 50,
                friction_max: 40,
                vibrate_max: 90,
                mouse_centered: true,
                merge_keyboards: false,
            }
        );
    }
}
