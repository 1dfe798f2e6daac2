//! cabinput: device-abstraction and polling engine for arcade-emulator
//! input.
//!
//! Unifies keyboards, multi-mouse setups, and joysticks with force-feedback
//! actuators behind one per-frame polling interface, so the emulator core
//! can query logical control states without knowing which device class
//! produced them. The native input/haptics library is injected through the
//! [`InputDriver`] trait; tests run against a scripted fake.

pub mod config;
pub mod details;
pub mod driver;
pub mod error;
pub mod feedback;
pub mod keymap;
pub mod source;
pub mod state;
pub mod system;

pub use config::*;
pub use details::*;
pub use driver::*;
pub use error::*;
pub use feedback::ForceFeedbackCmd;
pub use source::*;
pub use state::*;
pub use system::*;
