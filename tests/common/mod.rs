//! Scripted fake driver for exercising the input system end to end.
//!
//! State lives behind an `Rc<RefCell<..>>` so a test can keep a handle to
//! the driver after handing a clone to the system, inject device state
//! between polls, and inspect the effect operations the system issued.

// Not every test binary uses every helper.
#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use cabinput::{
    DriverError, EffectId, EffectSpec, HapticCaps, HapticHandle, InputDriver, JoyDesc,
    JoystickHandle, KeyBitset, KeyboardDesc, MouseButtons, MouseDesc, RawJoyState, RawMouseState,
};

/// One scripted physical mouse.
#[derive(Default)]
pub struct FakeMouse {
    pub desc: MouseDesc,
    pub state: RawMouseState,
    /// When set, reads fail with a transient query error.
    pub fail_read: bool,
}

/// One scripted joystick, including its haptic behavior.
#[derive(Default)]
pub struct FakeJoystick {
    pub desc: JoyDesc,
    pub caps: HapticCaps,
    pub state: RawJoyState,
    pub fail_open: bool,
    pub fail_upload: bool,
    pub supports_update: bool,
    pub open: bool,
    pub haptic_open: bool,
}

/// What happened to one uploaded effect.
#[derive(Clone, Debug)]
pub struct EffectRecord {
    pub joy: usize,
    pub spec: EffectSpec,
    pub running: bool,
    pub destroyed: bool,
    pub updates: u32,
}

#[derive(Default)]
pub struct FakeInner {
    pub keyboards: Vec<KeyBitset>,
    pub mice: Vec<FakeMouse>,
    pub joysticks: Vec<FakeJoystick>,
    pub effects: Vec<EffectRecord>,
    pub pump_fail: bool,
    pub mouse_visible: Option<bool>,

    // Call accounting for the scenario assertions.
    pub num_mice_calls: u32,
    pub mouse_state_calls: u32,
    pub joystick_state_calls: u32,
    pub upload_calls: u32,
    pub stop_calls: u32,
}

#[derive(Clone, Default)]
pub struct FakeDriver(pub Rc<RefCell<FakeInner>>);

impl FakeDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_keyboard(&self) {
        self.0.borrow_mut().keyboards.push(KeyBitset::new());
    }

    pub fn add_mouse(&self, has_wheel: bool) -> usize {
        let mut inner = self.0.borrow_mut();
        let idx = inner.mice.len();
        inner.mice.push(FakeMouse {
            desc: MouseDesc {
                name: format!("Fake mouse {idx}"),
                num_axes: if has_wheel { 3 } else { 2 },
                has_wheel,
            },
            ..FakeMouse::default()
        });
        idx
    }

    pub fn add_joystick(&self, caps: HapticCaps) -> usize {
        let mut inner = self.0.borrow_mut();
        let idx = inner.joysticks.len();
        inner.joysticks.push(FakeJoystick {
            desc: JoyDesc {
                name: format!("Fake stick {idx}"),
                num_axes: 4,
                num_povs: 1,
                num_buttons: 12,
            },
            caps,
            state: RawJoyState {
                axes: vec![0; 4],
                buttons: vec![false; 12],
                povs: vec![Default::default(); 1],
            },
            ..FakeJoystick::default()
        });
        idx
    }

    pub fn press_key(&self, kbd: usize, scancode: u16) {
        self.0.borrow_mut().keyboards[kbd].set(scancode);
    }

    pub fn release_all_keys(&self, kbd: usize) {
        self.0.borrow_mut().keyboards[kbd].clear();
    }

    pub fn set_mouse(&self, mse: usize, state: RawMouseState) {
        self.0.borrow_mut().mice[mse].state = state;
    }

    pub fn set_mouse_buttons(&self, mse: usize, buttons: MouseButtons) {
        self.0.borrow_mut().mice[mse].state.buttons = buttons;
    }

    pub fn set_joy_state(&self, joy: usize, state: RawJoyState) {
        self.0.borrow_mut().joysticks[joy].state = state;
    }

    /// Effects that are uploaded and not yet destroyed.
    pub fn live_effects(&self) -> Vec<EffectRecord> {
        self.0
            .borrow()
            .effects
            .iter()
            .filter(|e| !e.destroyed)
            .cloned()
            .collect()
    }

}

impl InputDriver for FakeDriver {
    fn pump_events(&mut self) -> Result<(), DriverError> {
        if self.0.borrow().pump_fail {
            Err(DriverError::Query("event pump dead".into()))
        } else {
            Ok(())
        }
    }

    fn num_keyboards(&mut self) -> Result<usize, DriverError> {
        Ok(self.0.borrow().keyboards.len())
    }

    fn keyboard_desc(&self, kbd: usize) -> Option<KeyboardDesc> {
        (kbd < self.0.borrow().keyboards.len()).then(|| KeyboardDesc {
            name: format!("Fake keyboard {kbd}"),
        })
    }

    fn num_mice(&mut self) -> Result<usize, DriverError> {
        let mut inner = self.0.borrow_mut();
        inner.num_mice_calls += 1;
        Ok(inner.mice.len())
    }

    fn mouse_desc(&self, mse: usize) -> Option<MouseDesc> {
        self.0.borrow().mice.get(mse).map(|m| m.desc.clone())
    }

    fn num_joysticks(&mut self) -> Result<usize, DriverError> {
        Ok(self.0.borrow().joysticks.len())
    }

    fn joystick_desc(&self, joy: usize) -> Option<JoyDesc> {
        self.0.borrow().joysticks.get(joy).map(|j| j.desc.clone())
    }

    fn key_state(&mut self, kbd: usize) -> Result<KeyBitset, DriverError> {
        self.0
            .borrow()
            .keyboards
            .get(kbd)
            .copied()
            .ok_or_else(|| DriverError::NotAttached(format!("keyboard {kbd}")))
    }

    fn mouse_state(&mut self, mse: usize) -> Result<RawMouseState, DriverError> {
        let mut inner = self.0.borrow_mut();
        inner.mouse_state_calls += 1;
        let mouse = inner
            .mice
            .get(mse)
            .ok_or_else(|| DriverError::NotAttached(format!("mouse {mse}")))?;
        if mouse.fail_read {
            return Err(DriverError::Query(format!("mouse {mse} read failed")));
        }
        Ok(mouse.state)
    }

    fn open_joystick(&mut self, index: usize) -> Result<JoystickHandle, DriverError> {
        let mut inner = self.0.borrow_mut();
        let joy = inner
            .joysticks
            .get_mut(index)
            .ok_or_else(|| DriverError::NotAttached(format!("joystick {index}")))?;
        if joy.fail_open {
            return Err(DriverError::NotAttached(format!("joystick {index}")));
        }
        joy.open = true;
        Ok(JoystickHandle(index as u32))
    }

    fn close_joystick(&mut self, handle: JoystickHandle) {
        if let Some(joy) = self.0.borrow_mut().joysticks.get_mut(handle.0 as usize) {
            joy.open = false;
        }
    }

    fn joystick_state(&mut self, handle: JoystickHandle) -> Result<RawJoyState, DriverError> {
        let mut inner = self.0.borrow_mut();
        inner.joystick_state_calls += 1;
        let joy = inner
            .joysticks
            .get(handle.0 as usize)
            .ok_or_else(|| DriverError::NotAttached("joystick".into()))?;
        if !joy.open {
            return Err(DriverError::NotAttached("joystick closed".into()));
        }
        Ok(joy.state.clone())
    }

    fn open_haptic(&mut self, joy: JoystickHandle) -> Result<HapticHandle, DriverError> {
        let mut inner = self.0.borrow_mut();
        let stick = inner
            .joysticks
            .get_mut(joy.0 as usize)
            .ok_or_else(|| DriverError::NotAttached("joystick".into()))?;
        if !stick.caps.any() {
            return Err(DriverError::Unsupported);
        }
        stick.haptic_open = true;
        Ok(HapticHandle(joy.0))
    }

    fn close_haptic(&mut self, handle: HapticHandle) {
        if let Some(stick) = self.0.borrow_mut().joysticks.get_mut(handle.0 as usize) {
            stick.haptic_open = false;
        }
    }

    fn haptic_caps(&mut self, handle: HapticHandle) -> Result<HapticCaps, DriverError> {
        self.0
            .borrow()
            .joysticks
            .get(handle.0 as usize)
            .map(|j| j.caps)
            .ok_or_else(|| DriverError::NotAttached("haptic".into()))
    }

    fn upload_effect(
        &mut self,
        handle: HapticHandle,
        spec: &EffectSpec,
    ) -> Result<EffectId, DriverError> {
        let mut inner = self.0.borrow_mut();
        inner.upload_calls += 1;
        let joy = handle.0 as usize;
        if inner.joysticks[joy].fail_upload {
            return Err(DriverError::ResourceExhausted);
        }
        let id = EffectId(inner.effects.len() as u32);
        inner.effects.push(EffectRecord {
            joy,
            spec: *spec,
            running: false,
            destroyed: false,
            updates: 0,
        });
        Ok(id)
    }

    fn update_effect(
        &mut self,
        handle: HapticHandle,
        effect: EffectId,
        spec: &EffectSpec,
    ) -> Result<(), DriverError> {
        let mut inner = self.0.borrow_mut();
        if !inner.joysticks[handle.0 as usize].supports_update {
            return Err(DriverError::Unsupported);
        }
        let record = &mut inner.effects[effect.0 as usize];
        record.spec = *spec;
        record.updates += 1;
        Ok(())
    }

    fn run_effect(&mut self, _handle: HapticHandle, effect: EffectId) -> Result<(), DriverError> {
        self.0.borrow_mut().effects[effect.0 as usize].running = true;
        Ok(())
    }

    fn stop_effect(&mut self, _handle: HapticHandle, effect: EffectId) {
        let mut inner = self.0.borrow_mut();
        inner.stop_calls += 1;
        inner.effects[effect.0 as usize].running = false;
    }

    fn destroy_effect(&mut self, _handle: HapticHandle, effect: EffectId) {
        let mut inner = self.0.borrow_mut();
        let record = &mut inner.effects[effect.0 as usize];
        record.running = false;
        record.destroyed = true;
    }

    fn set_mouse_visibility(&mut self, visible: bool) {
        self.0.borrow_mut().mouse_visible = Some(visible);
    }
}
