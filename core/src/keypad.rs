use log::warn;

use crate::constants::KEY_COUNT;

/// # Keypad
/// Level state of the 16 hex keys 0..F.
///
/// Only the host changes it; instructions only read it.
#[derive(Clone, Default)]
pub struct Keypad {
    pressed: [bool; KEY_COUNT],
}

impl Keypad {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: u8) {
        self.set(key, true);
    }

    pub fn release(&mut self, key: u8) {
        self.set(key, false);
    }

    fn set(&mut self, key: u8, pressed: bool) {
        match self.pressed.get_mut(usize::from(key)) {
            Some(state) => *state = pressed,
            None => warn!("ignoring event for key {:#X}, the keypad only has keys 0..F", key),
        }
    }

    /// Keys past 0xF are never pressed.
    pub fn is_pressed(&self, key: u8) -> bool {
        self.pressed.get(usize::from(key)).copied().unwrap_or(false)
    }

    /// The lowest numbered key currently held down.
    pub fn first_pressed(&self) -> Option<u8> {
        self.pressed.iter().position(|&p| p).map(|key| key as u8)
    }

    pub fn release_all(&mut self) {
        self.pressed = [false; KEY_COUNT];
    }
}
