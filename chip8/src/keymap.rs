use sdl2::keyboard::Keycode;

/// A host key that means something to the emulator
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Control {
    /// One of the hex keys 0..F
    Key(u8),
    /// Halve the time slept between steps
    Faster,
    /// Double the time slept between steps
    Slower,
}

/// # Keymap
/// Chip-8 input is generated with a hexadecimal keypad.
///
/// This original layout is mapped to the left 4 alphanumeric columns.
/// The column right of it holds the speed controls.
/// ```text
/// |1|2|3|C|      |1|2|3|4|    |5| faster
/// |4|5|6|D|  ->  |Q|W|E|R|    |T| slower
/// |7|8|9|E|  ->  |A|S|D|F|
/// |A|0|B|F|      |Z|X|C|V|
/// ```
pub fn control(key: Keycode) -> Option<Control> {
    let hex = match key {
        Keycode::X => 0x0,
        Keycode::Num1 => 0x1,
        Keycode::Num2 => 0x2,
        Keycode::Num3 => 0x3,
        Keycode::Q => 0x4,
        Keycode::W => 0x5,
        Keycode::E => 0x6,
        Keycode::A => 0x7,
        Keycode::S => 0x8,
        Keycode::D => 0x9,
        Keycode::Z => 0xA,
        Keycode::C => 0xB,
        Keycode::Num4 => 0xC,
        Keycode::R => 0xD,
        Keycode::F => 0xE,
        Keycode::V => 0xF,
        Keycode::Num5 => return Some(Control::Faster),
        Keycode::T => return Some(Control::Slower),
        _ => return None,
    };
    Some(Control::Key(hex))
}

/// The keyboard layout as printed at start-up
pub fn legend() -> String {
    [
        "Keyboard  ==>  Chip8",
        "1 2 3 4   ==>  1 2 3 C",
        "Q W E R   ==>  4 5 6 D",
        "A S D F   ==>  7 8 9 E",
        "Z X C V   ==>  A 0 B F",
        "Emulation speed controls: faster [5] slower [T]",
    ]
    .join("\n")
}
