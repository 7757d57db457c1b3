use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::{debug, trace};

use crate::config::Config;
use crate::constants::{DISPLAY_SIZE, MAX_PROGRAM_SIZE, PROGRAM_START};
use crate::error::{Chip8Error, Result};
use crate::instruction::from_op;
use crate::keypad::Keypad;
use crate::state::State;

/// What the host should play for a completed step
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Tone {
    Silent,
    /// The sound timer was running during this step
    Beep,
}

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Tracks:
///  - current `state`
///  - `keypad` with public interfaces for manipulating it
///  - the `config` every reset rebuilds the state from
///
/// Supplies interfaces for:
/// - resetting and loading programs
/// - pressing and releasing keys
/// - advancing the machine by a single step
/// - consuming its screen for rendering by some display
pub struct Chip8 {
    state: State,
    keypad: Keypad,
    config: Config,
}

impl Chip8 {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        Chip8 {
            state: State::new(&config),
            keypad: Keypad::new(),
            config,
        }
    }

    /// Clears memory, registers, stack, timers, screen and keys, reloads the sprite sheet
    /// and reseeds the random source.
    pub fn reset(&mut self) {
        debug!("resetting machine with {:?}", self.config);
        self.state = State::new(&self.config);
        self.keypad.release_all();
    }

    /// Reset, then load a program from `reader` at 0x200.
    ///
    /// On failure the machine is left freshly reset and nothing has been written.
    ///
    /// # Arguments
    /// * `reader` a source containing the raw program bytes
    pub fn load_rom(&mut self, reader: &mut dyn Read) -> Result<()> {
        self.reset();

        // One byte past the limit is enough to tell an oversized program apart
        let mut program = Vec::with_capacity(MAX_PROGRAM_SIZE + 1);
        reader
            .take(MAX_PROGRAM_SIZE as u64 + 1)
            .read_to_end(&mut program)?;
        if program.len() > MAX_PROGRAM_SIZE {
            return Err(Chip8Error::RomTooLarge {
                size: program.len(),
                max: MAX_PROGRAM_SIZE,
            });
        }

        let start = usize::from(PROGRAM_START);
        self.state.memory[start..start + program.len()].copy_from_slice(&program);
        debug!("loaded {} byte program at {:#05X}", program.len(), PROGRAM_START);
        Ok(())
    }

    /// Reset, then load the program stored at `path`.
    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let mut file = match File::open(path) {
            Ok(file) => file,
            Err(e) => {
                // An unopenable file still leaves a freshly reset machine
                self.reset();
                return Err(e.into());
            }
        };
        self.load_rom(&mut file)
    }

    /// Whether the screen changed since it was last consumed
    pub fn redraw_pending(&self) -> bool {
        self.state.draw_flag
    }

    /// Writes the screen as packed ARGB pixels into `out` and clears the redraw flag
    pub fn consume_frame(&mut self, out: &mut [u32; DISPLAY_SIZE]) {
        self.state.screen.write_argb(out);
        self.state.draw_flag = false;
    }

    /// Set the pressed status of key
    ///
    /// # Arguments
    /// * `key` the index 0..F of the key that was pressed
    pub fn key_down(&mut self, key: u8) {
        self.keypad.press(key);
    }

    /// Unset the pressed status of key
    ///
    /// # Arguments
    /// * `key` the index 0..F of the key that was released
    pub fn key_up(&mut self, key: u8) {
        self.keypad.release(key);
    }

    /// Advances the machine by a single step
    /// - fetches, decodes and executes the opcode at the pc
    /// - counts both timers down once
    ///
    /// A failed step leaves the machine as it was before the step.
    pub fn step(&mut self) -> Result<Tone> {
        let op = self.state.fetch()?;
        let pc = self.state.pc;
        trace!(
            "{:04X} v{:02X?} i{:04X} pc{:04X}",
            op,
            self.state.v,
            self.state.i,
            pc
        );
        let operation = from_op(op).ok_or(Chip8Error::UnknownOpcode { opcode: op, pc })?;
        operation(op, &mut self.state, &self.keypad)?;

        if self.state.tick_timers() {
            Ok(Tone::Beep)
        } else {
            Ok(Tone::Silent)
        }
    }

    pub fn pc(&self) -> u16 {
        self.state.pc
    }

    /// The value of register Vx, if `x` names one of V0..VF
    pub fn register(&self, x: usize) -> Option<u8> {
        self.state.v.get(x).copied()
    }

    /// The address register I
    pub fn index(&self) -> u16 {
        self.state.i
    }

    pub fn delay_timer(&self) -> u8 {
        self.state.delay_timer
    }

    pub fn sound_timer(&self) -> u8 {
        self.state.sound_timer
    }

    pub fn pixel(&self, x: usize, y: usize) -> bool {
        self.state.screen.pixel(x, y)
    }

    pub fn memory(&self) -> &[u8] {
        &self.state.memory
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{PIXEL_OFF, PIXEL_ON, SPRITE_SHEET};
    use crate::screen::SpriteMode;

    fn seeded() -> Chip8 {
        Chip8::with_config(Config {
            seed: Some(0x200),
            ..Config::default()
        })
    }

    fn with_program(program: &[u8]) -> Chip8 {
        let mut chip8 = seeded();
        chip8.load_rom(&mut &program[..]).unwrap();
        chip8
    }

    /// Memory, registers and timers of a machine that was just reset
    fn assert_fresh(chip8: &Chip8) {
        let fresh = seeded();
        assert_eq!(chip8.memory(), fresh.memory());
        assert_eq!(chip8.state.v, fresh.state.v);
        assert_eq!(chip8.state.i, 0);
        assert_eq!(chip8.state.sp, 0);
        assert_eq!(chip8.pc(), 0x200);
        assert_eq!(chip8.delay_timer(), 0);
        assert_eq!(chip8.sound_timer(), 0);
    }

    #[test]
    fn test_load_rom_places_program_at_0x200() {
        let chip8 = with_program(&[0x12, 0x34, 0x56]);
        assert_eq!(chip8.pc(), 0x200);
        assert_eq!(chip8.memory()[0x200..0x204], [0x12, 0x34, 0x56, 0x00]);
        assert_eq!(chip8.memory()[..80], SPRITE_SHEET[..]);
    }

    #[test]
    fn test_load_rom_accepts_largest_program() {
        let program = vec![0xAB; MAX_PROGRAM_SIZE];
        let chip8 = with_program(&program);
        assert_eq!(chip8.pc(), 0x200);
        assert_eq!(chip8.memory()[0xFFF], 0xAB);
    }

    #[test]
    fn test_load_rom_rejects_oversized_program() {
        let mut chip8 = seeded();
        chip8.state.v[0x3] = 0x42;
        chip8.state.pc = 0x300;
        let program = vec![0xAB; MAX_PROGRAM_SIZE + 1];
        let result = chip8.load_rom(&mut &program[..]);
        assert!(matches!(
            result,
            Err(Chip8Error::RomTooLarge { size, max }) if size == 3585 && max == 3584
        ));
        assert_fresh(&chip8);
    }

    #[test]
    fn test_load_file_missing() {
        let mut chip8 = seeded();
        chip8.state.v[0x0] = 0x1;
        let result = chip8.load_file("/nonexistent/program.ch8");
        assert!(matches!(result, Err(Chip8Error::Io(_))));
        assert_fresh(&chip8);
    }

    #[test]
    fn test_load_file() {
        let path = std::env::temp_dir().join(format!("chip8-core-load-{}.ch8", std::process::id()));
        std::fs::write(&path, [0x60, 0x2A]).unwrap();
        let mut chip8 = seeded();
        let result = chip8.load_file(&path);
        std::fs::remove_file(&path).unwrap();
        result.unwrap();
        chip8.step().unwrap();
        assert_eq!(chip8.register(0x0), Some(0x2A));
    }

    #[test]
    fn test_reset_releases_keys() {
        let mut chip8 = seeded();
        chip8.key_down(0x4);
        chip8.reset();
        assert_eq!(chip8.keypad.first_pressed(), None);
    }

    #[test]
    fn test_step_advances_pc() {
        let mut chip8 = with_program(&[0x00, 0xE0]);
        chip8.step().unwrap();
        assert_eq!(chip8.pc(), 0x202);
    }

    #[test]
    fn test_unknown_opcode_is_reported_without_side_effects() {
        let mut chip8 = with_program(&[0xF0, 0x15, 0x80, 0x0F]);
        chip8.state.v[0x0] = 0x5;
        chip8.step().unwrap();
        assert_eq!(chip8.delay_timer(), 0x4);
        let result = chip8.step();
        assert!(matches!(
            result,
            Err(Chip8Error::UnknownOpcode { opcode: 0x800F, pc: 0x202 })
        ));
        assert_eq!(chip8.pc(), 0x202);
        assert_eq!(chip8.delay_timer(), 0x4);
    }

    #[test]
    fn test_machine_code_routines_are_unknown() {
        let mut chip8 = with_program(&[0x01, 0x23]);
        assert!(matches!(
            chip8.step(),
            Err(Chip8Error::UnknownOpcode { opcode: 0x0123, .. })
        ));
    }

    #[test]
    fn test_subroutine_round_trip() {
        // 0x200 call 0x206; 0x202 V1 = 2; 0x204 halt loop; 0x206 V0 = 1; 0x208 ret
        let mut chip8 = with_program(&[
            0x22, 0x06, 0x61, 0x02, 0x12, 0x04, 0x60, 0x01, 0x00, 0xEE,
        ]);
        for _ in 0..4 {
            chip8.step().unwrap();
        }
        assert_eq!(chip8.register(0x0), Some(0x1));
        assert_eq!(chip8.register(0x1), Some(0x2));
        assert_eq!(chip8.pc(), 0x204);
    }

    #[test]
    fn test_draw_twice_collides_and_clears() {
        // CLS; I = 0x20A; DRW V0 V0 1; DRW V0 V0 1; JP self; sprite
        let mut chip8 = with_program(&[
            0x00, 0xE0, 0xA2, 0x0A, 0xD0, 0x01, 0xD0, 0x01, 0x12, 0x08, 0b1011_0000,
        ]);
        chip8.step().unwrap();
        chip8.step().unwrap();
        chip8.step().unwrap();
        assert_eq!(chip8.register(0xF), Some(0x0));
        assert!(chip8.pixel(0, 0));
        assert!(!chip8.pixel(1, 0));
        assert!(chip8.pixel(2, 0));
        assert!(chip8.pixel(3, 0));
        chip8.step().unwrap();
        assert_eq!(chip8.register(0xF), Some(0x1));
        assert!((0..8).all(|x| !chip8.pixel(x, 0)));
    }

    #[test]
    fn test_wait_for_key_holds_pc_until_pressed() {
        let mut chip8 = with_program(&[0xF3, 0x0A]);
        for _ in 0..5 {
            chip8.step().unwrap();
            assert_eq!(chip8.pc(), 0x200);
        }
        chip8.key_down(0x9);
        chip8.step().unwrap();
        assert_eq!(chip8.register(0x3), Some(0x9));
        assert_eq!(chip8.pc(), 0x202);
    }

    #[test]
    fn test_timers_run_while_waiting_for_key() {
        // V0 = 3; DT = V0; ST = V0; wait for key
        let mut chip8 = with_program(&[0x60, 0x03, 0xF0, 0x15, 0xF0, 0x18, 0xF1, 0x0A]);
        chip8.step().unwrap();
        chip8.step().unwrap();
        assert_eq!(chip8.delay_timer(), 2);
        assert_eq!(chip8.step().unwrap(), Tone::Beep);
        assert_eq!(chip8.sound_timer(), 2);
        assert_eq!(chip8.step().unwrap(), Tone::Beep);
        assert_eq!(chip8.step().unwrap(), Tone::Beep);
        assert_eq!(chip8.delay_timer(), 0);
        assert_eq!(chip8.sound_timer(), 0);
        for _ in 0..10 {
            assert_eq!(chip8.step().unwrap(), Tone::Silent);
            assert_eq!(chip8.delay_timer(), 0);
            assert_eq!(chip8.sound_timer(), 0);
        }
        assert_eq!(chip8.pc(), 0x206);
    }

    #[test]
    fn test_skip_if_key_reflects_latest_level() {
        // V0 = 5; SKP V0; V1 = 1; V2 = 2
        let program = [0x60, 0x05, 0xE0, 0x9E, 0x61, 0x01, 0x62, 0x02];
        let mut chip8 = with_program(&program);
        chip8.key_down(0x5);
        chip8.key_up(0x5);
        chip8.step().unwrap();
        chip8.step().unwrap();
        assert_eq!(chip8.pc(), 0x204);

        let mut chip8 = with_program(&program);
        chip8.key_down(0x5);
        chip8.step().unwrap();
        chip8.step().unwrap();
        assert_eq!(chip8.pc(), 0x206);
    }

    #[test]
    fn test_bcd_of_234() {
        // V4 = 234; I = 0x300; BCD V4
        let mut chip8 = with_program(&[0x64, 0xEA, 0xA3, 0x00, 0xF4, 0x33]);
        for _ in 0..3 {
            chip8.step().unwrap();
        }
        assert_eq!(chip8.memory()[0x300..0x303], [2, 3, 4]);
    }

    #[test]
    fn test_consume_frame_clears_redraw_flag() {
        let mut chip8 = with_program(&[0x00, 0xE0, 0xD0, 0x01]);
        let mut frame = [0u32; DISPLAY_SIZE];
        assert!(chip8.redraw_pending());
        chip8.consume_frame(&mut frame);
        assert!(!chip8.redraw_pending());

        chip8.step().unwrap();
        assert!(chip8.redraw_pending());
        chip8.consume_frame(&mut frame);

        // I = 0 so this draws the top row of the 0 glyph
        chip8.step().unwrap();
        assert!(chip8.redraw_pending());
        chip8.consume_frame(&mut frame);
        assert!(!chip8.redraw_pending());
        assert_eq!(frame[..5], [PIXEL_ON, PIXEL_ON, PIXEL_ON, PIXEL_ON, PIXEL_OFF]);
    }

    #[test]
    fn test_sprite_mode_is_kept_across_reset() {
        let mut chip8 = Chip8::with_config(Config {
            sprite_mode: SpriteMode::Wrap,
            seed: None,
        });
        chip8.reset();
        assert_eq!(chip8.state.sprite_mode, SpriteMode::Wrap);
    }

    #[test]
    fn test_register_out_of_range() {
        let chip8 = seeded();
        assert_eq!(chip8.register(0xF), Some(0x0));
        assert_eq!(chip8.register(0x10), None);
    }

    #[test]
    fn test_load_rom_stops_reading_past_limit() {
        // An endless source is rejected once it passes the limit
        let mut chip8 = seeded();
        let mut endless = std::io::repeat(0xAB);
        let result = chip8.load_rom(&mut endless);
        assert!(matches!(
            result,
            Err(Chip8Error::RomTooLarge { size, .. }) if size == MAX_PROGRAM_SIZE + 1
        ));
        assert_fresh(&chip8);
    }

    #[test]
    fn test_zero_row_draw_after_index_overflow() {
        // I = 0xFFF; V0 = 0xFF; I += V0; DRW V0 V0 0
        let mut chip8 = with_program(&[0xAF, 0xFF, 0x60, 0xFF, 0xF0, 0x1E, 0xD0, 0x00]);
        for _ in 0..3 {
            chip8.step().unwrap();
        }
        assert_eq!(chip8.index(), 0x10FE);
        chip8.step().unwrap();
        assert_eq!(chip8.register(0xF), Some(0x0));
        assert!(chip8.redraw_pending());
        assert_eq!(chip8.pc(), 0x208);
    }

    #[test]
    fn test_step_past_end_of_memory() {
        let mut chip8 = with_program(&[0x1F, 0xFF]);
        chip8.step().unwrap();
        assert!(matches!(
            chip8.step(),
            Err(Chip8Error::MemoryOutOfBounds { .. })
        ));
    }
}
