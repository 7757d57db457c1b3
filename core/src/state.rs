use std::ops::Range;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::Config;
use crate::constants::{
    FLAG_REGISTER, MEMORY_SIZE, PROGRAM_START, REGISTER_COUNT, SPRITE_SHEET, STACK_SIZE,
};
use crate::error::{Chip8Error, Result};
use crate::opcode;
use crate::screen::{Screen, SpriteMode};

/// The Chip-8 machine state
///
/// ## CPU
/// Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - all are general purpose
///     - the 16th (VF) is also written as the carry/borrow/collision flag
/// - (i) a 16-bit memory address register, never masked to 12 bits
///
/// Counter
/// - (pc) a 16-bit program counter
///
/// Pointer
/// - (sp) the number of return addresses on the stack, 0..=16
///
/// Timers
/// - 2 8-bit timers (delay & sound), each decremented once per step while nonzero
///
/// ## Memory
/// - 16 entry stack of return addresses
/// - 4096 bytes of addressable memory
///     - 0x000..0x050 holds the font sprite sheet
///     - 0x200.. holds the loaded program
/// - 64x32 screen plus a flag noting it changed since the host last read it
#[derive(Clone)]
pub struct State {
    pub v: [u8; REGISTER_COUNT],
    pub i: u16,
    pub pc: u16,
    pub sp: usize,
    pub stack: [u16; STACK_SIZE],
    pub delay_timer: u8,
    pub sound_timer: u8,
    pub memory: [u8; MEMORY_SIZE],
    pub screen: Screen,
    pub draw_flag: bool,
    pub sprite_mode: SpriteMode,
    pub rng: StdRng,
}

impl State {
    pub fn new(config: &Config) -> Self {
        let mut memory = [0; MEMORY_SIZE];
        memory[..SPRITE_SHEET.len()].copy_from_slice(&SPRITE_SHEET);

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        State {
            v: [0; REGISTER_COUNT],
            i: 0,
            pc: PROGRAM_START,
            sp: 0,
            stack: [0; STACK_SIZE],
            delay_timer: 0,
            sound_timer: 0,
            memory,
            screen: Screen::new(),
            // A fresh machine always has a (blank) frame to show
            draw_flag: true,
            sprite_mode: config.sprite_mode,
            rng,
        }
    }

    /// Reads the instruction word at the program counter.
    pub fn fetch(&self) -> Result<u16> {
        let range = self.memory_range(self.pc, 2)?;
        Ok(opcode::from_bytes(
            self.memory[range.start],
            self.memory[range.start + 1],
        ))
    }

    /// Moves on to the next instruction.
    pub fn advance(&mut self) {
        self.pc = self.pc.wrapping_add(2);
    }

    /// Moves on to the next instruction, skipping it if `condition` holds.
    pub fn skip_if(&mut self, condition: bool) {
        if condition {
            self.advance();
        }
        self.advance();
    }

    /// Writes VF. Callers store their primary result first so the flag wins when Vx is VF.
    pub fn set_flag(&mut self, flag: bool) {
        self.v[FLAG_REGISTER] = u8::from(flag);
    }

    pub fn push(&mut self, address: u16) -> Result<()> {
        if self.sp == STACK_SIZE {
            return Err(Chip8Error::StackOverflow { pc: self.pc });
        }
        self.stack[self.sp] = address;
        self.sp += 1;
        Ok(())
    }

    pub fn pop(&mut self) -> Result<u16> {
        if self.sp == 0 {
            return Err(Chip8Error::StackUnderflow { pc: self.pc });
        }
        self.sp -= 1;
        Ok(self.stack[self.sp])
    }

    /// The memory indices `start..start + len`, if they all exist.
    /// An empty range touches no memory, so it is valid for any (unmasked) start.
    pub fn memory_range(&self, start: u16, len: usize) -> Result<Range<usize>> {
        if len == 0 {
            return Ok(0..0);
        }
        let start = usize::from(start);
        let end = start + len;
        if end > MEMORY_SIZE {
            return Err(Chip8Error::MemoryOutOfBounds {
                address: end - 1,
            });
        }
        Ok(start..end)
    }

    /// Counts both timers down towards 0.
    /// Returns true if the sound timer was running, i.e. a tone should play for this step.
    pub fn tick_timers(&mut self) -> bool {
        self.delay_timer = self.delay_timer.saturating_sub(1);
        let sounding = self.sound_timer > 0;
        self.sound_timer = self.sound_timer.saturating_sub(1);
        sounding
    }
}
