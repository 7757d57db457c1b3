use thiserror::Error;

pub type Result<T> = std::result::Result<T, Chip8Error>;

/// Everything that can stop the machine from loading or stepping.
///
/// None of these are retried internally; the host decides whether to halt.
#[derive(Debug, Error)]
pub enum Chip8Error {
    #[error("unable to read program: {0}")]
    Io(#[from] std::io::Error),

    #[error("program is {size} bytes but at most {max} bytes fit in memory")]
    RomTooLarge { size: usize, max: usize },

    #[error("unknown opcode {opcode:#06X} at {pc:#05X}")]
    UnknownOpcode { opcode: u16, pc: u16 },

    #[error("call at {pc:#05X} exceeds the 16 entry stack")]
    StackOverflow { pc: u16 },

    #[error("return at {pc:#05X} with an empty stack")]
    StackUnderflow { pc: u16 },

    #[error("memory access out of bounds at {address:#06X}")]
    MemoryOutOfBounds { address: usize },
}
