pub use chip8::{Chip8, Tone};
pub use config::Config;
pub use error::{Chip8Error, Result};
pub use screen::SpriteMode;

mod chip8;
mod config;
pub mod constants;
mod error;
mod instruction;
mod keypad;
mod opcode;
mod operations;
mod screen;
mod state;
