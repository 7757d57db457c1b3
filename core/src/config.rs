use crate::screen::SpriteMode;

/// Knobs that change machine behavior without changing the instruction set.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Config {
    /// Placement of sprite pixels past the screen edges
    pub sprite_mode: SpriteMode,
    /// Fixed seed for CXNN; `None` draws a fresh seed from the OS on every reset
    pub seed: Option<u64>,
}
