use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use log::{error, info};

use chip8_core::{Chip8, Config, SpriteMode};

mod bell;
mod keymap;
mod pacing;
mod run;

const EXIT_CODE_ERR: i32 = 1;
const EXIT_CODE_BAD_LOAD: i32 = 2;

/// Placement of sprite pixels that run past the screen edges
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum SpriteModeArg {
    /// Spill past the right edge into the next row, drop past the last row
    Linear,
    /// Drop anything off screen
    Clip,
    /// Wrap around both edges
    Wrap,
}

impl From<SpriteModeArg> for SpriteMode {
    fn from(arg: SpriteModeArg) -> Self {
        match arg {
            SpriteModeArg::Linear => SpriteMode::Linear,
            SpriteModeArg::Clip => SpriteMode::Clip,
            SpriteModeArg::Wrap => SpriteMode::Wrap,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "chip8", about = "Run a Chip-8 program.")]
struct Args {
    /// Raw program image, loaded at 0x200
    #[arg(value_name = "ROM")]
    rom: PathBuf,

    /// Window size multiplier for each pixel
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..=64))]
    scale: u32,

    /// Microseconds slept between steps (the 5 and T keys adjust it while running)
    #[arg(long, default_value_t = 100)]
    sleep_micros: u64,

    #[arg(long, value_enum, default_value_t = SpriteModeArg::Linear)]
    sprite_mode: SpriteModeArg,

    /// Fixed seed for the random number instruction
    #[arg(long)]
    seed: Option<u64>,
}

impl Args {
    fn config(&self) -> Config {
        Config {
            sprite_mode: self.sprite_mode.into(),
            seed: self.seed,
        }
    }
}

fn main() {
    env_logger::init();

    let args = Args::try_parse().unwrap_or_else(|e| {
        let code = if e.use_stderr() { EXIT_CODE_ERR } else { 0 };
        let _ = e.print();
        process::exit(code);
    });

    let mut chip8 = Chip8::with_config(args.config());
    if let Err(e) = chip8.load_file(&args.rom) {
        error!("unable to load {}: {}", args.rom.display(), e);
        process::exit(EXIT_CODE_BAD_LOAD);
    }
    info!("loaded {}", args.rom.display());
    println!("{}", keymap::legend());

    if let Err(e) = run::run(&mut chip8, args.scale, pacing::Pacing::new(args.sleep_micros)) {
        error!("{:#}", e);
        process::exit(EXIT_CODE_ERR);
    }
}
