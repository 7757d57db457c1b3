use anyhow::{Context, Error};
use log::{info, warn};
use sdl2::event::Event;

use chip8_core::constants::DISPLAY_SIZE;
use chip8_core::{Chip8, Tone};
use chip8_display::Display;

use crate::bell;
use crate::keymap::{control, Control};
use crate::pacing::Pacing;

/// Drives a loaded machine until the window is closed or a step fails.
///
/// Each iteration steps once, then applies pending input, then renders if the screen changed.
pub fn run(chip8: &mut Chip8, scale: u32, mut pacing: Pacing) -> anyhow::Result<()> {
    let sdl = sdl2::init()
        .map_err(Error::msg)
        .context("unable to initialise SDL")?;
    let mut display = Display::new(&sdl, scale)
        .map_err(Error::msg)
        .context("unable to open display")?;
    let mut events = sdl.event_pump().map_err(Error::msg)?;
    let mut frame = [0u32; DISPLAY_SIZE];

    'event: loop {
        let tone = chip8
            .step()
            .with_context(|| format!("machine halted at {:#05X}", chip8.pc()))?;
        if tone == Tone::Beep {
            if let Err(e) = bell::beep() {
                warn!("unable to ring the bell: {}", e);
            }
        }

        // Handle input
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. } => break 'event,
                Event::KeyDown {
                    keycode: Some(key), ..
                } => match control(key) {
                    Some(Control::Key(hex)) => chip8.key_down(hex),
                    Some(Control::Faster) => {
                        pacing.faster();
                        info!("sleeping {:?} between steps", pacing.interval());
                    }
                    Some(Control::Slower) => {
                        pacing.slower();
                        info!("sleeping {:?} between steps", pacing.interval());
                    }
                    None => continue,
                },
                Event::KeyUp {
                    keycode: Some(key), ..
                } => {
                    if let Some(Control::Key(hex)) = control(key) {
                        chip8.key_up(hex);
                    }
                }
                _ => continue,
            };
        }

        // If the screen changed, consume and present it
        if chip8.redraw_pending() {
            chip8.consume_frame(&mut frame);
            display.render(&frame).map_err(Error::msg)?;
        }

        std::thread::sleep(pacing.interval());
    }

    Ok(())
}
