use log::debug;
use sdl2::pixels::PixelFormatEnum;

use chip8_core::constants::{DISPLAY_HEIGHT, DISPLAY_SIZE, DISPLAY_WIDTH};

/// Bytes per packed ARGB8888 pixel
const BYTES_PER_PIXEL: usize = 4;

/// # Display
/// The Chip-8 display is composed of 64x32 black/white pixels.
/// Frames arrive already expanded to packed ARGB colors, one u32 per pixel in row-major order.
/// The display only gets a call to `render` when the Chip-8 reports a pending redraw.
pub struct Display {
    canvas: sdl2::render::WindowCanvas,
}

impl Display {
    /// Creates a new display window bound to an sdl2 context.
    ///
    /// # Arguments
    /// * `sdl` an sdl2 context with which to draw
    /// * `scale` the size multiplier for each pixel
    pub fn new(sdl: &sdl2::Sdl, scale: u32) -> Result<Self, String> {
        let video_subsystem = sdl.video()?;
        let window = video_subsystem
            .window(
                "chip8",
                DISPLAY_WIDTH as u32 * scale,
                DISPLAY_HEIGHT as u32 * scale,
            )
            .position_centered()
            .build()
            .map_err(|e| e.to_string())?;
        let mut canvas = window
            .into_canvas()
            .accelerated()
            .present_vsync()
            .build()
            .map_err(|e| e.to_string())?;
        canvas
            .set_logical_size(DISPLAY_WIDTH as u32 * scale, DISPLAY_HEIGHT as u32 * scale)
            .map_err(|e| e.to_string())?;
        debug!("opened {}x scaled display", scale);

        Ok(Display { canvas })
    }

    /// Lays packed ARGB pixels out as the bytes of an SDL2 ARGB8888 texture.
    ///
    /// ARGB8888 is a packed format, so each pixel is a native-endian u32.
    fn frame_to_sdl_texture(frame: &[u32]) -> Vec<u8> {
        frame.iter().flat_map(|pixel| pixel.to_ne_bytes()).collect()
    }

    /// Uploads a consumed frame as an SDL2 ARGB8888 texture and presents it.
    ///
    /// # Arguments
    /// * `frame` every pixel of the Chip-8 screen as a packed ARGB color
    pub fn render(&mut self, frame: &[u32; DISPLAY_SIZE]) -> Result<(), String> {
        let texture_creator = self.canvas.texture_creator();

        let mut texture = texture_creator
            .create_texture_streaming(
                PixelFormatEnum::ARGB8888,
                DISPLAY_WIDTH as u32,
                DISPLAY_HEIGHT as u32,
            )
            .map_err(|e| e.to_string())?;

        texture
            .update(
                None,
                &Display::frame_to_sdl_texture(frame),
                DISPLAY_WIDTH * BYTES_PER_PIXEL,
            )
            .map_err(|e| e.to_string())?;

        self.canvas.clear();
        self.canvas.copy(&texture, None, None)?;
        self.canvas.present();
        Ok(())
    }
}
