use image::RgbaImage;
use minifb::{Key, ScaleMode, Window, WindowOptions};

use super::FrameViewer;
use crate::render::RenderError;

/// Blocking `minifb` window; closes on the window button or Escape.
#[derive(Debug, Clone)]
pub struct WindowViewer {
    title: String,
}

impl WindowViewer {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

/// Packs straight-alpha RGBA into minifb's `0RGB` words, composited over white.
fn to_framebuffer(frame: &RgbaImage) -> Vec<u32> {
    frame
        .pixels()
        .map(|p| {
            let a = u32::from(p[3]);
            let over_white = |c: u8| (u32::from(c) * a + 255 * (255 - a)) / 255;
            (over_white(p[0]) << 16) | (over_white(p[1]) << 8) | over_white(p[2])
        })
        .collect()
}

impl FrameViewer for WindowViewer {
    fn show(&mut self, frame: &RgbaImage) -> Result<(), RenderError> {
        let (width, height) = (frame.width() as usize, frame.height() as usize);
        let buffer = to_framebuffer(frame);

        let mut window = Window::new(
            &self.title,
            width,
            height,
            WindowOptions {
                resize: true,
                scale_mode: ScaleMode::AspectRatioStretch,
                ..WindowOptions::default()
            },
        )
        .map_err(|err| {
            RenderError::Display(format!(
                "could not open a window ({err}); is a display server available? \
                 use --no-show for batch rendering"
            ))
        })?;
        window.set_target_fps(30);

        log::debug!("showing {width}x{height} frame, close the window to continue");
        while window.is_open() && !window.is_key_down(Key::Escape) {
            window
                .update_with_buffer(&buffer, width, height)
                .map_err(|err| RenderError::Display(err.to_string()))?;
        }
        Ok(())
    }
}
