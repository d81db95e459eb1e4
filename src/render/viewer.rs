use image::RgbaImage;

use super::RenderError;

pub const WINDOW_TITLE: &str = "Möbius strip";

/// Presents a rendered frame to the user. `show` returns once the user is
/// done looking at it.
pub trait FrameViewer {
    fn show(&mut self, frame: &RgbaImage) -> Result<(), RenderError>;
}

/// Viewer for batch runs and builds without a window backend: logs and returns.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadlessViewer;

impl FrameViewer for HeadlessViewer {
    fn show(&mut self, frame: &RgbaImage) -> Result<(), RenderError> {
        log::info!(
            "rendered {}x{} frame (no interactive display)",
            frame.width(),
            frame.height()
        );
        Ok(())
    }
}

cfg_if::cfg_if! {
    if #[cfg(feature = "window")] {
        mod window;
        pub use window::WindowViewer;

        /// The interactive window viewer.
        #[must_use]
        pub fn default_viewer() -> Box<dyn FrameViewer> {
            Box::new(WindowViewer::new(WINDOW_TITLE))
        }

        /// Whether this build can open an interactive window.
        #[must_use]
        pub const fn has_window_support() -> bool {
            true
        }
    } else {
        /// Falls back to [`HeadlessViewer`]; this build has no window backend.
        #[must_use]
        pub fn default_viewer() -> Box<dyn FrameViewer> {
            Box::new(HeadlessViewer)
        }

        /// Whether this build can open an interactive window.
        #[must_use]
        pub const fn has_window_support() -> bool {
            false
        }
    }
}
