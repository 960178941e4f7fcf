//! Screen capture handling
//!
//! Grabs frames from a [`Screen`] and extracts regions and pixels in
//! absolute screen coordinates.

use image::{Rgb, RgbaImage};

use super::coords::{ScreenPoint, ScreenRect};
use crate::android::DeviceError;

/// Source of full-screen frames
pub trait Screen {
    /// Capture the whole screen; pixel (0, 0) is the screen origin
    fn grab(&mut self) -> Result<RgbaImage, DeviceError>;
}

/// Screen capture handler
pub struct ScreenCapture<S> {
    source: S,
    /// Most recently grabbed frame
    current_frame: Option<RgbaImage>,
    /// Frame counter
    frame_count: u64,
}

impl<S: Screen> ScreenCapture<S> {
    /// Create a new screen capture handler
    pub fn new(source: S) -> Self {
        Self {
            source,
            current_frame: None,
            frame_count: 0,
        }
    }

    /// Grab a fresh frame and return it
    pub fn refresh(&mut self) -> Result<&RgbaImage, DeviceError> {
        let frame = self.source.grab()?;
        self.frame_count += 1;
        let frame: &RgbaImage = self.current_frame.insert(frame);
        Ok(frame)
    }

    /// Get the most recent frame
    pub fn current_frame(&self) -> Option<&RgbaImage> {
        self.current_frame.as_ref()
    }

    /// Get the frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

/// Copy the part of `rect` that lies inside the frame
///
/// Returns `None` when the rectangle misses the frame entirely.
pub fn extract_region(frame: &RgbaImage, rect: ScreenRect) -> Option<RgbaImage> {
    let (width, height) = frame.dimensions();
    let left = rect.left.max(0);
    let top = rect.top.max(0);
    let right = rect.right().min(width as i32);
    let bottom = rect.bottom().min(height as i32);
    if right <= left || bottom <= top {
        return None;
    }

    let sub_image = image::imageops::crop_imm(
        frame,
        left as u32,
        top as u32,
        (right - left) as u32,
        (bottom - top) as u32,
    );
    Some(sub_image.to_image())
}

/// Colour of one pixel, ignoring alpha
pub fn pixel_at(frame: &RgbaImage, point: ScreenPoint) -> Option<Rgb<u8>> {
    let (width, height) = frame.dimensions();
    if point.x < 0 || point.y < 0 || point.x >= width as i32 || point.y >= height as i32 {
        return None;
    }
    let p = frame.get_pixel(point.x as u32, point.y as u32);
    Some(Rgb([p[0], p[1], p[2]]))
}
