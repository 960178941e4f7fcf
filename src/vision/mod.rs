//! Vision and image processing module
//!
//! Turns raw screen pixels into the perception primitives the tasks are
//! built on: reference-image matching, text reading, and pixel sampling.

pub mod capture;
pub mod color;
pub mod coords;
pub mod ocr;
pub mod template;

use image::Rgb;

use crate::android::DeviceError;

pub use capture::{Screen, ScreenCapture};
pub use color::{palette, ColorSpec};
pub use coords::{Anchor, Loc, Region, Resolution, ScaleContext, ScreenPoint, ScreenRect};
pub use ocr::{normalize_text, TesseractReader, TextReader, MIN_TEXT_HEIGHT};
pub use template::{Match, TemplateStore};

/// Perception primitives over the live screen
///
/// Misses are routine and come back as `None` or an empty list; only
/// failures to reach the device are errors.
pub trait Vision {
    /// Best match of a reference image inside `region`
    fn find(&mut self, image: &str, region: ScreenRect, confidence: f32) -> Result<Option<Match>, VisionError>;

    /// Every match of a reference image inside `region`
    fn find_all(&mut self, image: &str, region: ScreenRect, confidence: f32) -> Result<Vec<Match>, VisionError>;

    /// Normalized text inside `region`
    fn read_text(&mut self, region: ScreenRect) -> Result<String, VisionError>;

    /// Colours at several points, all taken from one frame
    fn pixels(&mut self, points: &[ScreenPoint]) -> Result<Vec<Option<Rgb<u8>>>, VisionError>;

    /// Colour at one point
    fn pixel(&mut self, point: ScreenPoint) -> Result<Option<Rgb<u8>>, VisionError> {
        Ok(self.pixels(&[point])?.into_iter().next().flatten())
    }
}

/// Main vision system that coordinates capture, matching, and OCR
pub struct Perception<S, T> {
    capture: ScreenCapture<S>,
    templates: TemplateStore,
    ocr: T,
}

impl<S: Screen, T: TextReader> Perception<S, T> {
    pub fn new(screen: S, ocr: T, templates: TemplateStore) -> Self {
        Self {
            capture: ScreenCapture::new(screen),
            templates,
            ocr,
        }
    }

    /// Grayscale crop of `region` from a fresh frame, with its absolute origin
    fn grab_gray(&mut self, region: ScreenRect) -> Result<Option<(image::GrayImage, i32, i32)>, VisionError> {
        let frame = self.capture.refresh()?;
        let Some(crop) = capture::extract_region(frame, region) else {
            return Ok(None);
        };
        let gray = image::imageops::grayscale(&crop);
        Ok(Some((gray, region.left.max(0), region.top.max(0))))
    }
}

impl<S: Screen, T: TextReader> Vision for Perception<S, T> {
    fn find(&mut self, image: &str, region: ScreenRect, confidence: f32) -> Result<Option<Match>, VisionError> {
        let Some(reference) = self.templates.get(image).cloned() else {
            return Ok(None);
        };
        let Some((haystack, ox, oy)) = self.grab_gray(region)? else {
            return Ok(None);
        };
        let (tw, th) = reference.dimensions();
        Ok(template::best_match(&haystack, &reference, confidence).map(|(x, y, score)| Match {
            rect: ScreenRect::new(ox + x as i32, oy + y as i32, tw as i32, th as i32),
            score,
        }))
    }

    fn find_all(&mut self, image: &str, region: ScreenRect, confidence: f32) -> Result<Vec<Match>, VisionError> {
        let Some(reference) = self.templates.get(image).cloned() else {
            return Ok(Vec::new());
        };
        let Some((haystack, ox, oy)) = self.grab_gray(region)? else {
            return Ok(Vec::new());
        };
        let (tw, th) = reference.dimensions();
        Ok(template::all_matches(&haystack, &reference, confidence)
            .into_iter()
            .map(|(x, y, score)| Match {
                rect: ScreenRect::new(ox + x as i32, oy + y as i32, tw as i32, th as i32),
                score,
            })
            .collect())
    }

    fn read_text(&mut self, region: ScreenRect) -> Result<String, VisionError> {
        if region.height < MIN_TEXT_HEIGHT {
            return Err(VisionError::RegionTooShort(region.height));
        }
        let frame = self.capture.refresh()?;
        let Some(crop) = capture::extract_region(frame, region) else {
            return Ok(String::new());
        };
        let raw = self.ocr.read(&crop)?;
        Ok(normalize_text(&raw))
    }

    fn pixels(&mut self, points: &[ScreenPoint]) -> Result<Vec<Option<Rgb<u8>>>, VisionError> {
        let frame = self.capture.refresh()?;
        Ok(points.iter().map(|&p| capture::pixel_at(frame, p)).collect())
    }
}

/// Vision system errors
#[derive(Debug, thiserror::Error)]
pub enum VisionError {
    #[error("Text region is {0}px tall, below the {min}px minimum", min = MIN_TEXT_HEIGHT)]
    RegionTooShort(i32),
    #[error(transparent)]
    Device(#[from] DeviceError),
}
