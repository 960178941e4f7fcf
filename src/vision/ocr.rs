//! Text recognition
//!
//! The recognizer itself is external; this module owns the text
//! normalization every caller compares against.

use std::io::Cursor;
use std::path::PathBuf;
use std::time::Duration;

use image::{ImageFormat, RgbaImage};

use crate::android::{run_command, DeviceError};
use crate::config::settings::DeviceSettings;

/// Regions shorter than this (in screen pixels) are never read
pub const MIN_TEXT_HEIGHT: i32 = 20;

/// Extracts raw text from an already cropped image
pub trait TextReader {
    fn read(&mut self, image: &RgbaImage) -> Result<String, DeviceError>;
}

/// Normalize recognized text for fuzzy comparisons
///
/// Drops whitespace and periods and lower-cases the rest. Normalizing twice
/// gives the same result.
pub fn normalize_text(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace() && *c != '.')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Text reader backed by the `tesseract` command-line tool
pub struct TesseractReader {
    program: PathBuf,
    timeout: Duration,
}

impl TesseractReader {
    pub fn new(settings: &DeviceSettings) -> Self {
        Self {
            program: settings.tesseract_path.clone(),
            timeout: Duration::from_millis(settings.command_timeout_ms),
        }
    }
}

impl TextReader for TesseractReader {
    fn read(&mut self, image: &RgbaImage) -> Result<String, DeviceError> {
        let mut png = Vec::new();
        image.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;

        // Page segmentation mode 7: treat the image as a single text line
        let args = ["stdin", "stdout", "--psm", "7"].map(String::from);
        let stdout = run_command(&self.program, &args, Some(&png), self.timeout)?;
        Ok(String::from_utf8_lossy(&stdout).into_owned())
    }
}
