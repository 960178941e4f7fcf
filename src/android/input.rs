//! Touch and key input
//!
//! Synthetic pointer input delivered to the emulator with `adb shell input`.

use std::time::Duration;

use super::bridge::{Adb, DeviceError};
use crate::vision::ScreenPoint;

/// Keys the automation presses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Android back, which also dismisses most dialogs
    Back,
}

impl Key {
    /// Android keycode name
    pub fn keycode(self) -> &'static str {
        match self {
            Key::Back => "KEYCODE_BACK",
        }
    }
}

/// Pointer and key input in absolute screen coordinates
pub trait Input {
    /// Move the pointer without clicking
    fn move_to(&mut self, point: ScreenPoint) -> Result<(), DeviceError>;

    /// Click (tap) at a point
    fn click(&mut self, point: ScreenPoint) -> Result<(), DeviceError>;

    /// Press at `from`, drag by (dx, dy) over `duration`, release
    fn drag(&mut self, from: ScreenPoint, dx: i32, dy: i32, duration: Duration) -> Result<(), DeviceError>;

    /// Press and release a key
    fn press(&mut self, key: Key) -> Result<(), DeviceError>;
}

impl Input for Adb {
    fn move_to(&mut self, point: ScreenPoint) -> Result<(), DeviceError> {
        // Touch screens have no hover
        log::trace!("Pointer at ({}, {})", point.x, point.y);
        Ok(())
    }

    fn click(&mut self, point: ScreenPoint) -> Result<(), DeviceError> {
        let (x, y) = (point.x.to_string(), point.y.to_string());
        self.shell(&["input", "tap", &x, &y])?;
        Ok(())
    }

    fn drag(&mut self, from: ScreenPoint, dx: i32, dy: i32, duration: Duration) -> Result<(), DeviceError> {
        let to = from.offset(dx, dy);
        let args = [
            from.x.to_string(),
            from.y.to_string(),
            to.x.to_string(),
            to.y.to_string(),
            duration.as_millis().to_string(),
        ];
        let mut full = vec!["input", "swipe"];
        full.extend(args.iter().map(String::as_str));
        self.shell(&full)?;
        Ok(())
    }

    fn press(&mut self, key: Key) -> Result<(), DeviceError> {
        self.shell(&["input", "keyevent", key.keycode()])?;
        Ok(())
    }
}
