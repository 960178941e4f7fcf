//! Android device module
//!
//! Everything that talks to the emulator: screen grabs, display geometry,
//! and synthetic input, all over ADB.

pub mod bridge;
pub mod input;

pub use bridge::*;
pub use input::*;

use crate::vision::ScreenRect;

/// Finds the emulator's display and forces it to a given geometry
pub trait WindowLocator {
    /// Current window rectangle, or `None` if no emulator is found
    fn locate(&mut self) -> Result<Option<ScreenRect>, DeviceError>;

    /// Move and resize the window to `rect`
    fn reshape(&mut self, rect: ScreenRect) -> Result<(), DeviceError>;
}
