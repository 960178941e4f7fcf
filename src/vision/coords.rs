//! Logical-to-screen coordinate mapping
//!
//! All layout constants are written against the low-resolution emulator
//! profile, relative to an anchor (normally the emulator window's top-left).
//! A [`ScaleContext`] turns them into absolute screen coordinates.

use crate::android::WindowLocator;
use crate::MinerError;

/// Low-resolution emulator window size (width, height)
pub const LOW_RESOLUTION: (i32, i32) = (423, 726);
/// High-resolution emulator window size (width, height)
pub const HIGH_RESOLUTION: (i32, i32) = (659, 1131);

/// Height of the emulator's title bar and width of its side toolbar, in
/// logical pixels
const WINDOW_CHROME: i32 = 32;

/// Supported emulator resolution profiles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Low,
    High,
}

impl Resolution {
    /// Match a window size against the supported profiles
    pub fn from_size(width: i32, height: i32) -> Option<Self> {
        match (width, height) {
            LOW_RESOLUTION => Some(Resolution::Low),
            HIGH_RESOLUTION => Some(Resolution::High),
            _ => None,
        }
    }

    /// Window size of this profile
    pub fn size(self) -> (i32, i32) {
        match self {
            Resolution::Low => LOW_RESOLUTION,
            Resolution::High => HIGH_RESOLUTION,
        }
    }

    /// Factor applied to every logical coordinate
    pub fn scale(self) -> f64 {
        match self {
            Resolution::Low => 1.0,
            Resolution::High => 1.557851,
        }
    }

    /// Emulator chrome in screen pixels at this profile's scale
    pub fn chrome(self) -> i32 {
        (f64::from(WINDOW_CHROME) * self.scale()).round() as i32
    }

    /// Size of the Android display inside a window of this profile
    pub fn display_size(self) -> (i32, i32) {
        let (w, h) = self.size();
        (w - self.chrome(), h - self.chrome())
    }

    /// Match an Android display size against the supported profiles
    pub fn from_display_size(width: i32, height: i32) -> Option<Self> {
        [Resolution::Low, Resolution::High]
            .into_iter()
            .find(|r| r.display_size() == (width, height))
    }

    /// Name of the reference-image directory for this profile
    pub fn asset_dir_name(self) -> String {
        let (w, h) = self.size();
        format!("{w}x{h}")
    }
}

/// An absolute screen coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScreenPoint {
    pub x: i32,
    pub y: i32,
}

impl ScreenPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// This point moved by (dx, dy)
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// An absolute screen rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScreenRect {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

impl ScreenRect {
    pub const fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub const fn right(&self) -> i32 {
        self.left + self.width
    }

    pub const fn bottom(&self) -> i32 {
        self.top + self.height
    }

    pub const fn top_left(&self) -> ScreenPoint {
        ScreenPoint::new(self.left, self.top)
    }

    pub const fn center(&self) -> ScreenPoint {
        ScreenPoint::new(self.left + self.width / 2, self.top + self.height / 2)
    }

    pub const fn contains(&self, p: ScreenPoint) -> bool {
        p.x >= self.left && p.x < self.right() && p.y >= self.top && p.y < self.bottom()
    }
}

/// What a logical coordinate is measured from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// Top-left of the emulator window
    Window,
    /// An absolute screen point, typically the corner of a matched control
    At(ScreenPoint),
}

/// A logical point relative to an anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Loc {
    pub x: i32,
    pub y: i32,
    pub anchor: Anchor,
}

impl Loc {
    pub const fn new(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            anchor: Anchor::Window,
        }
    }

    pub const fn anchored(x: i32, y: i32, anchor: ScreenPoint) -> Self {
        Self {
            x,
            y,
            anchor: Anchor::At(anchor),
        }
    }
}

/// A logical rectangle relative to an anchor, given by its edges
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub anchor: Anchor,
}

impl Region {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
            anchor: Anchor::Window,
        }
    }

    /// The same edges measured from `anchor` instead of the window
    pub const fn anchored_at(self, anchor: ScreenPoint) -> Self {
        Self {
            anchor: Anchor::At(anchor),
            ..self
        }
    }
}

/// Window placement and resolution scale, fixed for the whole run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleContext {
    window: ScreenRect,
    resolution: Resolution,
}

impl ScaleContext {
    /// Build a context for a window already known to use `resolution`
    pub fn new(window: ScreenRect, resolution: Resolution) -> Self {
        Self { window, resolution }
    }

    /// Locate the emulator window and settle on a supported resolution
    ///
    /// A supported window is used where it is. An unsupported size is
    /// logged and the window is forced to the high-resolution profile at
    /// the screen origin, then located again.
    pub fn discover<W: WindowLocator>(locator: &mut W) -> Result<Self, MinerError> {
        let Some(found) = locator.locate()? else {
            log::error!("Failed to find the emulator window");
            return Err(MinerError::WindowNotFound);
        };
        log::info!(
            "Emulator window at ({}, {}), size ({}, {})",
            found.left,
            found.top,
            found.width,
            found.height
        );

        let (window, resolution) = match Resolution::from_size(found.width, found.height) {
            Some(resolution) => (found, resolution),
            None => {
                log::error!("Resolution not supported: ({}, {})", found.width, found.height);
                let resolution = Resolution::High;
                let (width, height) = resolution.size();
                let forced = ScreenRect::new(0, 0, width, height);
                locator.reshape(forced)?;
                let window = locator
                    .locate()?
                    .filter(|w| (w.width, w.height) == (width, height))
                    .unwrap_or(forced);
                (window, resolution)
            }
        };

        match resolution {
            Resolution::High => log::info!("Using high-resolution profile"),
            Resolution::Low => log::info!("Using low-resolution profile"),
        }
        Ok(Self::new(window, resolution))
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    pub fn scale(&self) -> f64 {
        self.resolution.scale()
    }

    pub fn window(&self) -> ScreenRect {
        self.window
    }

    /// Scale a logical length to screen pixels
    pub fn scaled(&self, value: i32) -> i32 {
        (f64::from(value) * self.scale()).round() as i32
    }

    fn anchor_point(&self, anchor: Anchor) -> ScreenPoint {
        match anchor {
            Anchor::Window => self.window.top_left(),
            Anchor::At(point) => point,
        }
    }

    /// Absolute position of a logical point
    pub fn to_absolute(&self, loc: Loc) -> ScreenPoint {
        let anchor = self.anchor_point(loc.anchor);
        ScreenPoint::new(anchor.x + self.scaled(loc.x), anchor.y + self.scaled(loc.y))
    }

    /// Absolute rectangle of a logical region
    ///
    /// Each edge is scaled on its own, so width and height are the
    /// difference of the scaled edges.
    pub fn to_absolute_region(&self, region: Region) -> ScreenRect {
        let anchor = self.anchor_point(region.anchor);
        let left = self.scaled(region.left);
        let top = self.scaled(region.top);
        ScreenRect::new(
            anchor.x + left,
            anchor.y + top,
            self.scaled(region.right) - left,
            self.scaled(region.bottom) - top,
        )
    }

    /// The part of the window showing the game, without emulator chrome
    pub fn game_rect(&self) -> ScreenRect {
        let chrome = self.resolution.chrome();
        ScreenRect::new(
            self.window.left,
            self.window.top + chrome,
            self.window.width - chrome,
            self.window.height - chrome,
        )
    }
}
