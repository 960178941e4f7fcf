//! Fakes for the device collaborators, shared by unit tests

use std::cell::Cell;
use std::collections::HashMap;
use std::time::Duration;

use image::{Rgb, RgbaImage};

use crate::android::{DeviceError, Input, Key, WindowLocator};
use crate::clock::Clock;
use crate::config::Settings;
use crate::vision::{
    normalize_text, Match, Resolution, ScaleContext, Screen, ScreenPoint, ScreenRect, TextReader, Vision,
    VisionError, MIN_TEXT_HEIGHT,
};
use crate::Miner;

/// Clock whose `sleep` advances simulated time instantly
#[derive(Debug, Default)]
pub struct FakeClock {
    now: Cell<Duration>,
}

impl FakeClock {
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for FakeClock {
    fn now(&self) -> Duration {
        self.now.get()
    }

    fn sleep(&self, duration: Duration) {
        self.advance(duration);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Move(ScreenPoint),
    Click(ScreenPoint),
    Drag(ScreenPoint, i32, i32),
    Press(Key),
}

/// Input that only records what it was asked to do
#[derive(Debug, Default)]
pub struct RecordingInput {
    pub events: Vec<InputEvent>,
}

impl RecordingInput {
    pub fn clicks(&self) -> Vec<ScreenPoint> {
        self.events
            .iter()
            .filter_map(|e| match e {
                InputEvent::Click(p) => Some(*p),
                _ => None,
            })
            .collect()
    }

    pub fn presses(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, InputEvent::Press(_)))
            .count()
    }
}

impl Input for RecordingInput {
    fn move_to(&mut self, point: ScreenPoint) -> Result<(), DeviceError> {
        self.events.push(InputEvent::Move(point));
        Ok(())
    }

    fn click(&mut self, point: ScreenPoint) -> Result<(), DeviceError> {
        self.events.push(InputEvent::Click(point));
        Ok(())
    }

    fn drag(&mut self, from: ScreenPoint, dx: i32, dy: i32, _duration: Duration) -> Result<(), DeviceError> {
        self.events.push(InputEvent::Drag(from, dx, dy));
        Ok(())
    }

    fn press(&mut self, key: Key) -> Result<(), DeviceError> {
        self.events.push(InputEvent::Press(key));
        Ok(())
    }
}

/// Screen that always shows the same frame
pub struct StaticScreen {
    frame: RgbaImage,
}

impl StaticScreen {
    pub fn new(frame: RgbaImage) -> Self {
        Self { frame }
    }
}

impl Screen for StaticScreen {
    fn grab(&mut self) -> Result<RgbaImage, DeviceError> {
        Ok(self.frame.clone())
    }
}

/// Text reader that returns the same string for every image
pub struct CannedText {
    text: String,
}

impl CannedText {
    pub fn new(text: &str) -> Self {
        Self { text: text.to_string() }
    }
}

impl TextReader for CannedText {
    fn read(&mut self, _image: &RgbaImage) -> Result<String, DeviceError> {
        Ok(self.text.clone())
    }
}

pub struct FakeWindow {
    window: Option<ScreenRect>,
    pub reshaped: Vec<ScreenRect>,
}

impl FakeWindow {
    pub fn new(window: Option<ScreenRect>) -> Self {
        Self {
            window,
            reshaped: Vec::new(),
        }
    }
}

impl WindowLocator for FakeWindow {
    fn locate(&mut self) -> Result<Option<ScreenRect>, DeviceError> {
        Ok(self.window)
    }

    fn reshape(&mut self, rect: ScreenRect) -> Result<(), DeviceError> {
        self.reshaped.push(rect);
        self.window = Some(rect);
        Ok(())
    }
}

struct Sighting {
    rect: ScreenRect,
    /// How many more lookups will see it; `None` means forever
    remaining: Option<u32>,
}

/// Vision that answers from a script instead of a screen
///
/// Images are found when their box's centre lies inside the searched
/// region. Text is looked up by exact absolute region and normalized like
/// real OCR output.
#[derive(Default)]
pub struct ScriptedVision {
    images: HashMap<String, Vec<Sighting>>,
    texts: HashMap<ScreenRect, String>,
    default_text: String,
    colors: HashMap<ScreenPoint, Rgb<u8>>,
    pub lookups: Vec<String>,
}

impl ScriptedVision {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `image` visible at `rect` for every lookup
    pub fn show(&mut self, image: &str, rect: ScreenRect) -> &mut Self {
        self.images.entry(image.to_string()).or_default().push(Sighting { rect, remaining: None });
        self
    }

    /// Make `image` visible at `rect` for the next `times` lookups only
    pub fn show_times(&mut self, image: &str, rect: ScreenRect, times: u32) -> &mut Self {
        self.images.entry(image.to_string()).or_default().push(Sighting {
            rect,
            remaining: Some(times),
        });
        self
    }

    pub fn text(&mut self, region: ScreenRect, text: &str) -> &mut Self {
        self.texts.insert(region, text.to_string());
        self
    }

    pub fn default_text(&mut self, text: &str) -> &mut Self {
        self.default_text = text.to_string();
        self
    }

    pub fn color(&mut self, point: ScreenPoint, rgb: [u8; 3]) -> &mut Self {
        self.colors.insert(point, Rgb(rgb));
        self
    }

    fn visible(&mut self, image: &str, region: ScreenRect) -> Vec<Match> {
        self.lookups.push(image.to_string());
        let Some(sightings) = self.images.get_mut(image) else {
            return Vec::new();
        };
        let mut found = Vec::new();
        for sighting in sightings.iter_mut() {
            if sighting.remaining == Some(0) || !region.contains(sighting.rect.center()) {
                continue;
            }
            if let Some(left) = sighting.remaining.as_mut() {
                *left -= 1;
            }
            found.push(Match {
                rect: sighting.rect,
                score: 1.0,
            });
        }
        found
    }
}

impl Vision for ScriptedVision {
    fn find(&mut self, image: &str, region: ScreenRect, _confidence: f32) -> Result<Option<Match>, VisionError> {
        Ok(self.visible(image, region).into_iter().next())
    }

    fn find_all(&mut self, image: &str, region: ScreenRect, _confidence: f32) -> Result<Vec<Match>, VisionError> {
        Ok(self.visible(image, region))
    }

    fn read_text(&mut self, region: ScreenRect) -> Result<String, VisionError> {
        if region.height < MIN_TEXT_HEIGHT {
            return Err(VisionError::RegionTooShort(region.height));
        }
        let raw = self.texts.get(&region).unwrap_or(&self.default_text);
        Ok(normalize_text(raw))
    }

    fn pixels(&mut self, points: &[ScreenPoint]) -> Result<Vec<Option<Rgb<u8>>>, VisionError> {
        Ok(points.iter().map(|p| self.colors.get(p).copied()).collect())
    }
}

pub type TestMiner = Miner<ScriptedVision, RecordingInput, FakeClock>;

/// Low-resolution window at the origin, so logical and screen coordinates agree
pub fn low_res_context() -> ScaleContext {
    let (w, h) = Resolution::Low.size();
    ScaleContext::new(ScreenRect::new(0, 0, w, h), Resolution::Low)
}

pub fn miner(vision: ScriptedVision) -> TestMiner {
    Miner::new(
        vision,
        RecordingInput::default(),
        FakeClock::default(),
        low_res_context(),
        Settings::default(),
    )
}

/// A small box centred on `(x, y)`
pub fn box_at(x: i32, y: i32) -> ScreenRect {
    ScreenRect::new(x - 10, y - 10, 20, 20)
}
