//! Idle Miner - screen-driven automation for Idle Miner Tycoon on Android
//!
//! This library watches an emulator's screen, classifies what it shows with
//! template matching, OCR, and pixel colours, and drives the game with
//! synthetic touch input.
//!
//! ## Layout
//!
//! - `vision` turns pixels into perception primitives and maps logical
//!   layout coordinates onto the screen.
//! - `android` talks to the emulator over ADB.
//! - `game` holds what the automation knows about the mine.
//! - `tasks` contains the behaviors and the scheduler that runs them.

pub mod android;
pub mod clock;
pub mod config;
pub mod game;
pub mod tasks;
pub mod vision;

#[cfg(test)]
mod testing;

use std::time::Duration;

use crate::android::{DeviceError, Input, Key};
use crate::clock::Clock;
use crate::config::{ConfigError, Settings};
use crate::game::MineState;
use crate::vision::{Loc, Match, Region, ScaleContext, ScreenPoint, ScreenRect, Vision, VisionError};

/// The automation driver
///
/// Owns the device collaborators, the fixed coordinate mapping, and every
/// piece of state learned during the run. Behaviors live in [`tasks`].
pub struct Miner<V, I, C> {
    pub vision: V,
    pub input: I,
    pub clock: C,
    pub ctx: ScaleContext,
    pub settings: Settings,
    pub state: MineState,
}

impl<V: Vision, I: Input, C: Clock> Miner<V, I, C> {
    /// Create a driver with fresh run state
    pub fn new(vision: V, input: I, clock: C, ctx: ScaleContext, settings: Settings) -> Self {
        let state = MineState::new(clock.now());
        Self {
            vision,
            input,
            clock,
            ctx,
            settings,
            state,
        }
    }

    pub fn now(&self) -> Duration {
        self.clock.now()
    }

    /// Let the game's UI settle
    pub fn pause(&self, duration: Duration) {
        self.clock.sleep(duration);
    }

    /// Sleep one polling interval
    pub(crate) fn poll_pause(&self) {
        self.clock.sleep(self.settings.timings.poll_interval());
    }

    pub fn game_rect(&self) -> ScreenRect {
        self.ctx.game_rect()
    }

    /// Look for an image anywhere in the game area
    pub fn find(&mut self, image: &str) -> Result<Option<Match>, MinerError> {
        let region = self.game_rect();
        self.find_in(image, region)
    }

    /// Look for an image inside `region` at the default confidence
    pub fn find_in(&mut self, image: &str, region: ScreenRect) -> Result<Option<Match>, MinerError> {
        let found = self.vision.find(image, region, self.settings.confidence)?;
        if let Some(m) = &found {
            log::debug!("Found {} at ({}, {})", image, m.center().x, m.center().y);
        }
        Ok(found)
    }

    /// Every occurrence of an image in the game area
    pub fn find_all(&mut self, image: &str, confidence: f32) -> Result<Vec<Match>, MinerError> {
        let region = self.game_rect();
        Ok(self.vision.find_all(image, region, confidence)?)
    }

    /// Click the centre of an image if it is visible in the game area
    pub fn click_image(&mut self, image: &str) -> Result<Option<Match>, MinerError> {
        let region = self.game_rect();
        self.click_image_in(image, region)
    }

    pub fn click_image_in(&mut self, image: &str, region: ScreenRect) -> Result<Option<Match>, MinerError> {
        let found = self.vision.find(image, region, self.settings.confidence)?;
        if let Some(m) = &found {
            let center = m.center();
            self.input.click(center)?;
            log::debug!("Clicked {} at ({}, {})", image, center.x, center.y);
        }
        Ok(found)
    }

    /// Poll for an image until it shows up or `timeout` passes
    pub fn wait_for(&mut self, image: &str, timeout: Duration) -> Result<Option<Match>, MinerError> {
        let deadline = self.now() + timeout;
        while self.now() < deadline {
            if let Some(found) = self.find(image)? {
                return Ok(Some(found));
            }
            self.poll_pause();
        }
        log::warn!("Couldn't find {} after {}s", image, timeout.as_secs());
        Ok(None)
    }

    /// Normalized text inside a layout region
    pub fn read(&mut self, region: Region) -> Result<String, MinerError> {
        let rect = self.ctx.to_absolute_region(region);
        Ok(self.vision.read_text(rect)?)
    }

    pub fn click_at(&mut self, point: ScreenPoint) -> Result<(), MinerError> {
        self.input.move_to(point)?;
        self.input.click(point)?;
        Ok(())
    }

    /// Click a layout location
    pub fn click_loc(&mut self, loc: Loc) -> Result<(), MinerError> {
        let point = self.ctx.to_absolute(loc);
        self.click_at(point)
    }

    /// Press back, which closes whatever panel is open
    pub fn back(&mut self) -> Result<(), MinerError> {
        self.input.press(Key::Back)?;
        Ok(())
    }
}

/// Top-level automation errors
///
/// Perception misses are never errors; these are failures to reach the
/// device or to start at all.
#[derive(Debug, thiserror::Error)]
pub enum MinerError {
    #[error("Device error: {0}")]
    Device(#[from] DeviceError),
    #[error("Vision error: {0}")]
    Vision(#[from] VisionError),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Emulator window not found")]
    WindowNotFound,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{box_at, miner, InputEvent, ScriptedVision};

    #[test]
    fn test_click_image_hits_centre() {
        let mut vision = ScriptedVision::new();
        vision.show("free", box_at(100, 200));
        let mut miner = miner(vision);

        assert!(miner.click_image("free").unwrap().is_some());
        assert!(miner.click_image("claim").unwrap().is_none());
        assert_eq!(miner.input.events, vec![InputEvent::Click(ScreenPoint::new(100, 200))]);
    }

    #[test]
    fn test_images_outside_game_area_are_ignored() {
        let mut vision = ScriptedVision::new();
        // Inside the emulator's title bar
        vision.show("free", box_at(100, 10));
        let mut miner = miner(vision);
        assert!(miner.find("free").unwrap().is_none());
    }

    #[test]
    fn test_wait_for_times_out_on_simulated_clock() {
        let mut miner = miner(ScriptedVision::new());
        let start = miner.now();

        assert!(miner.wait_for("cancel", Duration::from_secs(5)).unwrap().is_none());
        assert!(miner.now() - start >= Duration::from_secs(5));
    }

    #[test]
    fn test_wait_for_returns_once_visible() {
        let mut vision = ScriptedVision::new();
        vision.show("cancel", box_at(50, 300));
        let mut miner = miner(vision);

        let found = miner.wait_for("cancel", Duration::from_secs(5)).unwrap();
        assert_eq!(found.map(|m| m.center()), Some(ScreenPoint::new(50, 300)));
        assert_eq!(miner.now(), Duration::ZERO);
    }

    #[test]
    fn test_short_text_region_is_an_error() {
        let mut miner = miner(ScriptedVision::new());
        let err = miner.read(Region::new(0, 0, 100, 10)).unwrap_err();
        assert!(matches!(err, MinerError::Vision(VisionError::RegionTooShort(10))));
    }
}
