//! Bounded checks for which game view is showing

use std::time::Duration;

use super::layout::{self, images};
use crate::android::Input;
use crate::clock::Clock;
use crate::game::Area;
use crate::vision::Vision;
use crate::{Miner, MinerError};

/// Default wait for the shaft view
pub const SHAFT_TIMEOUT: Duration = Duration::from_secs(3);
/// Wait for the shaft view at startup, while the game may still be loading
pub const STARTUP_SHAFT_TIMEOUT: Duration = Duration::from_secs(120);
const GAME_TIMEOUT: Duration = Duration::from_secs(3);
const HEADING_TIMEOUT: Duration = Duration::from_secs(3);
const HEADING_POLL: Duration = Duration::from_millis(250);

/// Level indicators are small and sit on busy art
const LEVEL_CONFIDENCE: f32 = 0.7;

const GAME_MARKERS: [&str; 4] = [
    images::SHOVEL,
    images::SHOP,
    images::FRONTIER_SHOP,
    images::FRONTIER_SHOP_ALT,
];

/// Whether an OCR'd manager panel heading belongs to `area`
///
/// Tolerates the usual misreads of each heading.
pub fn manager_heading_matches(area: Area, text: &str) -> bool {
    if text.contains("manager") || text.contains("hanager") {
        return true;
    }
    let alternates: &[&str] = match area {
        Area::PrimaryShaft => &["mine", "shaft"],
        Area::Elevator => &["ele", "vator"],
        Area::Warehouse => &["ware", "house"],
    };
    alternates.iter().any(|alt| text.contains(alt))
}

pub fn overview_heading_matches(text: &str) -> bool {
    ["mineoverview", "måneovervåew", "over"]
        .iter()
        .any(|heading| text.contains(heading))
}

impl<V: Vision, I: Input, C: Clock> Miner<V, I, C> {
    /// Wait until at least one level indicator is visible
    pub fn verify_in_shaft(&mut self, timeout: Duration) -> Result<bool, MinerError> {
        let deadline = self.now() + timeout;
        while self.now() < deadline {
            if !self.find_all(images::LEVEL, LEVEL_CONFIDENCE)?.is_empty() {
                return Ok(true);
            }
            self.poll_pause();
        }
        log::error!("Can't find shaft!");
        Ok(false)
    }

    /// Wait until any general gameplay marker is visible
    pub fn verify_in_game(&mut self) -> Result<bool, MinerError> {
        let deadline = self.now() + GAME_TIMEOUT;
        let mut attempts = 0;
        while self.now() < deadline {
            for marker in GAME_MARKERS {
                if self.find(marker)?.is_some() {
                    return Ok(true);
                }
            }
            attempts += 1;
            self.poll_pause();
        }
        log::error!("Can't find shovel/shop to verify in game! ({} attempts)", attempts);
        Ok(false)
    }

    /// Wait until the manager panel for `area` is in front
    pub fn verify_in_manager_window(&mut self, area: Area) -> Result<bool, MinerError> {
        let deadline = self.now() + HEADING_TIMEOUT;
        let mut text = String::new();
        while self.now() < deadline {
            text = self.read(layout::MANAGER_HEADING)?;
            log::debug!("Manager window heading: {}", text);
            if manager_heading_matches(area, &text) {
                return Ok(true);
            }
            self.pause(HEADING_POLL);
        }
        log::error!("{} manager window not found via OCR: {:?}", area, text);
        Ok(false)
    }

    pub fn verify_in_mine_overview(&mut self) -> Result<bool, MinerError> {
        let deadline = self.now() + HEADING_TIMEOUT;
        let mut text = String::new();
        while self.now() < deadline {
            text = self.read(layout::OVERVIEW_HEADING)?;
            log::debug!("Mine overview heading: {}", text);
            if overview_heading_matches(&text) {
                return Ok(true);
            }
            self.pause(HEADING_POLL);
        }
        log::error!("Mine overview not found in {:?}", text);
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{box_at, miner, ScriptedVision};

    #[test]
    fn test_manager_heading_is_area_keyed() {
        assert!(manager_heading_matches(Area::Elevator, "elevatorhanager"));
        assert!(manager_heading_matches(Area::Warehouse, "warehouse"));
        assert!(manager_heading_matches(Area::PrimaryShaft, "mineshaft12"));
        assert!(manager_heading_matches(Area::PrimaryShaft, "supermanagers"));

        assert!(!manager_heading_matches(Area::PrimaryShaft, "elevat0r"));
        assert!(!manager_heading_matches(Area::Warehouse, "elevator"));
        assert!(!manager_heading_matches(Area::Elevator, ""));
    }

    #[test]
    fn test_overview_heading_tolerates_misreads() {
        assert!(overview_heading_matches("mineoverview"));
        assert!(overview_heading_matches("måneovervåew"));
        assert!(overview_heading_matches("m1neover"));
        assert!(!overview_heading_matches("shop"));
    }

    #[test]
    fn test_in_shaft_when_level_visible() {
        let mut vision = ScriptedVision::new();
        vision.show(images::LEVEL, box_at(300, 400));
        let mut miner = miner(vision);

        assert!(miner.verify_in_shaft(SHAFT_TIMEOUT).unwrap());
        assert_eq!(miner.now(), Duration::ZERO);
    }

    #[test]
    fn test_not_in_shaft_after_timeout() {
        let mut miner = miner(ScriptedVision::new());
        assert!(!miner.verify_in_shaft(SHAFT_TIMEOUT).unwrap());
        assert!(miner.now() >= SHAFT_TIMEOUT);
    }

    #[test]
    fn test_in_game_on_any_marker() {
        let mut vision = ScriptedVision::new();
        vision.show(images::FRONTIER_SHOP_ALT, box_at(200, 650));
        let mut miner = miner(vision);
        assert!(miner.verify_in_game().unwrap());

        let mut miner = crate::testing::miner(ScriptedVision::new());
        assert!(!miner.verify_in_game().unwrap());
    }

    #[test]
    fn test_manager_window_polls_heading() {
        let mut vision = ScriptedVision::new();
        vision.default_text("warehousemanager");
        let mut miner = miner(vision);
        assert!(miner.verify_in_manager_window(Area::Warehouse).unwrap());

        let mut vision = ScriptedVision::new();
        vision.default_text("shop");
        let mut miner = crate::testing::miner(vision);
        assert!(!miner.verify_in_manager_window(Area::Warehouse).unwrap());
        assert!(miner.now() >= HEADING_TIMEOUT);
    }

    #[test]
    fn test_overview_reads_its_heading() {
        let mut vision = ScriptedVision::new();
        let heading = crate::testing::low_res_context().to_absolute_region(layout::OVERVIEW_HEADING);
        vision.text(heading, "mineoverview");
        let mut miner = miner(vision);
        assert!(miner.verify_in_mine_overview().unwrap());
    }
}
