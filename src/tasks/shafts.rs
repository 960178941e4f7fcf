//! Opening new shafts, hiring their managers, and removing barriers

use std::time::Duration;

use super::layout::{self, images};
use crate::android::Input;
use crate::clock::Clock;
use crate::vision::{palette, Vision};
use crate::{Miner, MinerError};

/// Most shafts opened in one pass
const MAX_NEW_SHAFTS: u32 = 5;
const OPEN_SETTLE: Duration = Duration::from_secs(3);
const PANEL_SETTLE: Duration = Duration::from_secs(2);
const BUTTON_SETTLE: Duration = Duration::from_millis(500);
const BARRIER_SETTLE: Duration = Duration::from_secs(1);

impl<V: Vision, I: Input, C: Clock> Miner<V, I, C> {
    /// Open every new shaft that is ready, hiring a manager for each
    ///
    /// Returns how many shafts were opened.
    pub fn new_shaft(&mut self) -> Result<u32, MinerError> {
        log::debug!("New shaft");
        let region = self.ctx.to_absolute_region(layout::NEW_SHAFT_AREA);
        let mut opened = 0;
        for _ in 0..MAX_NEW_SHAFTS {
            if !self.goto_shaft_bottom()? {
                log::debug!("Not in a mineshaft, not opening new shafts");
                break;
            }
            let Some(button) = self.find_in(images::NEW_SHAFT, region)? else {
                break;
            };

            // Template matching alone confuses other blue buttons for this one
            let check = button.center().offset(-5, -5);
            let color = self.vision.pixel(check)?;
            if !color.is_some_and(|c| palette::NEW_SHAFT_BLUE.matches(c)) {
                log::debug!("New shaft button isn't the right color: {:?}", color);
                break;
            }

            log::info!("Opening new shaft");
            self.click_at(button.center())?;
            self.pause(OPEN_SETTLE);
            self.hire_last_manager()?;
            opened += 1;
        }
        Ok(opened)
    }

    /// Hire a manager for the deepest shaft
    ///
    /// Returns `false` if the shaft or the hire button couldn't be found.
    pub fn hire_last_manager(&mut self) -> Result<bool, MinerError> {
        log::debug!("Hiring last manager");
        let Some(manager) = self.last_manager()? else {
            return Ok(false);
        };
        self.click_at(manager)?;
        self.pause(PANEL_SETTLE);

        // Only shown when more than one currency can pay
        if self.click_image(images::DOLLAR_MANAGER_TAB)?.is_some() {
            self.pause(BUTTON_SETTLE);
        }

        let mut hire = self.find(images::HIRE_MANAGER)?;
        if hire.is_none() {
            log::warn!("Can't find {}, trying alternate", images::HIRE_MANAGER);
            hire = self.find(images::HIRE_MANAGER_ALT)?;
        }
        let hired = match hire {
            Some(button) => {
                self.click_at(button.center())?;
                log::info!("Hired manager");
                true
            }
            None => {
                log::error!("Can't find hire button");
                false
            }
        };
        self.pause(BUTTON_SETTLE);
        self.back()?;
        Ok(hired)
    }

    /// Remove the barrier below the deepest shaft if it can be removed
    pub fn unlock_barrier(&mut self) -> Result<bool, MinerError> {
        log::debug!("Trying to unlock barrier");
        if !self.goto_shaft_bottom()? {
            log::debug!("Not in a mineshaft, not unlocking barrier");
            return Ok(false);
        }
        let unlocked = match self.find(images::REMOVE_BARRIER)? {
            Some(marker) => {
                // Off the icon's edge, which doesn't take the tap
                self.click_at(marker.center().offset(-5, -5))?;
                log::info!("Unlocking barrier!");
                self.pause(BARRIER_SETTLE);
                true
            }
            None => false,
        };

        // Free timer skips show up after unlocking
        self.click_image(images::SKIP_NO_TIME)?;
        Ok(unlocked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{box_at, miner, ScriptedVision};
    use crate::vision::{ScreenPoint, ScreenRect};

    const LAST_LEVEL: ScreenRect = ScreenRect::new(290, 560, 30, 16);
    const BLUE: [u8; 3] = [90, 168, 230];

    fn deepest_shaft() -> ScriptedVision {
        let mut vision = ScriptedVision::new();
        vision.show(images::LEVEL, LAST_LEVEL);
        vision
    }

    #[test]
    fn test_opens_confirmed_shaft_and_hires() {
        let mut vision = deepest_shaft();
        vision
            .show_times(images::NEW_SHAFT, box_at(300, 620), 1)
            .color(ScreenPoint::new(295, 615), BLUE)
            .show(images::HIRE_MANAGER, box_at(200, 450));
        let mut miner = miner(vision);

        assert_eq!(miner.new_shaft().unwrap(), 1);
        let clicks = miner.input.clicks();
        assert!(clicks.contains(&ScreenPoint::new(300, 620)));
        assert!(clicks.contains(&ScreenPoint::new(140, 560)));
        assert!(clicks.contains(&ScreenPoint::new(200, 450)));
    }

    #[test]
    fn test_wrong_colour_rejects_new_shaft() {
        let mut vision = deepest_shaft();
        vision
            .show(images::NEW_SHAFT, box_at(300, 620))
            .color(ScreenPoint::new(295, 615), [200, 200, 200]);
        let mut miner = miner(vision);

        assert_eq!(miner.new_shaft().unwrap(), 0);
        assert!(!miner.input.clicks().contains(&ScreenPoint::new(300, 620)));
    }

    #[test]
    fn test_new_shaft_is_bounded() {
        let mut vision = deepest_shaft();
        vision
            .show(images::NEW_SHAFT, box_at(300, 620))
            .color(ScreenPoint::new(295, 615), BLUE);
        let mut miner = miner(vision);
        assert_eq!(miner.new_shaft().unwrap(), MAX_NEW_SHAFTS);
    }

    #[test]
    fn test_hire_falls_back_to_alternate_button() {
        let mut vision = deepest_shaft();
        vision.show(images::HIRE_MANAGER_ALT, box_at(210, 470));
        let mut miner = miner(vision);

        assert!(miner.hire_last_manager().unwrap());
        assert!(miner.input.clicks().contains(&ScreenPoint::new(210, 470)));
        assert_eq!(miner.input.presses(), 1);
    }

    #[test]
    fn test_hire_without_button_only_backs_out() {
        let mut miner = miner(deepest_shaft());
        assert!(!miner.hire_last_manager().unwrap());
        // Down arrow and the manager slot
        assert_eq!(miner.input.clicks().len(), 2);
        assert_eq!(miner.input.presses(), 1);
    }

    #[test]
    fn test_new_shaft_needs_shaft_view() {
        let mut vision = ScriptedVision::new();
        vision
            .show(images::NEW_SHAFT, box_at(300, 620))
            .color(ScreenPoint::new(295, 615), BLUE);
        let mut miner = miner(vision);

        assert_eq!(miner.new_shaft().unwrap(), 0);
        assert!(miner.input.events.is_empty());
        assert!(!miner.vision.lookups.iter().any(|l| l == images::NEW_SHAFT));
    }

    #[test]
    fn test_hire_pays_in_dollars_first() {
        let mut vision = deepest_shaft();
        vision
            .show(images::DOLLAR_MANAGER_TAB, box_at(120, 200))
            .show(images::HIRE_MANAGER, box_at(200, 450));
        let mut miner = miner(vision);

        assert!(miner.hire_last_manager().unwrap());
        let clicks = miner.input.clicks();
        assert_eq!(
            clicks[clicks.len() - 3..],
            [
                ScreenPoint::new(140, 560),
                ScreenPoint::new(120, 200),
                ScreenPoint::new(200, 450)
            ]
        );
    }

    #[test]
    fn test_barrier_needs_shaft_view() {
        let mut vision = ScriptedVision::new();
        vision.show(images::REMOVE_BARRIER, box_at(200, 640));
        let mut miner = miner(vision);

        assert!(!miner.unlock_barrier().unwrap());
        assert!(miner.input.events.is_empty());
    }

    #[test]
    fn test_barrier_click_is_offset() {
        let mut vision = deepest_shaft();
        vision.show(images::REMOVE_BARRIER, box_at(200, 640));
        let mut miner = miner(vision);

        assert!(miner.unlock_barrier().unwrap());
        assert!(miner.input.clicks().contains(&ScreenPoint::new(195, 635)));
    }
}
