//! Moving between views and locating dynamic controls

use std::time::Duration;

use super::layout::{self, images};
use super::verify::SHAFT_TIMEOUT;
use crate::android::Input;
use crate::clock::Clock;
use crate::game::Area;
use crate::vision::{Match, ScreenPoint, Vision};
use crate::{Miner, MinerError};

/// Scrolling a list animates for a while
const SCROLL_SETTLE: Duration = Duration::from_secs(2);
const LEVEL_CONFIDENCE: f32 = 0.7;

impl<V: Vision, I: Input, C: Clock> Miner<V, I, C> {
    /// Scroll the shaft view to the surface
    ///
    /// Returns `false` without scrolling when the shaft view isn't showing.
    pub fn goto_shaft_top(&mut self) -> Result<bool, MinerError> {
        self.goto_shaft_end(true)
    }

    /// Scroll the shaft view to the deepest shaft
    pub fn goto_shaft_bottom(&mut self) -> Result<bool, MinerError> {
        self.goto_shaft_end(false)
    }

    fn goto_shaft_end(&mut self, top: bool) -> Result<bool, MinerError> {
        if !self.verify_in_shaft(SHAFT_TIMEOUT)? {
            return Ok(false);
        }
        let arrow = if top {
            layout::SHAFT_UP_ARROW
        } else {
            layout::SHAFT_DOWN_ARROW
        };
        self.click_loc(arrow)?;
        self.pause(SCROLL_SETTLE);
        Ok(true)
    }

    pub fn goto_overview_top(&mut self) -> Result<(), MinerError> {
        self.click_loc(layout::OVERVIEW_UP_ARROW)?;
        self.pause(SCROLL_SETTLE);
        Ok(())
    }

    pub fn goto_overview_bottom(&mut self) -> Result<(), MinerError> {
        self.click_loc(layout::OVERVIEW_DOWN_ARROW)?;
        self.pause(SCROLL_SETTLE);
        Ok(())
    }

    /// Open the mine overview through the shovel icon
    pub fn open_mine_overview(&mut self) -> Result<bool, MinerError> {
        if self.click_image(images::SHOVEL)?.is_none() {
            log::error!("Shovel not found to open Mine Overview");
            return Ok(false);
        }
        Ok(true)
    }

    /// The bottom-most level indicator, after scrolling to the deepest shaft
    pub fn last_level(&mut self) -> Result<Option<Match>, MinerError> {
        self.goto_shaft_bottom()?;
        self.pause(SCROLL_SETTLE);
        let levels = self.find_all(images::LEVEL, LEVEL_CONFIDENCE)?;
        let last = levels.into_iter().max_by_key(|m| m.rect.top);
        if last.is_none() {
            log::error!("No level icon found");
        }
        Ok(last)
    }

    /// Where to click for the deepest shaft's manager
    pub fn last_manager(&mut self) -> Result<Option<ScreenPoint>, MinerError> {
        let Some(level) = self.last_level()? else {
            log::error!("No last manager found");
            return Ok(None);
        };
        let offset = self.ctx.scaled(layout::LAST_MANAGER_OFFSET);
        Ok(Some(level.top_left().offset(-offset, 0)))
    }

    /// Open the manager panel of `area` and confirm it is showing
    pub fn open_manager_window(&mut self, area: Area) -> Result<bool, MinerError> {
        match area {
            Area::PrimaryShaft => {
                let Some(manager) = self.last_manager()? else {
                    log::warn!("Couldn't find last manager");
                    return Ok(false);
                };
                self.click_at(manager)?;
            }
            Area::Elevator | Area::Warehouse => {
                if !self.goto_shaft_top()? {
                    return Ok(false);
                }
                let manager = if area == Area::Elevator {
                    layout::ELEVATOR_MANAGER
                } else {
                    layout::WAREHOUSE_MANAGER
                };
                self.click_loc(manager)?;
            }
        }
        self.verify_in_manager_window(area)
    }
}
