//! Mine overview scanning and area upgrades

use std::time::Duration;

use super::layout::{self, images};
use super::verify::SHAFT_TIMEOUT;
use crate::android::Input;
use crate::clock::Clock;
use crate::game::Area;
use crate::vision::{palette, ColorSpec, Loc, ScreenPoint, Vision};
use crate::{Miner, MinerError};

const MARKER_TIMEOUT: Duration = Duration::from_secs(2);
const PANEL_SETTLE: Duration = Duration::from_secs(1);
const BUTTON_SETTLE: Duration = Duration::from_millis(500);

/// Pixel rows probed above the upgrade arrow location
const ARROW_PROBE_RANGE: i32 = 10;
const ARROW_PROBE_STEP: usize = 3;

/// Result of one leveling attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelUpOutcome {
    /// The level panel was opened and the upgrade confirmed
    Upgraded,
    /// The level panel was opened but had no upgrade button
    NoUpgradeButton,
    /// The upgrade arrow showed nothing affordable; nothing was clicked
    NotUpgradable,
    /// The expected view never showed up
    Aborted,
}

/// Whether the shaft heading OCR looks like a mineshaft
///
/// This heading is read over animated art, so several misreads are
/// accepted.
pub fn shaft_heading_matches(text: &str) -> bool {
    ["mineshaft", "mdne", "mbne"].iter().any(|word| text.contains(word))
}

impl<V: Vision, I: Input, C: Clock> Miner<V, I, C> {
    /// Which area an attention marker `y` pixels below the game area's top
    /// points at
    pub fn area_for_marker(&self, y: i32) -> Area {
        if y < self.ctx.scaled(layout::WAREHOUSE_BAND_END) {
            Area::Warehouse
        } else if y < self.ctx.scaled(layout::ELEVATOR_BAND_END) {
            Area::Elevator
        } else {
            Area::PrimaryShaft
        }
    }

    /// Open the mine overview and update the leveling target and boost states
    pub fn mine_overview(&mut self) -> Result<bool, MinerError> {
        if !self.open_mine_overview()? {
            log::error!("Couldn't open mine overview");
            return Ok(false);
        }
        if !self.verify_in_mine_overview()? {
            log::error!("Can't verify in mine overview");
            return Ok(false);
        }
        self.goto_overview_top()?;

        let Some(marker) = self.wait_for(images::EXCLAMATION, MARKER_TIMEOUT)? else {
            log::error!("Exclamation not found");
            self.pause(PANEL_SETTLE);
            self.back()?;
            self.pause(PANEL_SETTLE);
            return Ok(false);
        };

        let y = marker.center().y - self.game_rect().top;
        let wanted = self.area_for_marker(y);
        if self.state.point_leveling_at(wanted) {
            log::info!("{} area needs leveling!", self.state.area_needing_level);
        }

        self.refresh_boost_states()?;

        self.back()?;
        self.pause(PANEL_SETTLE);
        Ok(true)
    }

    /// Classify the boost bar of every area whose manager is unidentified
    ///
    /// Must be called with the mine overview open.
    pub fn refresh_boost_states(&mut self) -> Result<(), MinerError> {
        if !self.state.variant.shows_boost_bars() {
            return Ok(());
        }
        for area in Area::ALL {
            if self.state.managers.get(area).identity_known {
                continue;
            }
            let bar = match area {
                Area::PrimaryShaft => {
                    self.goto_overview_bottom()?;
                    layout::SHAFT_BOOST_BAR
                }
                Area::Elevator => {
                    self.goto_overview_top()?;
                    layout::ELEVATOR_BOOST_BAR
                }
                Area::Warehouse => {
                    self.goto_overview_top()?;
                    layout::WAREHOUSE_BOOST_BAR
                }
            };
            let point = self.ctx.to_absolute(bar);
            let color = self.vision.pixel(point)?;
            let active = color.is_some_and(|c| palette::BOOST_ACTIVE.matches(c));
            let manager = self.state.managers.get_mut(area);

            if active {
                if manager.boosted {
                    log::debug!("{} boost in progress", area);
                } else {
                    log::info!("{} manager is boosted", area);
                }
                manager.boosted = true;
                continue;
            }
            manager.boosted = false;
            match color {
                Some(c) if palette::BOOST_RECOVERING.matches(c) => log::debug!("{} manager recovering", area),
                Some(c) if palette::BOOST_READY_BACKGROUND.matches(c) => {
                    log::debug!("{} manager ready to boost", area)
                }
                other => log::debug!("{} manager ready to boost {:?}", area, other),
            }
        }
        Ok(())
    }

    /// Level up whichever area the mine overview says needs it most
    pub fn level_up(&mut self) -> Result<LevelUpOutcome, MinerError> {
        self.mine_overview()?;
        let area = self.state.area_needing_level;
        log::debug!("Leveling up {}", area);

        if !self.verify_in_game()? {
            log::error!("Not in game, canceling level up");
            return Ok(LevelUpOutcome::Aborted);
        }
        if !self.verify_in_shaft(SHAFT_TIMEOUT)? {
            log::error!("Not in shaft, canceling level up");
            return Ok(LevelUpOutcome::Aborted);
        }

        let (level, arrow) = match area {
            Area::PrimaryShaft => {
                let Some(level) = self.last_level()? else {
                    log::error!("Can't find last level");
                    return Ok(LevelUpOutcome::Aborted);
                };
                (level.center(), level.top_left().offset(0, -5))
            }
            Area::Elevator => self.surface_level(layout::ELEVATOR_LEVEL, layout::ELEVATOR_UPGRADE_ARROW)?,
            Area::Warehouse => self.surface_level(layout::WAREHOUSE_LEVEL, layout::WAREHOUSE_UPGRADE_ARROW)?,
        };
        self.upgrade_at(area, level, arrow)
    }

    fn surface_level(&mut self, level: Loc, arrow: Loc) -> Result<(ScreenPoint, ScreenPoint), MinerError> {
        self.goto_shaft_top()?;
        Ok((self.ctx.to_absolute(level), self.ctx.to_absolute(arrow)))
    }

    /// Upgrade `area` through its level button, if the arrow says it's affordable
    pub fn upgrade_at(&mut self, area: Area, level: ScreenPoint, arrow: ScreenPoint) -> Result<LevelUpOutcome, MinerError> {
        let probes: Vec<ScreenPoint> = (0..ARROW_PROBE_RANGE)
            .step_by(ARROW_PROBE_STEP)
            .map(|dy| arrow.offset(0, -dy))
            .collect();
        let colors = self.vision.pixels(&probes)?;
        let upgradable = colors
            .iter()
            .flatten()
            .any(|&c| ColorSpec::any_matches(&palette::UPGRADE_ARROW, c));
        if !upgradable {
            log::debug!("Upgrade arrow not found: {:?}", colors);
            return Ok(LevelUpOutcome::NotUpgradable);
        }
        log::debug!("Found upgrade arrow");

        self.click_at(level)?;
        self.pause(PANEL_SETTLE);
        self.click_image(images::MAX_SELECTED)?;
        self.click_image(images::MAX_UNSELECTED)?;
        self.pause(BUTTON_SETTLE);
        let outcome = if self.click_image(images::UPGRADE)?.is_some() {
            self.state.last_upgrade = Some(self.now());
            log::info!("Upgraded {}", area);
            self.pause(BUTTON_SETTLE);
            LevelUpOutcome::Upgraded
        } else {
            log::debug!("No upgrade button for {}", area);
            LevelUpOutcome::NoUpgradeButton
        };

        if self.find(images::MAXED_UPGRADES)?.is_some() {
            log::info!("{} is maxed out", area);
            self.state.maxed.set_maxed(area);
            if area == Area::PrimaryShaft {
                self.max_all_shafts()?;
            }
        }

        self.back()?;
        self.pause(PANEL_SETTLE);
        Ok(outcome)
    }

    /// Walk back through earlier shafts, upgrading each to its maximum
    ///
    /// Stops at the first shaft, on anything that doesn't look like a shaft,
    /// or after the configured number of shafts. Returns how many shafts
    /// were visited.
    pub fn max_all_shafts(&mut self) -> Result<u32, MinerError> {
        let limit = self.settings.automation.max_shaft_sweep;
        for visited in 0..limit {
            self.click_loc(layout::PREVIOUS_SHAFT_ARROW)?;
            self.pause(PANEL_SETTLE);
            let text = self.read(layout::SHAFT_HEADING)?;
            if self.find(images::MINESHAFT)?.is_none() && !shaft_heading_matches(&text) {
                log::error!("Not looking at a mineshaft, not maxing: {}", text);
                return Ok(visited);
            }

            if self.click_image(images::UPGRADE)?.is_some() {
                log::info!("Maxing mine '{}'", text);
            } else {
                log::info!("{} already maxed", text);
            }

            // "Mineshaft 1 Level ..." once the first shaft is reached
            if text.contains("ft1lev") {
                log::info!("Done maxing everything!");
                return Ok(visited + 1);
            }
            self.pause(BUTTON_SETTLE);
        }
        log::warn!("Stopped maxing shafts after {}", limit);
        Ok(limit)
    }
}
