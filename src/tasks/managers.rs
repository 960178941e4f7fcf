//! Rotating boosted managers
//!
//! Each area gets a fresh super manager once the previous one's boost has
//! run out. A manager is ready when the boost icon under its assign button
//! is orange; the list is scrolled until one is found or the passes run out.

use std::time::Duration;

use super::layout::{self, images};
use super::verify::SHAFT_TIMEOUT;
use crate::android::Input;
use crate::clock::Clock;
use crate::game::Area;
use crate::vision::{palette, ColorSpec, Match, ScreenPoint, Vision};
use crate::{Miner, MinerError};

/// Settle time after leaving the manager panel
pub const CLOSE_SETTLE: Duration = Duration::from_secs(1);
const ASSIGN_SETTLE: Duration = Duration::from_secs(1);
const CONFIRM_SETTLE: Duration = Duration::from_secs(2);
const DRAG_DURATION: Duration = Duration::from_secs(2);
const PRE_DRAG: Duration = Duration::from_millis(500);
const SCROLL_SETTLE: Duration = Duration::from_secs(3);
const ASSIGN_CONFIDENCE: f32 = 0.7;

fn scroll_passes(area: Area) -> usize {
    match area {
        Area::PrimaryShaft => 5,
        Area::Elevator | Area::Warehouse => 4,
    }
}

impl<V: Vision, I: Input, C: Clock> Miner<V, I, C> {
    /// Cycle the manager of every area whose boost has run out
    pub fn cycle_managers(&mut self) -> Result<(), MinerError> {
        let variant = self.state.variant;
        if !variant.cycles_managers() {
            log::debug!("Not cycling managers for {} mine", variant.name());
            return Ok(());
        }
        for area in Area::ALL {
            let now = self.now();
            let manager = *self.state.managers.get(area);
            if !manager.is_due(now) {
                let wait = manager.next_eligible_change.saturating_sub(now);
                log::debug!("{} not ready yet {}s", area, wait.as_secs());
                continue;
            }
            log::debug!(
                "Past {} change time by {}s",
                area,
                now.saturating_sub(manager.next_eligible_change).as_secs()
            );
            if manager.unknown_but_boosted() {
                log::warn!("Unknown manager in {} is still boosted", area);
                continue;
            }
            self.cycle_area(area, None)?;
            self.collect_bonus()?;
        }
        Ok(())
    }

    /// Assign and boost a new manager in `area`
    ///
    /// With `target`, the manager whose name reads as `target` is chosen
    /// instead of the first ready one. Returns `true` if a manager was
    /// assigned.
    pub fn cycle_area(&mut self, area: Area, target: Option<&str>) -> Result<bool, MinerError> {
        log::debug!("Cycling manager in {} area", area);
        if !self.verify_in_shaft(SHAFT_TIMEOUT)? {
            return Ok(false);
        }
        if !self.open_manager_window(area)? {
            log::warn!("{} manager window didn't open", area);
        }

        for tab in images::SUPER_MANAGER_TABS {
            if self.click_image(tab)?.is_some() {
                break;
            }
        }

        let passes = scroll_passes(area);
        let mut assigned = false;
        for pass in 0..passes {
            if !self.verify_in_manager_window(area)? {
                log::error!("Not in {} manager window", area);
                break;
            }
            if self.assign_next_manager(area, target)? {
                assigned = true;
                break;
            }
            if pass + 1 == passes {
                break;
            }
            self.scroll_manager_list()?;
            log::debug!("Trying again...");
        }

        if !assigned {
            log::info!("No boostable manager found in {}, waiting 2 min", area);
            let now = self.now();
            self.state.managers.get_mut(area).back_off(now);
        }
        self.back()?;
        self.pause(CLOSE_SETTLE);
        Ok(assigned)
    }

    /// Whether the manager behind `button` has its boost icon lit
    fn manager_ready(&mut self, button: &Match) -> Result<bool, MinerError> {
        let (dx, dy) = layout::READY_GRID_OFFSET;
        let base = button.top_left().offset(self.ctx.scaled(dx), self.ctx.scaled(dy));
        let points: Vec<ScreenPoint> = (0..layout::READY_GRID_SPAN)
            .step_by(layout::READY_GRID_STEP)
            .flat_map(|xx| {
                (0..layout::READY_GRID_SPAN)
                    .step_by(layout::READY_GRID_STEP)
                    .map(move |yy| base.offset(xx, yy))
            })
            .collect();
        let colors = self.vision.pixels(&points)?;
        Ok(colors
            .into_iter()
            .flatten()
            .any(|c| ColorSpec::any_matches(&palette::MANAGER_READY, c)))
    }

    /// Assign and boost the first suitable manager on screen
    fn assign_next_manager(&mut self, area: Area, target: Option<&str>) -> Result<bool, MinerError> {
        let buttons = self.find_all(images::ASSIGN, ASSIGN_CONFIDENCE)?;
        if buttons.is_empty() {
            log::error!("No assign buttons found");
            return Ok(false);
        }
        log::debug!("{} assign buttons", buttons.len());

        for button in &buttons {
            match target {
                None => {
                    if !self.manager_ready(button)? {
                        log::debug!("Doesn't look ready, moving to next manager");
                        continue;
                    }
                    log::debug!("Looks ready, assigning manager");
                }
                Some(wanted) => {
                    let text = self.read(layout::ROSTER_NAME.anchored_at(button.top_left()))?;
                    log::info!("Manager name next to assign button: {}", text);
                    if text != wanted {
                        log::debug!("Manager {} isn't {}", text, wanted);
                        continue;
                    }
                }
            }

            self.click_at(button.center())?;
            self.state.managers.get_mut(area).begin_assignment();
            self.pause(ASSIGN_SETTLE);
            for confirm in images::ASSIGN_ANYWAY {
                if self.click_image(confirm)?.is_some() {
                    self.pause(CONFIRM_SETTLE);
                    break;
                }
            }

            let name = self.read(layout::ASSIGNED_NAME)?;
            let duration = self.state.managers.get_mut(area).identify(&name);

            let Some(unassign) = self.find(images::UNASSIGN)? else {
                log::warn!("Couldn't find unassign button");
                continue;
            };
            let (dx, dy) = layout::BOOST_OFFSET;
            let boost = unassign.center().offset(self.ctx.scaled(dx), self.ctx.scaled(dy));
            log::info!("Boosting manager {} for {}s", name, duration.as_secs());
            self.click_at(boost)?;
            let now = self.now();
            self.state.managers.get_mut(area).boost_started(now, duration);
            return Ok(true);
        }
        log::debug!("No boostable managers found, need to scroll");
        Ok(false)
    }

    /// Drag the manager list up by about one row
    fn scroll_manager_list(&mut self) -> Result<(), MinerError> {
        let game = self.game_rect();
        let start = ScreenPoint::new(
            game.left + game.width / 2,
            game.top + self.ctx.scaled(layout::MANAGER_SCROLL_START),
        );
        self.input.move_to(start)?;
        self.pause(PRE_DRAG);
        let distance = self.ctx.scaled(layout::MANAGER_SCROLL_DISTANCE);
        self.input.drag(start, 0, -distance, DRAG_DURATION)?;
        self.pause(SCROLL_SETTLE);
        Ok(())
    }
}
