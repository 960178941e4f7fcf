//! Subtask behaviors and the scheduler that runs them
//!
//! Every behavior checks its own preconditions and quietly does nothing
//! when the screen isn't what it expects, so the scheduler can run them
//! back to back forever without tracking a current screen.

pub mod bonus;
pub mod layout;
pub mod leveling;
pub mod managers;
pub mod navigate;
pub mod popups;
pub mod shafts;
pub mod verify;

pub use leveling::LevelUpOutcome;

use crate::android::Input;
use crate::clock::Clock;
use crate::game::GameVariant;
use crate::vision::Vision;
use crate::{Miner, MinerError};

use layout::images;
use verify::STARTUP_SHAFT_TIMEOUT;

impl<V: Vision, I: Input, C: Clock> Miner<V, I, C> {
    /// Work out which kind of mine is showing
    pub fn discover_variant(&mut self) -> Result<GameVariant, MinerError> {
        if !self.verify_in_shaft(STARTUP_SHAFT_TIMEOUT)? {
            log::error!("Timed out waiting for us to be in a mineshaft");
        }
        self.goto_shaft_top()?;

        let variant = if self.find(images::EVENT_MINE)?.is_some() {
            GameVariant::Event
        } else if self.find(images::MAINLAND_MENU)?.is_some() {
            GameVariant::Mainland
        } else if self.find(images::FRONTIER_SHOP)?.is_some() || self.find(images::FRONTIER_SHOP_ALT)?.is_some() {
            GameVariant::Frontier
        } else {
            GameVariant::Regular
        };
        log::info!("In {} mine.", variant.name());
        self.state.variant = variant;
        Ok(variant)
    }

    /// One steady-state pass over every behavior
    pub fn run_pass(&mut self) -> Result<(), MinerError> {
        self.relaunch_if_needed()?;
        self.close_popups()?;
        self.click_transient_buttons()?;
        self.collect_bonus()?;
        let outcome = self.level_up()?;
        log::debug!("Level up: {:?}", outcome);
        self.collect_bonus()?;
        self.new_shaft()?;
        self.unlock_barrier()?;
        self.collect_bonus()?;
        self.cycle_managers()?;
        self.collect_bonus()?;
        Ok(())
    }

    /// Discover the mine, then run passes until a device error
    pub fn run(&mut self) -> Result<(), MinerError> {
        self.discover_variant()?;
        let mut pass: u64 = 0;
        loop {
            pass += 1;
            log::debug!("Starting pass {}", pass);
            self.run_pass()?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{box_at, miner, ScriptedVision};
    use crate::vision::{ScreenPoint, ScreenRect};

    fn shaft() -> ScriptedVision {
        let mut vision = ScriptedVision::new();
        vision.show(images::LEVEL, ScreenRect::new(290, 560, 30, 16));
        vision
    }

    #[test]
    fn test_discover_regular_by_default() {
        let mut miner = miner(shaft());
        assert_eq!(miner.discover_variant().unwrap(), GameVariant::Regular);
    }

    #[test]
    fn test_discover_prefers_event_marker() {
        let mut vision = shaft();
        vision
            .show(images::EVENT_MINE, box_at(60, 100))
            .show(images::FRONTIER_SHOP, box_at(300, 650));
        let mut miner = miner(vision);

        assert_eq!(miner.discover_variant().unwrap(), GameVariant::Event);
        assert_eq!(miner.state.variant, GameVariant::Event);
        assert!(!miner.vision.lookups.iter().any(|l| l == images::FRONTIER_SHOP));
    }

    #[test]
    fn test_discover_frontier_from_either_shop() {
        let mut vision = shaft();
        vision.show(images::FRONTIER_SHOP_ALT, box_at(300, 650));
        let mut miner = miner(vision);
        assert_eq!(miner.discover_variant().unwrap(), GameVariant::Frontier);
    }

    #[test]
    fn test_discover_waits_long_for_shaft() {
        let mut miner = miner(ScriptedVision::new());
        assert_eq!(miner.discover_variant().unwrap(), GameVariant::Regular);
        assert!(miner.now() >= STARTUP_SHAFT_TIMEOUT);
    }

    #[test]
    fn test_relaunch_rediscovers() {
        let mut vision = shaft();
        vision
            .show_times(images::LAUNCHER_ICON, box_at(100, 300), 1)
            .show(images::MAINLAND_MENU, box_at(350, 100));
        let mut miner = miner(vision);

        assert!(miner.relaunch_if_needed().unwrap());
        assert_eq!(miner.state.variant, GameVariant::Mainland);
        assert_eq!(miner.input.clicks()[0], ScreenPoint::new(100, 300));
    }

    #[test]
    fn test_pass_runs_every_behavior_once() {
        let mut vision = shaft();
        vision.show("claim", box_at(200, 500));
        let mut miner = miner(vision);
        miner.state.variant = GameVariant::Mainland;

        miner.run_pass().unwrap();

        let searched = |name: &str| miner.vision.lookups.iter().filter(|l| *l == name).count();
        assert_eq!(searched(images::LAUNCHER_ICON), 1);
        assert_eq!(searched("claim"), 1);
        assert_eq!(searched(images::NEW_SHAFT), 1);
        assert_eq!(searched(images::REMOVE_BARRIER), 2);
        assert_eq!(searched(images::SKIP_NO_TIME), 1);
        // One bonus search per slot in the pass, each trying both markers
        assert_eq!(searched(images::BONUS_MARKERS[1]), 4);
        assert!(miner.input.clicks().contains(&ScreenPoint::new(200, 500)));
    }
}
