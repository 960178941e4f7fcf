//! Run state
//!
//! Everything the automation has learned about the mine during this run.
//! None of it is persisted; a new run re-derives it from the screen.

use std::time::Duration;

use super::area::{Area, GameVariant, MaxedFlags};
use super::bonus::BonusTracker;
use super::manager::Managers;

/// Overall mine state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MineState {
    /// Which kind of mine we're in
    pub variant: GameVariant,
    /// The area the mine overview last pointed at, after maxed fallbacks
    pub area_needing_level: Area,
    /// Areas known to be at their upgrade ceiling
    pub maxed: MaxedFlags,
    /// Per-area manager boost tracking
    pub managers: Managers,
    /// Bonus reward tracking
    pub bonus: BonusTracker,
    /// When an upgrade was last confirmed
    pub last_upgrade: Option<Duration>,
}

impl MineState {
    /// Fresh state for a run starting at `now`
    pub fn new(now: Duration) -> Self {
        Self {
            variant: GameVariant::Regular,
            area_needing_level: Area::PrimaryShaft,
            maxed: MaxedFlags::default(),
            managers: Managers::new(now),
            bonus: BonusTracker::new(now),
            last_upgrade: None,
        }
    }

    /// Update the leveling target from the area the overview points at
    ///
    /// Returns `true` if the target changed.
    pub fn point_leveling_at(&mut self, wanted: Area) -> bool {
        let target = self.maxed.leveling_target(wanted);
        let changed = target != self.area_needing_level;
        self.area_needing_level = target;
        changed
    }
}
