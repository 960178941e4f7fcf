//! Per-area manager boost tracking

use std::time::Duration;

use super::area::Area;
use super::roster;

/// How long to leave an area alone when nothing in it could be assigned
pub const NO_MANAGER_BACKOFF: Duration = Duration::from_secs(2 * 60);

/// What the automation believes about one area's assigned manager
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManagerState {
    /// Whether the assigned manager's name was recognized
    pub identity_known: bool,
    /// Whether its boost is believed to be running
    pub boosted: bool,
    /// Earliest time the manager may be swapped out
    pub next_eligible_change: Duration,
}

impl ManagerState {
    /// Assume an unknown manager with a running boost, due immediately
    ///
    /// Until the overview shows otherwise, the boost is treated as active so
    /// a freshly started run doesn't replace a manager mid-boost.
    pub fn new(now: Duration) -> Self {
        Self {
            identity_known: false,
            boosted: true,
            next_eligible_change: now,
        }
    }

    pub fn is_due(&self, now: Duration) -> bool {
        now >= self.next_eligible_change
    }

    /// A boost of unknown remaining length blocks cycling
    pub fn unknown_but_boosted(&self) -> bool {
        !self.identity_known && self.boosted
    }

    /// Forget the previous manager once a new one has been assigned
    pub fn begin_assignment(&mut self) {
        self.identity_known = false;
        self.boosted = false;
    }

    /// Record the roster lookup for the newly assigned manager
    ///
    /// Returns how long its boost is expected to last.
    pub fn identify(&mut self, name: &str) -> Duration {
        let (duration, known) = roster::boost_duration(name);
        self.identity_known = known;
        duration
    }

    /// Record a boost started at `now` lasting `duration`
    pub fn boost_started(&mut self, now: Duration, duration: Duration) {
        self.boosted = true;
        self.next_eligible_change = now + duration;
    }

    /// Nothing assignable was found; retry after a short pause
    pub fn back_off(&mut self, now: Duration) {
        self.next_eligible_change = now + NO_MANAGER_BACKOFF;
    }
}

/// Manager state for every area
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Managers {
    states: [ManagerState; 3],
}

impl Managers {
    pub fn new(now: Duration) -> Self {
        Self {
            states: [ManagerState::new(now); 3],
        }
    }

    pub fn get(&self, area: Area) -> &ManagerState {
        &self.states[area.index()]
    }

    pub fn get_mut(&mut self, area: Area) -> &mut ManagerState {
        &mut self.states[area.index()]
    }
}
