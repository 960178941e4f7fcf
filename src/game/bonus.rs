//! Tracking of the recurring bonus reward

use std::time::Duration;

/// When the bonus was last searched for and last seen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BonusTracker {
    last_seen: Duration,
    last_search: Duration,
    last_warning: Option<Duration>,
}

impl BonusTracker {
    pub fn new(now: Duration) -> Self {
        Self {
            last_seen: now,
            last_search: now,
            last_warning: None,
        }
    }

    pub fn last_seen(&self) -> Duration {
        self.last_seen
    }

    /// Record a search at `now`, returning the gap since the previous one
    pub fn record_search(&mut self, now: Duration) -> Duration {
        let gap = now.saturating_sub(self.last_search);
        self.last_search = now;
        gap
    }

    pub fn record_sighting(&mut self, now: Duration) {
        self.last_seen = now;
        self.last_warning = None;
    }

    /// Minutes without a sighting, if a warning is due at `now`
    ///
    /// The first warning fires once `threshold` has passed since the last
    /// sighting; later ones only after another full `threshold`.
    pub fn stale_warning(&mut self, now: Duration, threshold: Duration) -> Option<u64> {
        let since = now.saturating_sub(self.last_seen);
        if since <= threshold {
            return None;
        }
        if let Some(warned) = self.last_warning {
            if now.saturating_sub(warned) < threshold {
                return None;
            }
        }
        self.last_warning = Some(now);
        Some(since.as_secs() / 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const THIRTY_MIN: Duration = Duration::from_secs(30 * 60);

    fn minutes(m: u64) -> Duration {
        Duration::from_secs(m * 60)
    }

    #[test]
    fn test_no_warning_before_threshold() {
        let mut tracker = BonusTracker::new(Duration::ZERO);
        assert_eq!(tracker.stale_warning(minutes(30), THIRTY_MIN), None);
    }

    #[test]
    fn test_warns_once_when_crossed() {
        let mut tracker = BonusTracker::new(Duration::ZERO);

        assert_eq!(tracker.stale_warning(minutes(31), THIRTY_MIN), Some(31));
        assert_eq!(tracker.stale_warning(minutes(31) + Duration::from_secs(5), THIRTY_MIN), None);
        assert_eq!(tracker.stale_warning(minutes(45), THIRTY_MIN), None);
        assert_eq!(tracker.stale_warning(minutes(61), THIRTY_MIN), Some(61));
    }

    #[test]
    fn test_sighting_rearms_warning() {
        let mut tracker = BonusTracker::new(Duration::ZERO);
        assert!(tracker.stale_warning(minutes(31), THIRTY_MIN).is_some());

        tracker.record_sighting(minutes(32));
        assert_eq!(tracker.stale_warning(minutes(50), THIRTY_MIN), None);
        assert_eq!(tracker.stale_warning(minutes(63), THIRTY_MIN), Some(31));
    }

    #[test]
    fn test_search_gap() {
        let mut tracker = BonusTracker::new(Duration::ZERO);
        assert_eq!(tracker.record_search(Duration::from_secs(7)), Duration::from_secs(7));
        assert_eq!(tracker.record_search(Duration::from_secs(9)), Duration::from_secs(2));
    }
}
