//! Collecting the recurring bonus reward

use std::time::Duration;

use super::layout::{self, images};
use crate::android::Input;
use crate::clock::Clock;
use crate::vision::Vision;
use crate::{Miner, MinerError};

const CLAIM_TIMEOUT: Duration = Duration::from_secs(5);
const CLAIM_POLL: Duration = Duration::from_millis(250);
const CLAIM_SETTLE: Duration = Duration::from_secs(5);
/// Searches further apart than this mean a pass is running slow
const SEARCH_GAP_NOTICE: Duration = Duration::from_secs(5);

impl<V: Vision, I: Input, C: Clock> Miner<V, I, C> {
    /// Click the bonus marker if it is showing and claim the free reward
    ///
    /// Returns `true` if a marker was clicked.
    pub fn collect_bonus(&mut self) -> Result<bool, MinerError> {
        log::debug!("Searching for bonus");
        let now = self.now();
        let gap = self.state.bonus.record_search(now);
        if gap > SEARCH_GAP_NOTICE {
            log::debug!("Took {}s between bonus searches", gap.as_secs());
        }

        let region = self.ctx.to_absolute_region(layout::BONUS_AREA);
        let mut seen = false;
        for marker in images::BONUS_MARKERS {
            seen |= self.click_image_in(marker, region)?.is_some();
        }

        if seen {
            self.state.bonus.record_sighting(now);
            let deadline = now + CLAIM_TIMEOUT;
            while self.now() < deadline {
                if self.click_image(images::FREE)?.is_some() {
                    log::info!("Collected bonus");
                    self.pause(CLAIM_SETTLE);
                    break;
                }
                self.pause(CLAIM_POLL);
            }
        }

        let threshold = Duration::from_secs(self.settings.automation.bonus_stale_minutes * 60);
        let now = self.now();
        if let Some(minutes) = self.state.bonus.stale_warning(now, threshold) {
            log::warn!("Haven't seen the bonus in {} minutes", minutes);
        }
        Ok(seen)
    }
}
