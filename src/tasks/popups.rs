//! Clearing popups and stray buttons

use std::time::Duration;

use super::layout::images;
use super::verify::SHAFT_TIMEOUT;
use crate::android::Input;
use crate::clock::Clock;
use crate::vision::Vision;
use crate::{Miner, MinerError};

const CLOSE_ATTEMPTS: usize = 5;
const DISMISS_SETTLE: Duration = Duration::from_secs(2);
const CANCEL_TIMEOUT: Duration = Duration::from_secs(5);
/// The game takes a long time to load after a relaunch
const LAUNCH_WAIT: Duration = Duration::from_secs(30);

impl<V: Vision, I: Input, C: Clock> Miner<V, I, C> {
    /// Dismiss dialogs until the shaft view is back
    ///
    /// Returns `false` if the shaft view never came back.
    pub fn close_popups(&mut self) -> Result<bool, MinerError> {
        for _ in 0..CLOSE_ATTEMPTS {
            if self.verify_in_shaft(SHAFT_TIMEOUT)? {
                return Ok(true);
            }
            for button in images::POPUP_DISMISS {
                if self.click_image(button)?.is_some() {
                    self.pause(DISMISS_SETTLE);
                }
            }
            self.back()?;
            self.pause(DISMISS_SETTLE);
            // Backing out of the game asks for confirmation
            if let Some(cancel) = self.wait_for(images::CANCEL, CANCEL_TIMEOUT)? {
                self.click_at(cancel.center())?;
            }
        }
        Ok(false)
    }

    /// Click each transient button once if it is showing
    ///
    /// Returns how many were clicked.
    pub fn click_transient_buttons(&mut self) -> Result<usize, MinerError> {
        let mut clicked = 0;
        for button in images::TRANSIENT {
            if self.click_image(button)?.is_some() {
                clicked += 1;
            }
        }
        Ok(clicked)
    }

    /// Restart the game from the launcher if it has closed
    pub fn relaunch_if_needed(&mut self) -> Result<bool, MinerError> {
        if self.click_image(images::LAUNCHER_ICON)?.is_none() {
            return Ok(false);
        }
        log::info!("Game closed, relaunching");
        self.pause(LAUNCH_WAIT);
        self.close_popups()?;
        self.discover_variant()?;
        Ok(true)
    }
}
