//! Pixel colour classification
//!
//! A [`ColorSpec`] accepts a sampled pixel when every channel lies inside a
//! closed band around the reference colour.

use image::Rgb;

/// Reference colour with a per-channel tolerance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorSpec {
    pub reference: [u8; 3],
    pub tolerance: [u8; 3],
}

impl ColorSpec {
    pub const fn new(reference: [u8; 3], tolerance: [u8; 3]) -> Self {
        Self {
            reference,
            tolerance,
        }
    }

    /// A spec that only accepts the reference colour itself
    pub const fn exact(reference: [u8; 3]) -> Self {
        Self::new(reference, [0, 0, 0])
    }

    /// Check whether `pixel` lies within `reference ± tolerance` on every channel
    pub fn matches(&self, pixel: Rgb<u8>) -> bool {
        (0..3).all(|i| {
            let diff = (i16::from(pixel[i]) - i16::from(self.reference[i])).abs();
            diff <= i16::from(self.tolerance[i])
        })
    }

    /// Check a pixel against several specs
    pub fn any_matches(specs: &[ColorSpec], pixel: Rgb<u8>) -> bool {
        specs.iter().any(|spec| spec.matches(pixel))
    }
}

/// Colours the game uses for state that templates can't distinguish
pub mod palette {
    use super::ColorSpec;

    /// Boost icon below an assign button when the manager is ready
    pub const CYCLE_ORANGE: ColorSpec = ColorSpec::new([177, 113, 5], [10, 10, 6]);
    /// Brighter boost icon, shown when the manager is assigned elsewhere in this mine
    pub const CYCLE_ORANGE_DARK: ColorSpec = ColorSpec::new([252, 210, 64], [10, 10, 10]);
    /// The two halves of the level-up arrow when an upgrade is affordable
    pub const UPGRADE_ARROW_LEFT: ColorSpec = ColorSpec::new([255, 230, 123], [5, 10, 10]);
    pub const UPGRADE_ARROW_RIGHT: ColorSpec = ColorSpec::new([255, 208, 2], [0, 10, 10]);
    /// Face of the "new shaft" button
    pub const NEW_SHAFT_BLUE: ColorSpec = ColorSpec::new([87, 170, 227], [5, 5, 5]);

    // Mine overview boost bars
    pub const BOOST_ACTIVE: ColorSpec = ColorSpec::exact([255, 243, 115]);
    pub const BOOST_RECOVERING: ColorSpec = ColorSpec::exact([183, 183, 183]);
    pub const BOOST_READY_BACKGROUND: ColorSpec = ColorSpec::exact([11, 92, 147]);

    pub const MANAGER_READY: [ColorSpec; 2] = [CYCLE_ORANGE, CYCLE_ORANGE_DARK];
    pub const UPGRADE_ARROW: [ColorSpec; 2] = [UPGRADE_ARROW_LEFT, UPGRADE_ARROW_RIGHT];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_is_closed() {
        let spec = ColorSpec::new([100, 100, 100], [5, 0, 10]);

        assert!(spec.matches(Rgb([105, 100, 90])));
        assert!(spec.matches(Rgb([95, 100, 110])));
        assert!(!spec.matches(Rgb([106, 100, 100])));
        assert!(!spec.matches(Rgb([100, 101, 100])));
        assert!(!spec.matches(Rgb([100, 100, 111])));
    }

    #[test]
    fn test_band_near_channel_limits() {
        let spec = palette::UPGRADE_ARROW_RIGHT;
        assert!(spec.matches(Rgb([255, 198, 0])));
        assert!(spec.matches(Rgb([255, 218, 12])));
        assert!(!spec.matches(Rgb([254, 208, 2])));
    }

    #[test]
    fn test_exact_spec() {
        let spec = palette::BOOST_ACTIVE;
        assert!(spec.matches(Rgb([255, 243, 115])));
        assert!(!spec.matches(Rgb([255, 243, 116])));
    }

    #[test]
    fn test_any_matches() {
        assert!(ColorSpec::any_matches(&palette::MANAGER_READY, Rgb([180, 110, 1])));
        assert!(ColorSpec::any_matches(&palette::MANAGER_READY, Rgb([255, 210, 64])));
        assert!(!ColorSpec::any_matches(&palette::MANAGER_READY, Rgb([0, 0, 0])));
    }
}
