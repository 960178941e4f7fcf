//! Reference-image matching
//!
//! Reference images are PNG files in a per-resolution asset directory.
//! Matching runs normalized cross-correlation from `imageproc` on grayscale
//! crops of the current frame.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use image::{GrayImage, ImageBuffer, Luma};
use imageproc::template_matching::{match_template, MatchTemplateMethod};

use super::coords::ScreenRect;

/// A located reference image, in absolute screen coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Match {
    pub rect: ScreenRect,
    pub score: f32,
}

impl Match {
    /// Where a click on the matched control should land
    pub fn center(&self) -> super::ScreenPoint {
        self.rect.center()
    }

    /// Corner that relative offsets are measured from
    pub fn top_left(&self) -> super::ScreenPoint {
        self.rect.top_left()
    }
}

/// Lazily loaded reference images keyed by name
///
/// A missing or unreadable image is reported once and then remembered as
/// unavailable.
pub struct TemplateStore {
    dir: PathBuf,
    cache: HashMap<String, Option<GrayImage>>,
}

impl TemplateStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            cache: HashMap::new(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Register an image without touching the disk
    pub fn insert(&mut self, name: &str, image: GrayImage) {
        self.cache.insert(name.to_string(), Some(image));
    }

    /// Look up a reference image, loading it on first use
    pub fn get(&mut self, name: &str) -> Option<&GrayImage> {
        if !self.cache.contains_key(name) {
            let loaded = self.load(name);
            self.cache.insert(name.to_string(), loaded);
        }
        self.cache.get(name).and_then(Option::as_ref)
    }

    fn load(&self, name: &str) -> Option<GrayImage> {
        let path = self.dir.join(format!("{name}.png"));
        if !path.exists() {
            log::error!("{} does not exist", path.display());
            return None;
        }
        match image::open(&path) {
            Ok(img) => Some(img.to_luma8()),
            Err(e) => {
                log::error!("Failed to load {}: {}", path.display(), e);
                None
            }
        }
    }
}

/// Correlation score for every placement of `template` inside `haystack`
fn scores(haystack: &GrayImage, template: &GrayImage) -> Option<ImageBuffer<Luma<f32>, Vec<f32>>> {
    let (hw, hh) = haystack.dimensions();
    let (tw, th) = template.dimensions();
    if tw == 0 || th == 0 || tw > hw || th > hh {
        return None;
    }
    Some(match_template(
        haystack,
        template,
        MatchTemplateMethod::CrossCorrelationNormalized,
    ))
}

/// Best placement scoring at least `confidence`, as (x, y, score)
pub fn best_match(haystack: &GrayImage, template: &GrayImage, confidence: f32) -> Option<(u32, u32, f32)> {
    let result = scores(haystack, template)?;
    let mut best: Option<(u32, u32, f32)> = None;
    for (x, y, score) in result.enumerate_pixels() {
        let score = score[0];
        // Flat black windows have no correlation and come out as NaN
        if score.is_nan() || score < confidence {
            continue;
        }
        match best {
            Some((_, _, s)) if s >= score => {}
            _ => best = Some((x, y, score)),
        }
    }
    best
}

/// Every placement scoring at least `confidence`, strongest first
///
/// Placements that overlap an already accepted one by more than half the
/// template in both axes are dropped.
pub fn all_matches(haystack: &GrayImage, template: &GrayImage, confidence: f32) -> Vec<(u32, u32, f32)> {
    let Some(result) = scores(haystack, template) else {
        return Vec::new();
    };
    let (tw, th) = template.dimensions();

    let mut candidates: Vec<(u32, u32, f32)> = result
        .enumerate_pixels()
        .map(|(x, y, s)| (x, y, s[0]))
        .filter(|&(_, _, s)| !s.is_nan() && s >= confidence)
        .collect();
    candidates.sort_by(|a, b| b.2.total_cmp(&a.2));

    let mut accepted: Vec<(u32, u32, f32)> = Vec::new();
    for candidate in candidates {
        let overlaps = accepted.iter().any(|&(x, y, _)| {
            candidate.0.abs_diff(x) * 2 < tw && candidate.1.abs_diff(y) * 2 < th
        });
        if !overlaps {
            accepted.push(candidate);
        }
    }
    accepted
}
