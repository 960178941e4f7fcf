//! Known super managers and their boost lengths
//!
//! Names are stored in normalized form (see
//! [`normalize_text`](crate::vision::normalize_text)) so they compare
//! directly against OCR output.

use std::time::Duration;

/// Boost length assumed when the assigned manager's name isn't recognized
pub const MIN_BOOST: Duration = Duration::from_secs(30);

/// (normalized name, boost length in minutes)
pub const ROSTER: &[(&str, f64)] = &[
    // Mineshaft
    ("pebble", 2.0),
    ("mrturner", 0.5),
    ("rangersue", 1.0),
    ("zigalvani", 1.0),
    ("blingsley", 1.0),
    ("chester", 5.0),
    ("goodmanjr", 5.0),
    ("gordon", 5.0),
    ("greenidler", 1.0),
    ("cliffwalker", 0.5),
    ("drsteiner", 5.0),
    ("rabbidblingsley", 2.5),
    ("sirlorenzo", 1.0),
    // Elevator
    ("queenaurora", 2.5),
    ("drlilly", 5.0),
    ("damianjones", 5.0),
    ("sojo", 5.0),
    ("mrsgoodman", 5.0),
    ("leevatori", 5.0),
    ("ezioauditore", 1.0),
    ("zephyria", 2.5),
    // Warehouse
    ("professormaple", 1.0),
    ("drnova", 5.0),
    ("luxario", 1.0),
    ("mark", 5.0),
    ("mrgoodman", 5.0),
    ("octaviadevere", 2.5),
    ("chriscapella", 5.0),
    ("jadekim", 5.0),
];

/// Boost length in minutes for an exact roster name
pub fn lookup(name: &str) -> Option<f64> {
    ROSTER
        .iter()
        .find(|(known, _)| *known == name)
        .map(|&(_, minutes)| minutes)
}

/// Expected boost length for `name`, and whether the name was recognized
pub fn boost_duration(name: &str) -> (Duration, bool) {
    match lookup(name) {
        Some(minutes) => (Duration::from_secs_f64(minutes * 60.0), true),
        None => (MIN_BOOST, false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vision::normalize_text;

    #[test]
    fn test_lookup_exact_names() {
        assert_eq!(lookup("chester"), Some(5.0));
        assert_eq!(lookup("mrturner"), Some(0.5));
        assert_eq!(lookup("Chester"), None);
        assert_eq!(lookup("chest"), None);
    }

    #[test]
    fn test_durations_are_minutes() {
        assert_eq!(boost_duration("queenaurora"), (Duration::from_secs(150), true));
        assert_eq!(boost_duration("cliffwalker"), (Duration::from_secs(30), true));
        assert_eq!(boost_duration("???"), (MIN_BOOST, false));
    }

    #[test]
    fn test_roster_names_are_normalized() {
        for (name, _) in ROSTER {
            assert_eq!(normalize_text(name), *name);
        }
    }

    #[test]
    fn test_ocr_output_matches_after_normalizing() {
        assert_eq!(lookup(&normalize_text("Dr. Steiner")), Some(5.0));
        assert_eq!(lookup(&normalize_text("Octavia De Vere")), Some(2.5));
    }
}
