//! Status label keywords and matching

use lazy_static::lazy_static;
use regex::Regex;
use shared_types::StatusTone;

use crate::error::{ExpiryError, Result};

/// Statuses shown in red. Checked first: "inactivo" must never read as "activo".
pub const DANGER_KEYWORDS: &[&str] = &["inactivo", "cancelado"];

/// Statuses shown in green
pub const SUCCESS_KEYWORDS: &[&str] = &["disponible", "activo"];

/// Statuses shown in amber
pub const WARNING_KEYWORDS: &[&str] = &["alquilada", "pendiente"];

lazy_static! {
    static ref DANGER_PATTERN: Regex = whole_word_pattern(DANGER_KEYWORDS).unwrap();
    static ref SUCCESS_PATTERN: Regex = whole_word_pattern(SUCCESS_KEYWORDS).unwrap();
    static ref WARNING_PATTERN: Regex = whole_word_pattern(WARNING_KEYWORDS).unwrap();
}

/// Case-insensitive alternation of whole words.
///
/// Boundaries are "start, end or a non-word character" rather than `\b`, so
/// markers that begin or end with punctuation still match.
fn whole_word_pattern<S: AsRef<str>>(words: &[S]) -> std::result::Result<Regex, regex::Error> {
    let alternation = words
        .iter()
        .map(|w| w.as_ref().trim())
        .filter(|w| !w.is_empty())
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)(?:^|\W)(?:{})(?:\W|$)", alternation))
}

/// Badge tone for a status label
pub fn status_tone(status: &str) -> StatusTone {
    if DANGER_PATTERN.is_match(status) {
        StatusTone::Danger
    } else if SUCCESS_PATTERN.is_match(status) {
        StatusTone::Success
    } else if WARNING_PATTERN.is_match(status) {
        StatusTone::Warning
    } else {
        StatusTone::Neutral
    }
}

/// CSS class for a status badge
pub fn status_badge_class(tone: StatusTone) -> String {
    format!("badge status-badge bg-{}", tone.color())
}

/// Decides whether a contract status counts as active
#[derive(Debug, Clone)]
pub struct ActiveStatusMatcher {
    pattern: Regex,
}

impl ActiveStatusMatcher {
    pub fn new<S: AsRef<str>>(markers: &[S]) -> Result<Self> {
        if markers.iter().all(|m| m.as_ref().trim().is_empty()) {
            return Err(ExpiryError::NoActiveMarkers);
        }
        Ok(Self {
            pattern: whole_word_pattern(markers)?,
        })
    }

    pub fn is_active(&self, status: &str) -> bool {
        self.pattern.is_match(status)
    }
}

impl Default for ActiveStatusMatcher {
    fn default() -> Self {
        Self {
            pattern: whole_word_pattern(&["activo"]).unwrap(),
        }
    }
}
