pub mod board;
pub mod calendar;
pub mod classifier;
pub mod config;
pub mod error;
pub mod patterns;
pub mod search;

pub use board::{Board, BoardBuilder, ExpiryBoard};
pub use calendar::LeaseCalendar;
pub use classifier::{BadgeState, UrgencyClassifier};
pub use config::{EngineConfig, Labels, UrgencyThresholds};
pub use error::{ExpiryError, Result};
pub use patterns::ActiveStatusMatcher;

use chrono::NaiveDate;
use shared_types::{ContractRow, StatusTone, Urgency};

/// ExpiryEngine entry point
pub struct ExpiryEngine {
    classifier: UrgencyClassifier,
    active: ActiveStatusMatcher,
    labels: Labels,
}

impl ExpiryEngine {
    pub fn new() -> Self {
        Self {
            classifier: UrgencyClassifier::default(),
            active: ActiveStatusMatcher::default(),
            labels: Labels::default(),
        }
    }

    pub fn with_config(config: &EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            classifier: UrgencyClassifier::new(config.thresholds),
            active: ActiveStatusMatcher::new(&config.active_markers)?,
            labels: config.labels.clone(),
        })
    }

    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    pub fn classify(&self, reference: NaiveDate, end_date: Option<&str>) -> Urgency {
        self.classifier.classify(reference, end_date)
    }

    /// Badge state for one row's end date
    pub fn badge_for(&self, reference: NaiveDate, end_date: Option<&str>) -> BadgeState {
        let urgency = self.classify(reference, end_date);
        self.classifier.badge(&urgency, &self.labels)
    }

    pub fn builder(&self) -> BoardBuilder<'_> {
        BoardBuilder::new(&self.classifier, &self.active)
    }

    /// Build the expiry board over a full row snapshot
    pub fn build_board(&self, rows: &[ContractRow], reference: NaiveDate) -> Board {
        self.builder().build(rows, reference)
    }

    /// Build and render in one step
    pub fn render_board(&self, rows: &[ContractRow], reference: NaiveDate) -> String {
        self.build_board(rows, reference).to_html(&self.labels)
    }

    pub fn is_active(&self, status: &str) -> bool {
        self.active.is_active(status)
    }

    pub fn status_tone(&self, status: &str) -> StatusTone {
        patterns::status_tone(status)
    }

    pub fn filter_rows<S: AsRef<str>>(&self, row_texts: &[S], term: &str) -> Vec<bool> {
        search::filter_rows(row_texts, term)
    }
}

impl Default for ExpiryEngine {
    fn default() -> Self {
        Self::new()
    }
}
