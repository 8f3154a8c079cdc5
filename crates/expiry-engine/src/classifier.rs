//! Urgency classification of contract end dates

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared_types::{Urgency, UrgencyBucket};

use crate::calendar::LeaseCalendar;
use crate::config::{Labels, UrgencyThresholds};

/// Rendered state of a days-remaining badge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeState {
    pub class_name: String,
    /// `None` leaves the server-rendered text in place
    pub label: Option<String>,
}

/// Maps end dates to urgency buckets
#[derive(Debug, Clone, Default)]
pub struct UrgencyClassifier {
    thresholds: UrgencyThresholds,
}

impl UrgencyClassifier {
    pub fn new(thresholds: UrgencyThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> UrgencyThresholds {
        self.thresholds
    }

    /// Bucket for a whole number of remaining days.
    ///
    /// Threshold values fall into the stricter bucket.
    pub fn bucket_for_days(&self, days_remaining: i64) -> UrgencyBucket {
        if days_remaining <= 0 {
            UrgencyBucket::Expired
        } else if days_remaining <= self.thresholds.critical_days {
            UrgencyBucket::Critical
        } else if days_remaining <= self.thresholds.warning_days {
            UrgencyBucket::Warning
        } else {
            UrgencyBucket::Healthy
        }
    }

    /// Classify a parsed end date against the reference date
    pub fn classify_date(&self, reference: NaiveDate, end_date: NaiveDate) -> Urgency {
        let days_remaining = LeaseCalendar::days_between(reference, end_date);
        Urgency::Determinate {
            days_remaining,
            bucket: self.bucket_for_days(days_remaining),
        }
    }

    /// Classify a raw end-date attribute. Missing or unparsable text is indeterminate.
    pub fn classify(&self, reference: NaiveDate, end_date: Option<&str>) -> Urgency {
        match end_date.and_then(LeaseCalendar::parse_end_date) {
            Some(end) => self.classify_date(reference, end),
            None => Urgency::Indeterminate,
        }
    }

    /// Badge class and label for a classification result
    pub fn badge(&self, urgency: &Urgency, labels: &Labels) -> BadgeState {
        match urgency {
            Urgency::Determinate {
                days_remaining,
                bucket,
            } => {
                let label = match bucket {
                    UrgencyBucket::Expired => labels.expired.clone(),
                    _ => labels.days(*days_remaining),
                };
                BadgeState {
                    class_name: format!("badge urgency-{} bg-{}", bucket.name(), bucket.color()),
                    label: Some(label),
                }
            }
            Urgency::Indeterminate => BadgeState {
                class_name: "badge urgency-unknown bg-light text-dark".to_string(),
                label: None,
            },
        }
    }
}
