//! "Expiring soon" board: selection of near-expiry contracts and its markup

use std::fmt::Write;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared_types::{ContractRow, ExpiryAlert, Urgency, UrgencyBucket};

use crate::classifier::UrgencyClassifier;
use crate::config::Labels;
use crate::error::Result;
use crate::patterns::ActiveStatusMatcher;

/// Result of one board pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "alerts", rename_all = "snake_case")]
pub enum Board {
    /// At least one alert, in source row order
    Alerts(Vec<ExpiryAlert>),
    /// Computed, nothing urgent
    NothingPending,
}

impl Board {
    pub fn from_alerts(alerts: Vec<ExpiryAlert>) -> Self {
        if alerts.is_empty() {
            Board::NothingPending
        } else {
            Board::Alerts(alerts)
        }
    }

    pub fn alerts(&self) -> &[ExpiryAlert] {
        match self {
            Board::Alerts(alerts) => alerts,
            Board::NothingPending => &[],
        }
    }

    pub fn is_nothing_pending(&self) -> bool {
        matches!(self, Board::NothingPending)
    }

    pub fn count(&self, bucket: UrgencyBucket) -> usize {
        self.alerts().iter().filter(|a| a.bucket == bucket).count()
    }

    /// Full replacement markup for the board container
    pub fn to_html(&self, labels: &Labels) -> String {
        match self {
            Board::Alerts(alerts) => {
                let mut html = String::new();
                for alert in alerts {
                    render_alert(&mut html, alert, labels);
                }
                html
            }
            Board::NothingPending => render_placeholder(labels),
        }
    }
}

/// Selects active contracts in the critical or warning buckets
pub struct BoardBuilder<'a> {
    classifier: &'a UrgencyClassifier,
    active: &'a ActiveStatusMatcher,
}

impl<'a> BoardBuilder<'a> {
    pub fn new(classifier: &'a UrgencyClassifier, active: &'a ActiveStatusMatcher) -> Self {
        Self { classifier, active }
    }

    /// Alert for a single row, if it belongs on the board
    pub fn alert_for(&self, row: &ContractRow, reference: NaiveDate) -> Option<ExpiryAlert> {
        // Status gate comes before any day arithmetic
        if !self.active.is_active(&row.status) {
            return None;
        }

        let end_date = row
            .end_date
            .as_deref()
            .and_then(crate::calendar::LeaseCalendar::parse_end_date);
        let Some(end_date) = end_date else {
            tracing::debug!(contract_id = %row.id, "skipping contract with indeterminate end date");
            return None;
        };

        match self.classifier.classify_date(reference, end_date) {
            Urgency::Determinate {
                days_remaining,
                bucket,
            } if bucket.is_alerting() => Some(ExpiryAlert {
                contract_id: row.id.clone(),
                address: row.address.clone(),
                tenant_name: row.tenant_name.clone(),
                end_date,
                days_remaining,
                bucket,
            }),
            _ => None,
        }
    }

    pub fn build(&self, rows: &[ContractRow], reference: NaiveDate) -> Board {
        let alerts: Vec<ExpiryAlert> = rows
            .iter()
            .filter_map(|row| self.alert_for(row, reference))
            .collect();

        tracing::debug!(
            rows = rows.len(),
            alerts = alerts.len(),
            %reference,
            "expiry board built"
        );

        Board::from_alerts(alerts)
    }
}

/// Holds the most recent board. `None` until the first build.
#[derive(Debug, Clone, Default)]
pub struct ExpiryBoard {
    board: Option<Board>,
}

impl ExpiryBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute from a fresh row snapshot, replacing the previous board
    pub fn rebuild(
        &mut self,
        builder: &BoardBuilder<'_>,
        rows: &[ContractRow],
        reference: NaiveDate,
    ) -> &Board {
        self.board.insert(builder.build(rows, reference))
    }

    pub fn board(&self) -> Option<&Board> {
        self.board.as_ref()
    }

    pub fn is_computed(&self) -> bool {
        self.board.is_some()
    }

    pub fn critical_count(&self) -> usize {
        self.board
            .as_ref()
            .map_or(0, |b| b.count(UrgencyBucket::Critical))
    }

    pub fn warning_count(&self) -> usize {
        self.board
            .as_ref()
            .map_or(0, |b| b.count(UrgencyBucket::Warning))
    }

    /// Alerts as JSON; `null` when not yet computed
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.board)?)
    }

    pub fn clear(&mut self) {
        self.board = None;
    }
}

fn render_alert(html: &mut String, alert: &ExpiryAlert, labels: &Labels) {
    let _ = write!(
        html,
        concat!(
            "<div class=\"col-md-6 mb-3\">\n",
            "  <div class=\"alert alert-{color} d-flex align-items-center\" data-contract-id=\"{id}\">\n",
            "    <i class=\"bi bi-exclamation-triangle me-2\"></i>\n",
            "    <div>\n",
            "      <strong>{prefix} #{id}</strong><br>\n",
            "      <small>{address} - {tenant}</small><br>\n",
            "      <small>{due_in} {days} ({end_date})</small>\n",
            "    </div>\n",
            "  </div>\n",
            "</div>\n",
        ),
        color = alert.bucket.color(),
        id = escape_html(&alert.contract_id),
        prefix = escape_html(&labels.contract_prefix),
        address = escape_html(&alert.address),
        tenant = escape_html(&alert.tenant_name),
        due_in = escape_html(&labels.due_in),
        days = escape_html(&labels.days(alert.days_remaining)),
        end_date = alert.end_date.format("%Y-%m-%d"),
    );
}

fn render_placeholder(labels: &Labels) -> String {
    format!(
        concat!(
            "<div class=\"col-12\" data-board=\"nothing-pending\">\n",
            "  <div class=\"text-center text-muted py-3\">\n",
            "    <i class=\"bi bi-check-circle display-4\"></i>\n",
            "    <p class=\"mt-2\">{message}</p>\n",
            "  </div>\n",
            "</div>\n",
        ),
        message = escape_html(&labels.nothing_pending),
    )
}

/// Escape text for HTML element content and quoted attributes
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
