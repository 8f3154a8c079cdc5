//! Engine configuration
//!
//! Hosts pass a JSON object; every section is optional and falls back to
//! the defaults used by the rental dashboard.

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::error::{ExpiryError, Result};

/// Top-level engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Day counts separating the urgency buckets
    pub thresholds: UrgencyThresholds,
    /// Whole words marking a contract status as active
    pub active_markers: Vec<String>,
    /// Display strings for badges and the expiry board
    pub labels: Labels,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            thresholds: UrgencyThresholds::default(),
            active_markers: vec!["activo".to_string()],
            labels: Labels::default(),
        }
    }
}

impl EngineConfig {
    /// Parse and validate configuration from a JSON string
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the thresholds are out of order
    pub fn from_json(s: &str) -> anyhow::Result<Self> {
        let config: EngineConfig =
            serde_json::from_str(s).context("Failed to parse engine config JSON")?;
        config.validate().context("Invalid engine config")?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.thresholds.validate()?;
        if self.active_markers.iter().all(|m| m.trim().is_empty()) {
            return Err(ExpiryError::NoActiveMarkers);
        }
        Ok(())
    }
}

/// Upper bounds (inclusive) of the critical and warning buckets, in days
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UrgencyThresholds {
    pub critical_days: i64,
    pub warning_days: i64,
}

impl Default for UrgencyThresholds {
    fn default() -> Self {
        Self {
            critical_days: 7,
            warning_days: 30,
        }
    }
}

impl UrgencyThresholds {
    pub fn new(critical_days: i64, warning_days: i64) -> Result<Self> {
        let thresholds = Self {
            critical_days,
            warning_days,
        };
        thresholds.validate()?;
        Ok(thresholds)
    }

    pub fn validate(&self) -> Result<()> {
        if self.critical_days <= 0 || self.critical_days >= self.warning_days {
            return Err(ExpiryError::InvalidThresholds {
                critical: self.critical_days,
                warning: self.warning_days,
            });
        }
        Ok(())
    }
}

/// User-facing strings (Spanish by default)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Labels {
    pub days_suffix: String,
    pub expired: String,
    pub contract_prefix: String,
    pub due_in: String,
    pub nothing_pending: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            days_suffix: "días".to_string(),
            expired: "Vencido".to_string(),
            contract_prefix: "Contrato".to_string(),
            due_in: "Vence en".to_string(),
            nothing_pending: "No hay contratos próximos a vencer".to_string(),
        }
    }
}

impl Labels {
    /// "7 días"
    pub fn days(&self, days: i64) -> String {
        format!("{} {}", days, self.days_suffix)
    }
}
