use chrono::NaiveDate;

/// One contract row as read from the rendered table
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ContractRow {
    pub id: String,
    pub end_date: Option<String>, // Raw attribute text, unparsed
    pub status: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub tenant_name: String,
}

impl ContractRow {
    pub fn new(id: impl Into<String>, end_date: Option<&str>, status: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            end_date: end_date.map(str::to_string),
            status: status.into(),
            address: String::new(),
            tenant_name: String::new(),
        }
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    pub fn with_tenant(mut self, tenant_name: impl Into<String>) -> Self {
        self.tenant_name = tenant_name.into();
        self
    }
}

/// Urgency of a contract end date, ordered from most to least urgent
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum UrgencyBucket {
    Expired,
    Critical,
    Warning,
    Healthy,
}

impl UrgencyBucket {
    pub const ALL: [UrgencyBucket; 4] = [
        UrgencyBucket::Expired,
        UrgencyBucket::Critical,
        UrgencyBucket::Warning,
        UrgencyBucket::Healthy,
    ];

    /// Lowercase name used in CSS classes (`urgency-critical`)
    pub fn name(&self) -> &'static str {
        match self {
            UrgencyBucket::Expired => "expired",
            UrgencyBucket::Critical => "critical",
            UrgencyBucket::Warning => "warning",
            UrgencyBucket::Healthy => "healthy",
        }
    }

    /// Bootstrap contextual color for badges and alerts
    pub fn color(&self) -> &'static str {
        match self {
            UrgencyBucket::Expired => "secondary",
            UrgencyBucket::Critical => "danger",
            UrgencyBucket::Warning => "warning",
            UrgencyBucket::Healthy => "success",
        }
    }

    /// Whether contracts in this bucket belong on the expiry board
    pub fn is_alerting(&self) -> bool {
        matches!(self, UrgencyBucket::Critical | UrgencyBucket::Warning)
    }
}

/// Classifier result. `Indeterminate` has no bucket on purpose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Urgency {
    Determinate {
        days_remaining: i64,
        bucket: UrgencyBucket,
    },
    Indeterminate,
}

impl Urgency {
    pub fn bucket(&self) -> Option<UrgencyBucket> {
        match self {
            Urgency::Determinate { bucket, .. } => Some(*bucket),
            Urgency::Indeterminate => None,
        }
    }

    pub fn days_remaining(&self) -> Option<i64> {
        match self {
            Urgency::Determinate { days_remaining, .. } => Some(*days_remaining),
            Urgency::Indeterminate => None,
        }
    }

    pub fn is_indeterminate(&self) -> bool {
        matches!(self, Urgency::Indeterminate)
    }
}

/// A contract nearing expiry, built and discarded within one board pass
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ExpiryAlert {
    pub contract_id: String,
    pub address: String,
    pub tenant_name: String,
    pub end_date: NaiveDate,
    pub days_remaining: i64,
    pub bucket: UrgencyBucket,
}

/// Color family of a status badge
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum StatusTone {
    Success,
    Warning,
    Danger,
    Neutral,
}

impl StatusTone {
    pub fn color(&self) -> &'static str {
        match self {
            StatusTone::Success => "success",
            StatusTone::Warning => "warning",
            StatusTone::Danger => "danger",
            StatusTone::Neutral => "secondary",
        }
    }
}
