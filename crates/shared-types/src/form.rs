//! Form draft data shared between the store and the browser binding

use std::collections::BTreeMap;
use std::fmt;

/// Field name to value mapping captured from one form.
///
/// Serializes as a flat JSON object of strings, keys in sorted order.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct FormSnapshot {
    fields: BTreeMap<String, String>,
}

impl FormSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a field value. A repeated name keeps the last value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormSnapshot {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut snapshot = FormSnapshot::new();
        for (name, value) in iter {
            snapshot.insert(name, value);
        }
        snapshot
    }
}

/// Identifier a form draft is stored under
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum FormId {
    /// The form's own `id` attribute
    Explicit(String),
    /// Derived for forms without an `id`
    Generated(String),
}

impl FormId {
    pub fn as_str(&self) -> &str {
        match self {
            FormId::Explicit(id) | FormId::Generated(id) => id,
        }
    }

    pub fn is_explicit(&self) -> bool {
        matches!(self, FormId::Explicit(_))
    }
}

impl fmt::Display for FormId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_snapshot_serializes_as_flat_object() {
        let snapshot: FormSnapshot = [("precio", "1500.00"), ("direccion", "Calle 9")]
            .into_iter()
            .collect();
        let json = serde_json::to_string(&snapshot).unwrap();
        assert_eq!(json, r#"{"direccion":"Calle 9","precio":"1500.00"}"#);
    }

    #[test]
    fn test_last_value_wins() {
        let mut snapshot = FormSnapshot::new();
        snapshot.insert("estado", "activo");
        snapshot.insert("estado", "pendiente");
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.get("estado"), Some("pendiente"));
    }

    #[test]
    fn test_non_string_values_rejected() {
        let parsed: Result<FormSnapshot, _> = serde_json::from_str(r#"{"habitaciones": 3}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_form_id_display() {
        assert_eq!(FormId::Explicit("nuevo-contrato".into()).to_string(), "nuevo-contrato");
        assert!(!FormId::Generated("x1".into()).is_explicit());
    }
}
