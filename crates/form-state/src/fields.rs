//! Live form abstraction the store reads from and restores into

use shared_types::FormSnapshot;

/// A form currently present in the page
pub trait FormFields {
    /// Names of the fields the form renders, in document order
    fn field_names(&self) -> Vec<String>;

    fn has_field(&self, name: &str) -> bool {
        self.field_names().iter().any(|n| n == name)
    }

    /// Set a field's value; `false` when no field has that name
    fn set_field(&mut self, name: &str, value: &str) -> bool;

    /// Current values of the submittable fields
    fn snapshot(&self) -> FormSnapshot;
}

/// Form held in memory, in document order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryForm {
    fields: Vec<(String, String)>,
}

impl MemoryForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

impl FormFields for MemoryForm {
    fn field_names(&self) -> Vec<String> {
        self.fields.iter().map(|(n, _)| n.clone()).collect()
    }

    fn set_field(&mut self, name: &str, value: &str) -> bool {
        match self.fields.iter_mut().find(|(n, _)| n == name) {
            Some((_, current)) => {
                *current = value.to_string();
                true
            }
            None => false,
        }
    }

    fn snapshot(&self) -> FormSnapshot {
        self.fields.iter().cloned().collect()
    }
}
