use serde::{Deserialize, Serialize};

use crate::form_id::AnonymousFormPolicy;

/// Draft persistence settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormStoreConfig {
    /// Prepended to the form id to build the storage key
    pub key_prefix: String,
    /// How forms without an `id` attribute are identified
    pub anonymous_policy: AnonymousFormPolicy,
    /// Drop the saved draft once the form is submitted
    pub clear_on_submit: bool,
}

impl Default for FormStoreConfig {
    fn default() -> Self {
        Self {
            key_prefix: "form_".to_string(),
            anonymous_policy: AnonymousFormPolicy::default(),
            clear_on_submit: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json() {
        let config: FormStoreConfig =
            serde_json::from_str(r#"{"anonymous_policy": "structural"}"#).unwrap();
        assert_eq!(config.key_prefix, "form_");
        assert_eq!(config.anonymous_policy, AnonymousFormPolicy::Structural);
        assert!(!config.clear_on_submit);
    }
}
