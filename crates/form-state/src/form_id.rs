//! Storage identifiers for forms
//!
//! A form's own `id` attribute is always used when present. Forms without
//! one are identified according to [`AnonymousFormPolicy`]:
//!
//! - `PerLoad` draws a random token once per page load. Drafts of such
//!   forms are saved but never found again after a reload.
//! - `Structural` hashes the page path, the form's position and its field
//!   names, so the same form maps to the same key on every load.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use shared_types::FormId;
use uuid::Uuid;

/// Identification strategy for forms without an `id` attribute
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnonymousFormPolicy {
    #[default]
    PerLoad,
    Structural,
}

/// Resolves form identifiers for one page load
#[derive(Debug, Clone)]
pub struct FormIdResolver {
    policy: AnonymousFormPolicy,
    page_path: String,
    load_token: String,
}

impl FormIdResolver {
    /// Create a resolver; call once per page load
    pub fn new(policy: AnonymousFormPolicy, page_path: impl Into<String>) -> Self {
        Self {
            policy,
            page_path: page_path.into(),
            load_token: Uuid::new_v4().simple().to_string(),
        }
    }

    pub fn policy(&self) -> AnonymousFormPolicy {
        self.policy
    }

    /// Identifier for the form at `index` among the tracked forms of the page
    pub fn resolve(
        &self,
        explicit_id: Option<&str>,
        index: usize,
        field_names: &[String],
    ) -> FormId {
        if let Some(id) = explicit_id.map(str::trim).filter(|id| !id.is_empty()) {
            return FormId::Explicit(id.to_string());
        }

        match self.policy {
            AnonymousFormPolicy::PerLoad => {
                FormId::Generated(format!("{}-{}", &self.load_token[..9], index))
            }
            AnonymousFormPolicy::Structural => {
                FormId::Generated(structural_id(&self.page_path, index, field_names))
            }
        }
    }
}

/// Stable identifier from page path, position and sorted field names
fn structural_id(page_path: &str, index: usize, field_names: &[String]) -> String {
    let mut names: Vec<&str> = field_names.iter().map(String::as_str).collect();
    names.sort_unstable();
    names.dedup();

    let mut hasher = Sha256::new();
    hasher.update(page_path.as_bytes());
    hasher.update(b"\n");
    hasher.update(index.to_string().as_bytes());
    for name in names {
        hasher.update(b"\n");
        hasher.update(name.as_bytes());
    }

    let digest = hex::encode(hasher.finalize());
    format!("s-{}", &digest[..16])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_explicit_id_wins() {
        let resolver = FormIdResolver::new(AnonymousFormPolicy::Structural, "/contratos/nuevo");
        let id = resolver.resolve(Some("form-contrato"), 0, &names(&["precio"]));
        assert_eq!(id, FormId::Explicit("form-contrato".to_string()));
    }

    #[test]
    fn test_blank_id_is_anonymous() {
        let resolver = FormIdResolver::new(AnonymousFormPolicy::PerLoad, "/");
        assert!(!resolver.resolve(Some("  "), 0, &[]).is_explicit());
    }

    #[test]
    fn test_per_load_is_stable_within_a_load() {
        let resolver = FormIdResolver::new(AnonymousFormPolicy::PerLoad, "/inquilinos/nuevo");
        let fields = names(&["nombre", "dni"]);
        assert_eq!(resolver.resolve(None, 0, &fields), resolver.resolve(None, 0, &fields));
        assert_ne!(resolver.resolve(None, 0, &fields), resolver.resolve(None, 1, &fields));
    }

    #[test]
    fn test_per_load_changes_between_loads() {
        let fields = names(&["nombre", "dni"]);
        let first_load = FormIdResolver::new(AnonymousFormPolicy::PerLoad, "/inquilinos/nuevo");
        let second_load = FormIdResolver::new(AnonymousFormPolicy::PerLoad, "/inquilinos/nuevo");
        assert_ne!(
            first_load.resolve(None, 0, &fields),
            second_load.resolve(None, 0, &fields)
        );
    }

    #[test]
    fn test_structural_survives_reload() {
        let first_load = FormIdResolver::new(AnonymousFormPolicy::Structural, "/propiedades/nueva");
        let second_load =
            FormIdResolver::new(AnonymousFormPolicy::Structural, "/propiedades/nueva");
        let id = first_load.resolve(None, 0, &names(&["direccion", "tipo", "precio"]));

        // Field order does not matter
        assert_eq!(id, second_load.resolve(None, 0, &names(&["precio", "direccion", "tipo"])));
        assert!(id.as_str().starts_with("s-"));
        assert_eq!(id.as_str().len(), 18);
    }

    #[test]
    fn test_structural_distinguishes_pages_and_positions() {
        let fields = names(&["direccion"]);
        let a = FormIdResolver::new(AnonymousFormPolicy::Structural, "/propiedades/nueva");
        let b = FormIdResolver::new(AnonymousFormPolicy::Structural, "/propiedades/1/editar");
        assert_ne!(a.resolve(None, 0, &fields), b.resolve(None, 0, &fields));
        assert_ne!(a.resolve(None, 0, &fields), a.resolve(None, 1, &fields));
    }
}
