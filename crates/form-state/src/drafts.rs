use serde::{Deserialize, Serialize};
use shared_types::{FormId, FormSnapshot};

use crate::config::FormStoreConfig;
use crate::error::Result;
use crate::fields::FormFields;
use crate::store::KeyValueStore;

/// What a restore pass did to a live form
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestoreOutcome {
    /// Saved values written into matching fields
    pub applied: usize,
    /// Saved keys with no matching field in the live form
    pub ignored: usize,
}

/// Saves and restores form drafts through a key-value store
#[derive(Debug)]
pub struct FormStateStore<S: KeyValueStore> {
    store: S,
    key_prefix: String,
}

impl<S: KeyValueStore> FormStateStore<S> {
    pub fn new(store: S, config: &FormStoreConfig) -> Self {
        Self {
            store,
            key_prefix: config.key_prefix.clone(),
        }
    }

    pub fn with_defaults(store: S) -> Self {
        Self::new(store, &FormStoreConfig::default())
    }

    /// Storage key for a form (`form_<id>` by default)
    pub fn key_for(&self, form_id: &FormId) -> String {
        format!("{}{}", self.key_prefix, form_id)
    }

    /// Replace the stored draft with `snapshot` in a single write
    pub fn persist(&mut self, form_id: &FormId, snapshot: &FormSnapshot) -> Result<()> {
        let key = self.key_for(form_id);
        let json = serde_json::to_string(snapshot)?;
        self.store.set(&key, &json)?;
        tracing::debug!(%key, fields = snapshot.len(), "form draft saved");
        Ok(())
    }

    /// Capture the live form and persist it; used on every field change
    pub fn persist_form<F: FormFields + ?Sized>(
        &mut self,
        form_id: &FormId,
        form: &F,
    ) -> Result<FormSnapshot> {
        let snapshot = form.snapshot();
        self.persist(form_id, &snapshot)?;
        Ok(snapshot)
    }

    /// Read the stored draft. Missing, unreadable or malformed data yields `None`.
    pub fn restore(&self, form_id: &FormId) -> Option<FormSnapshot> {
        let key = self.key_for(form_id);
        let raw = match self.store.get(&key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                tracing::warn!(%key, error = %err, "form draft unreadable");
                return None;
            }
        };

        match serde_json::from_str::<FormSnapshot>(&raw) {
            Ok(snapshot) => Some(snapshot),
            Err(err) => {
                tracing::warn!(%key, error = %err, "ignoring malformed form draft");
                None
            }
        }
    }

    /// Apply the stored draft to fields present in both the draft and the form.
    ///
    /// Fields missing from the draft keep their current value; draft keys
    /// missing from the form are skipped.
    pub fn restore_into<F: FormFields + ?Sized>(
        &self,
        form_id: &FormId,
        form: &mut F,
    ) -> Option<RestoreOutcome> {
        let snapshot = self.restore(form_id)?;
        let mut outcome = RestoreOutcome::default();

        for (name, value) in snapshot.iter() {
            if form.has_field(name) && form.set_field(name, value) {
                outcome.applied += 1;
            } else {
                outcome.ignored += 1;
            }
        }

        tracing::debug!(
            form = %form_id,
            applied = outcome.applied,
            ignored = outcome.ignored,
            "form draft restored"
        );
        Some(outcome)
    }

    /// Remove the stored draft
    pub fn clear(&mut self, form_id: &FormId) -> Result<()> {
        let key = self.key_for(form_id);
        self.store.remove(&key)?;
        Ok(())
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }
}
