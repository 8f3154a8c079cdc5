//! Dark mode preference, kept in the same store as form drafts

use crate::error::StoreError;
use crate::store::KeyValueStore;

pub struct ThemePreference;

impl ThemePreference {
    pub const KEY: &'static str = "darkMode";

    /// Anything but a stored `"true"` means light mode
    pub fn is_dark<S: KeyValueStore + ?Sized>(store: &S) -> bool {
        matches!(store.get(Self::KEY), Ok(Some(value)) if value == "true")
    }

    pub fn set_dark<S: KeyValueStore + ?Sized>(
        store: &mut S,
        dark: bool,
    ) -> Result<(), StoreError> {
        store.set(Self::KEY, if dark { "true" } else { "false" })
    }

    /// Flip and persist; returns the new state
    pub fn toggle<S: KeyValueStore + ?Sized>(store: &mut S) -> Result<bool, StoreError> {
        let dark = !Self::is_dark(store);
        Self::set_dark(store, dark)?;
        Ok(dark)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_defaults_to_light() {
        let mut store = MemoryStore::new();
        assert!(!ThemePreference::is_dark(&store));

        store.set(ThemePreference::KEY, "yes").unwrap();
        assert!(!ThemePreference::is_dark(&store));
    }

    #[test]
    fn test_toggle_persists() {
        let mut store = MemoryStore::new();
        assert!(ThemePreference::toggle(&mut store).unwrap());
        assert_eq!(store.get("darkMode").unwrap().as_deref(), Some("true"));
        assert!(!ThemePreference::toggle(&mut store).unwrap());
        assert_eq!(store.get("darkMode").unwrap().as_deref(), Some("false"));
    }
}
