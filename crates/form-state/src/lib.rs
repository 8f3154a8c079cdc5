//! Form draft persistence over an injected key-value store
//!
//! Drafts are saved under `"form_" + <form id>` as a flat JSON object on
//! every field change and restored once when the page initializes.

pub mod config;
pub mod drafts;
pub mod error;
pub mod fields;
pub mod form_id;
pub mod preferences;
pub mod store;

pub use config::FormStoreConfig;
pub use drafts::{FormStateStore, RestoreOutcome};
pub use error::{FormStoreError, Result, StoreError};
pub use fields::{FormFields, MemoryForm};
pub use form_id::{AnonymousFormPolicy, FormIdResolver};
pub use preferences::ThemePreference;
pub use store::{KeyValueStore, MemoryStore};
