pub mod form;
pub mod types;

pub use form::{FormId, FormSnapshot};
pub use types::{ContractRow, ExpiryAlert, StatusTone, Urgency, UrgencyBucket};
