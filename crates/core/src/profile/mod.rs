mod error;
mod traits;
mod types;

pub use error::{BackendError, RejectedRequest, Result};
pub use traits::ProfileBackend;
pub use types::{Existence, ProfileRecord};
