pub mod errors;
pub mod id;

pub use errors::{ConfigError, GemchatError};
pub use id::{new_id, SessionId};
