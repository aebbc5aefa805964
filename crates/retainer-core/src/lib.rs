pub mod config;
pub mod engine;
pub mod error;
pub mod loader;
pub mod options;
pub mod paths;
pub mod types;

pub use engine::{expired_releases, retain_releases, Retention, RetentionEvent};
pub use error::{Result, RetainerError};
pub use options::{RetentionOptions, RetentionOptionsBuilder};
