pub mod config;
pub mod error;
pub mod types;

pub use config::GameConfig;
pub use error::{ActionError, RealmError, Result};
pub use types::{Difficulty, Owner, Race, ResourceType, Resources};
