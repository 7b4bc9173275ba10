pub mod dto;
mod repo;
mod repo_types;
pub mod services;
mod store;

pub use repo::PgPreferencesStore;
pub use repo_types::{matches_preferences, Preferences, STANDARD_DIET};
pub use store::PreferencesStore;
