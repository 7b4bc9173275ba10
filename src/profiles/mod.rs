pub mod dto;
mod repo;
mod repo_types;
pub mod services;
mod store;

pub use repo::PgProfileStore;
pub use repo_types::Profile;
pub use store::ProfileStore;
