pub mod dto;
mod repo;
mod repo_types;
pub mod services;
mod store;

pub use repo::PgIngredientStore;
pub use repo_types::Ingredient;
pub use store::IngredientStore;
