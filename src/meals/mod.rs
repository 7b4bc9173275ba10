pub mod dto;
mod repo;
mod repo_types;
pub mod services;
mod store;

pub use repo::PgMealStore;
pub use repo_types::{Meal, MealType, ResolvedMeal};
pub use store::{MealStore, MealWrite};
