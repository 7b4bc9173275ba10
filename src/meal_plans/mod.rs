use time::Date;

pub mod dto;
mod repo;
mod repo_types;
pub mod services;
mod store;

pub use repo::PgMealPlanStore;
pub use repo_types::{MealPlan, NewMealPlan};
pub use store::{MealCatalog, MealPlanStore};

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");
