pub mod config;
pub mod db;
pub mod error;
pub mod ingredients;
pub mod meal_plans;
pub mod meals;
pub mod metrics;
pub mod nutrition;
pub mod planner;
pub mod preferences;
pub mod profiles;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;
