use serde::Deserialize;

/// Knobs for the meal-plan selector.
#[derive(Debug, Clone, Deserialize)]
pub struct PlannerConfig {
    pub max_attempts: usize,
    pub calorie_tolerance: f64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_attempts: 100,
            calorie_tolerance: 0.15,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub planner: PlannerConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let max_connections = std::env::var("DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(10);
        let defaults = PlannerConfig::default();
        let planner = PlannerConfig {
            max_attempts: std::env::var("PLAN_MAX_ATTEMPTS")
                .ok()
                .and_then(|v| v.parse::<usize>().ok())
                .filter(|v| *v > 0)
                .unwrap_or(defaults.max_attempts),
            calorie_tolerance: std::env::var("PLAN_CALORIE_TOLERANCE")
                .ok()
                .and_then(|v| v.parse::<f64>().ok())
                .filter(|v| v.is_finite() && *v >= 0.0)
                .unwrap_or(defaults.calorie_tolerance),
        };
        Ok(Self {
            database_url,
            max_connections,
            planner,
        })
    }
}
