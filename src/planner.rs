//! Picks one meal per slot so the day's totals land near the user's targets.
//!
//! This is a bounded search, not an optimiser: when the pools are small
//! enough every triple is scored, otherwise a fixed number of random triples
//! (drawn with replacement) is scored and the best eligible one wins.

use rand::Rng;
use serde::Serialize;
use tracing::debug;

use crate::config::PlannerConfig;
use crate::meals::ResolvedMeal;
use crate::metrics::MacroTargets;
use crate::nutrition::Nutrition;

/// Winning triple together with its day totals and score.
#[derive(Debug, Clone, Serialize)]
pub struct MealCombination<'a> {
    pub breakfast: &'a ResolvedMeal,
    pub lunch: &'a ResolvedMeal,
    pub dinner: &'a ResolvedMeal,
    pub nutrition: Nutrition,
    pub score: f64,
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    picks: (usize, usize, usize),
    nutrition: Nutrition,
    score: f64,
}

/// Choose the lowest-scoring breakfast/lunch/dinner triple.
///
/// A triple is only eligible when its calories are within
/// `config.calorie_tolerance` of the calorie target. Returns `None` when any
/// pool is empty or no scored triple passes that gate.
pub fn find_best_meal_combination<'a, R>(
    breakfasts: &'a [ResolvedMeal],
    lunches: &'a [ResolvedMeal],
    dinners: &'a [ResolvedMeal],
    targets: &MacroTargets,
    config: &PlannerConfig,
    rng: &mut R,
) -> Option<MealCombination<'a>>
where
    R: Rng,
{
    if breakfasts.is_empty() || lunches.is_empty() || dinners.is_empty() {
        debug!(
            breakfasts = breakfasts.len(),
            lunches = lunches.len(),
            dinners = dinners.len(),
            "empty candidate pool"
        );
        return None;
    }

    let b: Vec<Nutrition> = breakfasts.iter().map(ResolvedMeal::nutrition).collect();
    let l: Vec<Nutrition> = lunches.iter().map(ResolvedMeal::nutrition).collect();
    let d: Vec<Nutrition> = dinners.iter().map(ResolvedMeal::nutrition).collect();

    let max_calorie_gap = config.calorie_tolerance * targets.calories;
    let mut best: Option<Candidate> = None;
    let mut consider = |i: usize, j: usize, k: usize| {
        let nutrition = (b[i] + l[j] + d[k]).rounded();
        if (nutrition.calories - targets.calories).abs() > max_calorie_gap {
            return;
        }
        let score = nutrition.deviation_score(targets);
        if best.map_or(true, |c| score < c.score) {
            best = Some(Candidate {
                picks: (i, j, k),
                nutrition,
                score,
            });
        }
    };

    let combinations = b.len().saturating_mul(l.len()).saturating_mul(d.len());
    let attempts = config.max_attempts.min(combinations);
    let exhaustive = combinations <= config.max_attempts;
    if exhaustive {
        for i in 0..b.len() {
            for j in 0..l.len() {
                for k in 0..d.len() {
                    consider(i, j, k);
                }
            }
        }
    } else {
        for _ in 0..attempts {
            consider(
                rng.gen_range(0..b.len()),
                rng.gen_range(0..l.len()),
                rng.gen_range(0..d.len()),
            );
        }
    }

    debug!(
        attempts,
        exhaustive,
        found = best.is_some(),
        "meal combination search finished"
    );

    best.map(|c| MealCombination {
        breakfast: &breakfasts[c.picks.0],
        lunch: &lunches[c.picks.1],
        dinner: &dinners[c.picks.2],
        nutrition: c.nutrition,
        score: c.score,
    })
}
