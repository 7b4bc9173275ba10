use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use time::Date;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::dto::{CreateMealPlanRequest, GenerateOutcome, MealPlanDetails, SwapMealRequest};
use super::repo_types::{MealPlan, NewMealPlan};
use super::store::{MealCatalog, MealPlanStore};
use crate::config::PlannerConfig;
use crate::error::AppError;
use crate::meals::dto::MealDetails;
use crate::meals::{MealType, ResolvedMeal};
use crate::metrics::MacroTargets;
use crate::nutrition::Nutrition;
use crate::planner::find_best_meal_combination;
use crate::preferences::{matches_preferences, Preferences, PreferencesStore};
use crate::profiles::services::get_profile;
use crate::profiles::ProfileStore;
use crate::state::AppState;

/// Fail with `InvalidInput` naming the first id the catalog does not know.
async fn ensure_meals_exist(catalog: &dyn MealCatalog, ids: &[Uuid]) -> Result<(), AppError> {
    if ids.is_empty() {
        return Ok(());
    }
    let known: Vec<Uuid> = catalog
        .resolve(ids)
        .await?
        .into_iter()
        .map(|m| m.meal.id)
        .collect();
    if let Some(missing) = ids.iter().find(|id| !known.contains(id)) {
        warn!(meal_id = %missing, "plan references unknown meal");
        return Err(AppError::InvalidInput(format!("Meal {} not found", missing)));
    }
    Ok(())
}

#[instrument(skip(plans, catalog))]
pub async fn get_meal_plan(
    plans: &dyn MealPlanStore,
    catalog: &dyn MealCatalog,
    user_id: Uuid,
    date: Date,
) -> Result<MealPlanDetails, AppError> {
    let plan = plans
        .find(user_id, date)
        .await?
        .ok_or(AppError::NotFound("Meal plan"))?;

    let by_id: HashMap<Uuid, ResolvedMeal> = catalog
        .resolve(&plan.meal_ids())
        .await?
        .into_iter()
        .map(|m| (m.meal.id, m))
        .collect();
    let take = |meal_type: MealType| -> Option<MealDetails> {
        let id = plan.slot(meal_type)?;
        // the same meal may fill more than one slot
        by_id.get(&id).cloned().map(MealDetails::from)
    };
    let breakfast = take(MealType::Breakfast);
    let lunch = take(MealType::Lunch);
    let dinner = take(MealType::Dinner);

    let nutrition = [&breakfast, &lunch, &dinner]
        .into_iter()
        .flatten()
        .map(|m| m.nutrition)
        .sum::<Nutrition>()
        .rounded();

    Ok(MealPlanDetails {
        plan,
        breakfast,
        lunch,
        dinner,
        nutrition,
    })
}

#[instrument(skip(plans, catalog, req))]
pub async fn create_meal_plan(
    plans: &dyn MealPlanStore,
    catalog: &dyn MealCatalog,
    user_id: Uuid,
    req: CreateMealPlanRequest,
) -> Result<MealPlan, AppError> {
    if plans.find(user_id, req.date).await?.is_some() {
        warn!(%user_id, date = %req.date, "meal plan already exists");
        return Err(AppError::Conflict(
            "Meal plan already exists for this date".into(),
        ));
    }

    let new = NewMealPlan {
        user_id,
        date: req.date,
        breakfast_id: req.breakfast,
        lunch_id: req.lunch,
        dinner_id: req.dinner,
    };
    ensure_meals_exist(catalog, &new.meal_ids()).await?;

    let plan = plans.insert(new).await?;
    info!(plan_id = %plan.id, %user_id, date = %plan.date, "meal plan created");
    Ok(plan)
}

#[instrument(skip(plans, catalog, req))]
pub async fn swap_meal(
    plans: &dyn MealPlanStore,
    catalog: &dyn MealCatalog,
    user_id: Uuid,
    req: SwapMealRequest,
) -> Result<MealPlan, AppError> {
    if plans.find(user_id, req.date).await?.is_none() {
        return Err(AppError::NotFound("Meal plan"));
    }
    if catalog.resolve(&[req.meal_id]).await?.is_empty() {
        return Err(AppError::InvalidInput("Meal not found".into()));
    }

    let plan = plans
        .set_slot(user_id, req.date, req.slot, req.meal_id)
        .await?
        .ok_or(AppError::NotFound("Meal plan"))?;
    info!(plan_id = %plan.id, slot = req.slot.as_str(), meal_id = %req.meal_id, "meal swapped");
    Ok(plan)
}

#[instrument(skip(plans))]
pub async fn delete_meal_plan(
    plans: &dyn MealPlanStore,
    user_id: Uuid,
    date: Date,
) -> Result<(), AppError> {
    if !plans.delete(user_id, date).await? {
        return Err(AppError::NotFound("Meal plan"));
    }
    info!(%user_id, %date, "meal plan deleted");
    Ok(())
}

/// Build candidate pools from the catalog, pick the best day and store it,
/// replacing any plan the user already had for `date`.
///
/// When no acceptable combination exists the stored plan is left alone and
/// `GenerateOutcome::NotEnoughMeals` is returned.
#[allow(clippy::too_many_arguments)]
#[instrument(skip(plans, catalog, targets, prefs, config, rng))]
pub async fn generate_meal_plan<R>(
    plans: &dyn MealPlanStore,
    catalog: &dyn MealCatalog,
    user_id: Uuid,
    date: Date,
    targets: &MacroTargets,
    prefs: Option<&Preferences>,
    config: &PlannerConfig,
    rng: &mut R,
) -> Result<GenerateOutcome, AppError>
where
    R: Rng + Send,
{
    let mut pools: Vec<Vec<ResolvedMeal>> = Vec::with_capacity(MealType::ALL.len());
    for meal_type in MealType::ALL {
        let pool: Vec<ResolvedMeal> = catalog
            .candidates(meal_type)
            .await?
            .into_iter()
            .filter(|m| matches_preferences(&m.meal, prefs))
            .collect();
        pools.push(pool);
    }

    let picked = find_best_meal_combination(&pools[0], &pools[1], &pools[2], targets, config, rng)
        .map(|c| {
            (
                NewMealPlan {
                    user_id,
                    date,
                    breakfast_id: Some(c.breakfast.meal.id),
                    lunch_id: Some(c.lunch.meal.id),
                    dinner_id: Some(c.dinner.meal.id),
                },
                c.nutrition,
                c.score,
            )
        });

    let Some((new, nutrition, score)) = picked else {
        info!(
            %user_id,
            %date,
            breakfasts = pools[0].len(),
            lunches = pools[1].len(),
            dinners = pools[2].len(),
            "no acceptable meal combination"
        );
        return Ok(GenerateOutcome::NotEnoughMeals);
    };

    let plan = plans.replace(new).await?;
    info!(plan_id = %plan.id, %user_id, %date, score, "meal plan generated");
    Ok(GenerateOutcome::Generated {
        plan,
        nutrition,
        score,
    })
}

/// Generate a plan for `date` from the user's stored profile and preferences.
///
/// Fails with `NotFound` when the user has no profile; missing preferences
/// leave the whole catalog eligible.
#[allow(clippy::too_many_arguments)]
#[instrument(skip(profiles, preferences, plans, catalog, config, rng))]
pub async fn generate_from_profile<R>(
    profiles: &dyn ProfileStore,
    preferences: &dyn PreferencesStore,
    plans: &dyn MealPlanStore,
    catalog: &dyn MealCatalog,
    user_id: Uuid,
    date: Date,
    config: &PlannerConfig,
    rng: &mut R,
) -> Result<GenerateOutcome, AppError>
where
    R: Rng + Send,
{
    let profile = get_profile(profiles, user_id).await?;
    let prefs = preferences.find(user_id).await?;
    generate_meal_plan(
        plans,
        catalog,
        user_id,
        date,
        &profile.metrics.targets(),
        prefs.as_ref(),
        config,
        rng,
    )
    .await
}

#[instrument(skip(state))]
pub async fn generate_for_user(
    state: &AppState,
    user_id: Uuid,
    date: Date,
) -> Result<GenerateOutcome, AppError> {
    let mut rng = StdRng::from_entropy();
    generate_from_profile(
        state.profiles.as_ref(),
        state.preferences.as_ref(),
        state.plans.as_ref(),
        state.catalog.as_ref(),
        user_id,
        date,
        &state.config.planner,
        &mut rng,
    )
    .await
}
