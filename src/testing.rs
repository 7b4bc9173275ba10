//! In-memory stand-ins for the Postgres-backed stores, plus meal builders.

use std::fmt;
use std::sync::Mutex;

use async_trait::async_trait;
use sqlx::error::{DatabaseError, ErrorKind};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::error::AppError;
use crate::ingredients::{Ingredient, IngredientStore};
use crate::meal_plans::{MealCatalog, MealPlan, MealPlanStore, NewMealPlan};
use crate::meals::dto::IngredientAmount;
use crate::meals::{Meal, MealStore, MealType, MealWrite, ResolvedMeal};
use crate::metrics::{BodyMetrics, ProfileInputs};
use crate::nutrition::MealIngredient;
use crate::preferences::{Preferences, PreferencesStore};
use crate::profiles::{Profile, ProfileStore};

/// Constraint failure shaped like the one Postgres reports through sqlx.
#[derive(Debug)]
pub(crate) struct FakeDbError {
    kind: FakeViolation,
}

#[derive(Debug, Clone, Copy)]
enum FakeViolation {
    Unique,
    ForeignKey,
}

impl FakeDbError {
    pub(crate) fn unique() -> Self {
        Self {
            kind: FakeViolation::Unique,
        }
    }

    pub(crate) fn foreign_key() -> Self {
        Self {
            kind: FakeViolation::ForeignKey,
        }
    }
}

impl fmt::Display for FakeDbError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for FakeDbError {}

impl DatabaseError for FakeDbError {
    fn message(&self) -> &str {
        match self.kind {
            FakeViolation::Unique => "duplicate key value violates unique constraint",
            FakeViolation::ForeignKey => "insert or update violates foreign key constraint",
        }
    }

    fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        self
    }

    fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
        self
    }

    fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
        self
    }

    fn kind(&self) -> ErrorKind {
        match self.kind {
            FakeViolation::Unique => ErrorKind::UniqueViolation,
            FakeViolation::ForeignKey => ErrorKind::ForeignKeyViolation,
        }
    }
}

/// A meal made of 100 g of one ingredient, so its nutrition equals the
/// ingredient's per-100 values.
pub(crate) fn resolved_meal(
    name: &str,
    meal_type: MealType,
    kcal: f64,
    protein: f64,
    carbs: f64,
    fat: f64,
) -> ResolvedMeal {
    ResolvedMeal {
        meal: Meal {
            id: Uuid::new_v4(),
            name: name.into(),
            meal_types: vec![meal_type],
            instructions: vec![],
            diet_types: vec![],
            excludes_allergens: vec![],
            image_url: None,
            created_at: OffsetDateTime::now_utc(),
        },
        ingredients: vec![MealIngredient {
            ingredient: Ingredient {
                id: Uuid::new_v4(),
                name: format!("{} base", name),
                calories_per_100g: kcal,
                protein_per_100g: protein,
                carbs_per_100g: carbs,
                fat_per_100g: fat,
                unit: "g".into(),
            },
            amount: 100.0,
        }],
    }
}

#[derive(Default)]
pub(crate) struct InMemoryPlanStore {
    plans: Mutex<Vec<MealPlan>>,
}

impl InMemoryPlanStore {
    pub(crate) fn count_for(&self, user_id: Uuid, date: Date) -> usize {
        self.plans
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.user_id == user_id && p.date == date)
            .count()
    }
}

fn materialize(new: NewMealPlan) -> MealPlan {
    MealPlan {
        id: Uuid::new_v4(),
        user_id: new.user_id,
        date: new.date,
        breakfast_id: new.breakfast_id,
        lunch_id: new.lunch_id,
        dinner_id: new.dinner_id,
        created_at: OffsetDateTime::now_utc(),
    }
}

#[async_trait]
impl MealPlanStore for InMemoryPlanStore {
    async fn find(&self, user_id: Uuid, date: Date) -> Result<Option<MealPlan>, AppError> {
        Ok(self
            .plans
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.user_id == user_id && p.date == date)
            .cloned())
    }

    async fn insert(&self, plan: NewMealPlan) -> Result<MealPlan, AppError> {
        let mut plans = self.plans.lock().unwrap();
        if plans
            .iter()
            .any(|p| p.user_id == plan.user_id && p.date == plan.date)
        {
            return Err(AppError::on_write(
                FakeDbError::unique().into(),
                "Meal plan already exists for this date",
            ));
        }
        let stored = materialize(plan);
        plans.push(stored.clone());
        Ok(stored)
    }

    async fn replace(&self, plan: NewMealPlan) -> Result<MealPlan, AppError> {
        let mut plans = self.plans.lock().unwrap();
        plans.retain(|p| !(p.user_id == plan.user_id && p.date == plan.date));
        let stored = materialize(plan);
        plans.push(stored.clone());
        Ok(stored)
    }

    async fn set_slot(
        &self,
        user_id: Uuid,
        date: Date,
        meal_type: MealType,
        meal_id: Uuid,
    ) -> Result<Option<MealPlan>, AppError> {
        let mut plans = self.plans.lock().unwrap();
        Ok(plans
            .iter_mut()
            .find(|p| p.user_id == user_id && p.date == date)
            .map(|p| {
                p.set_slot(meal_type, Some(meal_id));
                p.clone()
            }))
    }

    async fn delete(&self, user_id: Uuid, date: Date) -> Result<bool, AppError> {
        let mut plans = self.plans.lock().unwrap();
        let before = plans.len();
        plans.retain(|p| !(p.user_id == user_id && p.date == date));
        Ok(plans.len() != before)
    }
}

/// Meals plus the ingredients their lines may reference. Serves both the
/// catalog read path and meal CRUD.
pub(crate) struct InMemoryCatalog {
    meals: Mutex<Vec<ResolvedMeal>>,
    ingredients: Vec<Ingredient>,
}

impl InMemoryCatalog {
    pub(crate) fn new(meals: Vec<ResolvedMeal>) -> Self {
        Self {
            meals: Mutex::new(meals),
            ingredients: Vec::new(),
        }
    }

    pub(crate) fn with_ingredients(mut self, ingredients: Vec<Ingredient>) -> Self {
        self.ingredients = ingredients;
        self
    }

    pub(crate) fn id_of(&self, name: &str) -> Uuid {
        self.meals
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.meal.name == name)
            .map(|m| m.meal.id)
            .unwrap_or_else(|| panic!("no meal named {}", name))
    }

    fn resolve_lines(&self, lines: &[IngredientAmount]) -> Result<Vec<MealIngredient>, AppError> {
        lines
            .iter()
            .map(|line| {
                self.ingredients
                    .iter()
                    .find(|i| i.id == line.ingredient_id)
                    .map(|i| MealIngredient {
                        ingredient: i.clone(),
                        amount: line.amount,
                    })
                    .ok_or_else(|| {
                        AppError::on_reference(
                            FakeDbError::foreign_key().into(),
                            "Meal references an unknown ingredient",
                        )
                    })
            })
            .collect()
    }
}

fn apply_write(meal: &mut Meal, write: &MealWrite<'_>) {
    meal.name = write.name.to_string();
    meal.meal_types = write
        .meal_types
        .iter()
        .filter_map(|t| MealType::parse(t))
        .collect();
    meal.instructions = write.instructions.to_vec();
    meal.diet_types = write.diet_types.to_vec();
    meal.excludes_allergens = write.excludes_allergens.to_vec();
    meal.image_url = write.image_url.map(str::to_string);
}

#[async_trait]
impl MealStore for InMemoryCatalog {
    async fn list(
        &self,
        meal_type: Option<MealType>,
        diet_type: Option<&str>,
    ) -> Result<Vec<ResolvedMeal>, AppError> {
        let mut found: Vec<ResolvedMeal> = self
            .meals
            .lock()
            .unwrap()
            .iter()
            .filter(|m| meal_type.map_or(true, |t| m.meal.meal_types.contains(&t)))
            .filter(|m| diet_type.map_or(true, |d| m.meal.diet_types.iter().any(|x| x == d)))
            .cloned()
            .collect();
        found.sort_by(|a, b| a.meal.name.cmp(&b.meal.name));
        Ok(found)
    }

    async fn find(&self, id: Uuid) -> Result<Option<ResolvedMeal>, AppError> {
        Ok(self
            .meals
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.meal.id == id)
            .cloned())
    }

    async fn insert(
        &self,
        write: &MealWrite<'_>,
        lines: &[IngredientAmount],
    ) -> Result<Uuid, AppError> {
        let ingredients = self.resolve_lines(lines)?;
        let mut meal = Meal {
            id: Uuid::new_v4(),
            name: String::new(),
            meal_types: vec![],
            instructions: vec![],
            diet_types: vec![],
            excludes_allergens: vec![],
            image_url: None,
            created_at: OffsetDateTime::now_utc(),
        };
        apply_write(&mut meal, write);
        let id = meal.id;
        self.meals
            .lock()
            .unwrap()
            .push(ResolvedMeal { meal, ingredients });
        Ok(id)
    }

    async fn update(
        &self,
        id: Uuid,
        write: &MealWrite<'_>,
        lines: Option<&[IngredientAmount]>,
    ) -> Result<bool, AppError> {
        let resolved = lines.map(|l| self.resolve_lines(l)).transpose()?;
        let mut meals = self.meals.lock().unwrap();
        let Some(target) = meals.iter_mut().find(|m| m.meal.id == id) else {
            return Ok(false);
        };
        apply_write(&mut target.meal, write);
        if let Some(ingredients) = resolved {
            target.ingredients = ingredients;
        }
        Ok(true)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let mut meals = self.meals.lock().unwrap();
        let before = meals.len();
        meals.retain(|m| m.meal.id != id);
        Ok(meals.len() != before)
    }
}

#[async_trait]
impl MealCatalog for InMemoryCatalog {
    async fn candidates(&self, meal_type: MealType) -> Result<Vec<ResolvedMeal>, AppError> {
        Ok(self
            .meals
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.meal.meal_types.contains(&meal_type))
            .cloned()
            .collect())
    }

    async fn resolve(&self, ids: &[Uuid]) -> Result<Vec<ResolvedMeal>, AppError> {
        Ok(self
            .meals
            .lock()
            .unwrap()
            .iter()
            .filter(|m| ids.contains(&m.meal.id))
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub(crate) struct InMemoryIngredientStore {
    ingredients: Mutex<Vec<Ingredient>>,
    in_use: Mutex<Vec<Uuid>>,
}

impl InMemoryIngredientStore {
    pub(crate) fn with(ingredients: Vec<Ingredient>) -> Self {
        Self {
            ingredients: Mutex::new(ingredients),
            in_use: Mutex::default(),
        }
    }

    pub(crate) fn add(&self, ingredient: Ingredient) {
        self.ingredients.lock().unwrap().push(ingredient);
    }

    /// Make later deletes fail as if a meal line referenced `id`.
    pub(crate) fn mark_in_use(&self, id: Uuid) {
        self.in_use.lock().unwrap().push(id);
    }
}

#[async_trait]
impl IngredientStore for InMemoryIngredientStore {
    async fn list(&self) -> Result<Vec<Ingredient>, AppError> {
        let mut all = self.ingredients.lock().unwrap().clone();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(all)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Ingredient>, AppError> {
        Ok(self
            .ingredients
            .lock()
            .unwrap()
            .iter()
            .find(|i| i.id == id)
            .cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Ingredient>, AppError> {
        Ok(self
            .ingredients
            .lock()
            .unwrap()
            .iter()
            .find(|i| i.name == name)
            .cloned())
    }

    async fn missing_ids(&self, ids: &[Uuid]) -> Result<Vec<Uuid>, AppError> {
        let known = self.ingredients.lock().unwrap();
        let mut missing: Vec<Uuid> = ids
            .iter()
            .filter(|id| !known.iter().any(|i| i.id == **id))
            .copied()
            .collect();
        missing.dedup();
        Ok(missing)
    }

    async fn insert(&self, new: &Ingredient) -> Result<Ingredient, AppError> {
        let mut all = self.ingredients.lock().unwrap();
        if all.iter().any(|i| i.name == new.name) {
            return Err(AppError::on_write(
                FakeDbError::unique().into(),
                "Ingredient already exists",
            ));
        }
        let stored = Ingredient {
            id: Uuid::new_v4(),
            ..new.clone()
        };
        all.push(stored.clone());
        Ok(stored)
    }

    async fn update(&self, ingredient: &Ingredient) -> Result<Option<Ingredient>, AppError> {
        let mut all = self.ingredients.lock().unwrap();
        if all
            .iter()
            .any(|i| i.id != ingredient.id && i.name == ingredient.name)
        {
            return Err(AppError::on_write(
                FakeDbError::unique().into(),
                "Ingredient name already taken",
            ));
        }
        Ok(all.iter_mut().find(|i| i.id == ingredient.id).map(|i| {
            *i = ingredient.clone();
            i.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        if self.in_use.lock().unwrap().contains(&id) {
            return Err(AppError::on_delete(
                FakeDbError::foreign_key().into(),
                "Ingredient is used by a meal",
            ));
        }
        let mut all = self.ingredients.lock().unwrap();
        let before = all.len();
        all.retain(|i| i.id != id);
        Ok(all.len() != before)
    }
}

#[derive(Default)]
pub(crate) struct InMemoryProfileStore {
    profiles: Mutex<Vec<Profile>>,
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn find(&self, user_id: Uuid) -> Result<Option<Profile>, AppError> {
        Ok(self
            .profiles
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.user_id == user_id)
            .cloned())
    }

    async fn insert(
        &self,
        user_id: Uuid,
        inputs: &ProfileInputs,
        metrics: &BodyMetrics,
    ) -> Result<Profile, AppError> {
        let mut all = self.profiles.lock().unwrap();
        if all.iter().any(|p| p.user_id == user_id) {
            return Err(AppError::on_write(
                FakeDbError::unique().into(),
                "Profile already exists",
            ));
        }
        let profile = Profile {
            id: Uuid::new_v4(),
            user_id,
            inputs: inputs.clone(),
            metrics: *metrics,
            updated_at: OffsetDateTime::now_utc(),
        };
        all.push(profile.clone());
        Ok(profile)
    }

    async fn update(
        &self,
        user_id: Uuid,
        inputs: &ProfileInputs,
        metrics: &BodyMetrics,
    ) -> Result<Option<Profile>, AppError> {
        Ok(self
            .profiles
            .lock()
            .unwrap()
            .iter_mut()
            .find(|p| p.user_id == user_id)
            .map(|p| {
                p.inputs = inputs.clone();
                p.metrics = *metrics;
                p.updated_at = OffsetDateTime::now_utc();
                p.clone()
            }))
    }

    async fn delete(&self, user_id: Uuid) -> Result<bool, AppError> {
        let mut all = self.profiles.lock().unwrap();
        let before = all.len();
        all.retain(|p| p.user_id != user_id);
        Ok(all.len() != before)
    }
}

#[derive(Default)]
pub(crate) struct InMemoryPreferencesStore {
    preferences: Mutex<Vec<Preferences>>,
}

#[async_trait]
impl PreferencesStore for InMemoryPreferencesStore {
    async fn find(&self, user_id: Uuid) -> Result<Option<Preferences>, AppError> {
        Ok(self
            .preferences
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.user_id == user_id)
            .cloned())
    }

    async fn insert(
        &self,
        user_id: Uuid,
        diet_type: Option<&str>,
        allergies: &[String],
        meals_per_day: i32,
    ) -> Result<Preferences, AppError> {
        let mut all = self.preferences.lock().unwrap();
        if all.iter().any(|p| p.user_id == user_id) {
            return Err(AppError::on_write(
                FakeDbError::unique().into(),
                "Preferences already exist",
            ));
        }
        let prefs = Preferences {
            id: Uuid::new_v4(),
            user_id,
            diet_type: diet_type.map(str::to_string),
            allergies: allergies.to_vec(),
            meals_per_day,
        };
        all.push(prefs.clone());
        Ok(prefs)
    }

    async fn update(&self, prefs: &Preferences) -> Result<Option<Preferences>, AppError> {
        Ok(self
            .preferences
            .lock()
            .unwrap()
            .iter_mut()
            .find(|p| p.user_id == prefs.user_id)
            .map(|p| {
                *p = Preferences {
                    id: p.id,
                    ..prefs.clone()
                };
                p.clone()
            }))
    }
}
