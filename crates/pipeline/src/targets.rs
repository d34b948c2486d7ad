//! Target calculator: goal and weight to a daily calorie target, plus the
//! diet and exclusion parameters of the meal query.

use catalog::{Goal, MappingTables};
use sources::MealQuery;

use crate::normalize::MealPlanRequest;

/// Daily calorie target.
///
/// With a usable weight the target is `round(weight × factor(goal))`;
/// otherwise the static goal table applies. Zero, negative and non-finite
/// weights count as "not supplied", and the result is never below 1.
pub fn target_calories(tables: &MappingTables, goal: &Goal, weight: Option<f64>) -> u32 {
    match weight.filter(|w| w.is_finite() && *w > 0.0) {
        Some(weight) => {
            let calories = (weight * goal.weight_factor()).round();
            calories.clamp(1.0, f64::from(u32::MAX)) as u32
        }
        None => tables.calories_for(goal),
    }
}

/// Provider diet filter: only "Vegetarian" and "Vegan" set one.
pub fn diet_filter(preference: &str) -> &'static str {
    match preference {
        "Vegetarian" => "vegetarian",
        "Vegan" => "vegan",
        _ => "",
    }
}

/// Allergies joined with commas, exactly as given.
pub fn exclusion_list(allergies: &[String]) -> String {
    allergies.join(",")
}

impl MealPlanRequest {
    /// Provider query for this request.
    pub fn to_query(&self, tables: &MappingTables) -> MealQuery {
        MealQuery {
            target_calories: target_calories(tables, &self.goal, self.weight),
            diet: diet_filter(&self.preference).to_string(),
            exclude: exclusion_list(&self.allergies),
        }
    }
}
