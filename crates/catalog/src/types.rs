//! Core domain types shared by every flow.
//!
//! Exercise records and meal plans mirror the JSON the providers speak, so
//! they carry serde renames for the camelCase wire names.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

// =============================================================================
// Workout-related Types
// =============================================================================

/// A single exercise as returned by the exercise-catalog provider.
///
/// Only the six projected fields are kept; anything else the provider sends
/// is dropped during deserialization. The identity key is `name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalExercise {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub muscle: String,
    #[serde(default)]
    pub equipment: String,
    #[serde(default)]
    pub difficulty: String,
    #[serde(default)]
    pub instructions: String,
}

impl ExternalExercise {
    /// Synthetic entry used when a muscle group has neither provider results
    /// nor a fallback catalog entry.
    pub fn placeholder(muscle: &str, equipment: Equipment, difficulty: Difficulty) -> Self {
        Self {
            name: format!("No exercises found for {}", muscle),
            kind: "N/A".to_string(),
            muscle: muscle.to_string(),
            equipment: equipment.provider_value().to_string(),
            difficulty: difficulty.as_str().to_string(),
            instructions: "No exercises available for this muscle group at the moment."
                .to_string(),
        }
    }
}

/// Exercise difficulty as understood by the exercise provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Expert,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Expert => "expert",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Equipment accepted by the workout flow.
///
/// The canonical names form the allow-list; `provider_value` is the spelling
/// the exercise provider expects on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Equipment {
    BodyOnly,
    Dumbbell,
    Barbell,
    Kettlebell,
    Machine,
}

impl Equipment {
    /// Every allowed equipment value, in allow-list order.
    pub const ALL: [Equipment; 5] = [
        Equipment::BodyOnly,
        Equipment::Dumbbell,
        Equipment::Barbell,
        Equipment::Kettlebell,
        Equipment::Machine,
    ];

    /// Canonical allow-list name
    pub fn as_str(&self) -> &'static str {
        match self {
            Equipment::BodyOnly => "body-only",
            Equipment::Dumbbell => "dumbbell",
            Equipment::Barbell => "barbell",
            Equipment::Kettlebell => "kettlebell",
            Equipment::Machine => "machine",
        }
    }

    /// Value sent to the exercise provider
    pub fn provider_value(&self) -> &'static str {
        match self {
            Equipment::BodyOnly => "body only",
            other => other.as_str(),
        }
    }
}

impl fmt::Display for Equipment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Meal-related Types
// =============================================================================

/// Nutrition goal shared by the meal and workout flows.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Goal {
    WeightLoss,
    MaintainWeight,
    MuscleGain,
    /// Any goal outside the known set; kept verbatim
    Other(String),
}

impl Goal {
    /// Goals are matched exactly, the way callers label them.
    pub fn parse(label: &str) -> Self {
        match label {
            "Weight Loss" => Goal::WeightLoss,
            "Maintain Weight" => Goal::MaintainWeight,
            "Muscle Gain" => Goal::MuscleGain,
            other => Goal::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Goal::WeightLoss => "Weight Loss",
            Goal::MaintainWeight => "Maintain Weight",
            Goal::MuscleGain => "Muscle Gain",
            Goal::Other(label) => label,
        }
    }

    /// Calories per unit of body weight used when a weight is supplied.
    pub fn weight_factor(&self) -> f64 {
        match self {
            Goal::WeightLoss => 13.0,
            Goal::MuscleGain => 17.0,
            Goal::MaintainWeight | Goal::Other(_) => 15.0,
        }
    }
}

/// One meal in a generated day plan.
///
/// The provider's meal objects are passed through to callers: missing
/// fields take their defaults and unknown fields (`imageType`, ...) are
/// kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Meal {
    pub id: u64,
    pub title: String,
    pub ready_in_minutes: u32,
    pub servings: u32,
    pub source_url: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Daily nutrient totals reported by the meal provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Nutrients {
    pub calories: f64,
    pub protein: f64,
    pub carbohydrates: f64,
    pub fat: f64,
}

/// The subset of the meal provider's reply that is passed back to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealPlanResult {
    pub meals: Vec<Meal>,
    pub nutrients: Nutrients,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_entry() {
        let entry = ExternalExercise::placeholder("elbow", Equipment::BodyOnly, Difficulty::Expert);

        assert_eq!(entry.name, "No exercises found for elbow");
        assert_eq!(entry.kind, "N/A");
        assert_eq!(entry.muscle, "elbow");
        assert_eq!(entry.equipment, "body only");
        assert_eq!(entry.difficulty, "expert");
    }

    #[test]
    fn test_exercise_deserialize_drops_extra_fields() {
        let json = r#"{
            "name": "Push-up",
            "type": "strength",
            "muscle": "chest",
            "equipment": "body_only",
            "difficulty": "beginner",
            "instructions": "Push.",
            "safety_info": "ignored"
        }"#;
        let exercise: ExternalExercise = serde_json::from_str(json).unwrap();

        assert_eq!(exercise.kind, "strength");
        let back = serde_json::to_value(&exercise).unwrap();
        assert!(back.get("safety_info").is_none());
        assert_eq!(back["type"], "strength");
    }

    #[test]
    fn test_goal_round_trip_labels() {
        assert_eq!(Goal::parse("Weight Loss"), Goal::WeightLoss);
        assert_eq!(Goal::parse("weight loss"), Goal::Other("weight loss".to_string()));
        assert_eq!(Goal::parse("Muscle Gain").label(), "Muscle Gain");
        assert_eq!(Goal::parse("Tone Up").weight_factor(), 15.0);
    }

    #[test]
    fn test_meal_plan_wire_names() {
        let json = r#"{
            "meals": [{"id": 1, "title": "Oats", "readyInMinutes": 5, "servings": 1,
                       "sourceUrl": "https://example.com/oats", "imageType": "jpg"}],
            "nutrients": {"calories": 1600.5, "protein": 80.0, "carbohydrates": 200.0, "fat": 50.0}
        }"#;
        let plan: MealPlanResult = serde_json::from_str(json).unwrap();

        assert_eq!(plan.meals[0].ready_in_minutes, 5);
        let value = serde_json::to_value(&plan).unwrap();
        assert_eq!(value["meals"][0]["sourceUrl"], "https://example.com/oats");
        assert_eq!(value["nutrients"]["calories"], 1600.5);
        assert_eq!(value["meals"][0]["imageType"], "jpg");
    }

    #[test]
    fn test_meal_with_missing_fields_still_parses() {
        let json = r#"{"id": 7, "title": "Mystery Stew", "servings": 2, "image": "stew.jpg"}"#;
        let meal: Meal = serde_json::from_str(json).unwrap();

        assert_eq!(meal.title, "Mystery Stew");
        assert_eq!(meal.ready_in_minutes, 0);
        assert_eq!(meal.source_url, "");
        assert_eq!(meal.extra["image"], "stew.jpg");
    }
}
