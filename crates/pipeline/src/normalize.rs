//! Request normalizer: validates raw JSON bodies and turns them into typed
//! requests, one per flow.
//!
//! Every check happens here, before anything leaves the process, so a
//! validation failure never costs an outbound call.

use std::sync::Arc;

use catalog::{Difficulty, Equipment, Goal, MappingTables};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{Result, ValidationError};

/// Muscle group used when the caller names none.
pub const DEFAULT_MUSCLE_GROUP: &str = "chest";

/// A validated meal-plan request.
#[derive(Debug, Clone, PartialEq)]
pub struct MealPlanRequest {
    pub goal: Goal,
    pub preference: String,
    /// Entries exactly as the caller sent them
    pub allergies: Vec<String>,
    pub weight: Option<f64>,
}

/// A validated workout request.
///
/// `goal`, `fitness_level` and `session_time` are echoed back untouched in
/// the reply, so they are kept as raw JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutRequest {
    pub goal: Option<Value>,
    pub fitness_level: Option<Value>,
    pub session_time: Option<Value>,
    pub difficulty: Difficulty,
    pub equipment: Equipment,
    /// Caller-declared order; never empty
    pub muscle_groups: Vec<String>,
}

/// A validated prediction request: any JSON object.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionRequest {
    pub payload: Value,
}

/// Validates inbound bodies against the static mapping tables.
#[derive(Debug, Clone)]
pub struct RequestNormalizer {
    tables: Arc<MappingTables>,
}

impl RequestNormalizer {
    pub fn new(tables: Arc<MappingTables>) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &MappingTables {
        &self.tables
    }

    /// Requires `goal`, `preference` and an `allergies` array; `weight` is optional.
    pub fn meal(&self, body: &Value) -> Result<MealPlanRequest> {
        let fields = as_object(body)?;

        let goal = required_string(fields, "goal")?;
        let preference = required_string(fields, "preference")?;
        let allergies = match fields.get("allergies") {
            None | Some(Value::Null) => return Err(ValidationError::MissingField("allergies")),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| match item {
                    Value::String(s) => Ok(s.clone()),
                    other => Err(ValidationError::InvalidField {
                        field: "allergies",
                        reason: format!("expected a list of strings, found {}", other),
                    }),
                })
                .collect::<Result<Vec<_>>>()?,
            Some(_) => {
                return Err(ValidationError::InvalidField {
                    field: "allergies",
                    reason: "expected a list".to_string(),
                });
            }
        };
        let weight = optional_number(fields, "weight")?;

        debug!(
            "Normalized meal request: goal={}, preference={}, {} allergies, weight={:?}",
            goal,
            preference,
            allergies.len(),
            weight
        );

        Ok(MealPlanRequest {
            goal: Goal::parse(&goal),
            preference,
            allergies,
            weight,
        })
    }

    /// Requires an allowed `equipment`; everything else has a default.
    pub fn workout(&self, body: &Value) -> Result<WorkoutRequest> {
        let fields = as_object(body)?;

        let equipment_name = match fields.get("equipment") {
            None | Some(Value::Null) => return Err(ValidationError::MissingField("equipment")),
            Some(Value::String(s)) => s.as_str(),
            Some(other) => {
                return Err(self.invalid_equipment(other.to_string()));
            }
        };
        let equipment = self
            .tables
            .equipment_for(equipment_name)
            .ok_or_else(|| self.invalid_equipment(equipment_name.to_string()))?;

        let fitness_level = present(fields, "fitnessLevel");
        let difficulty = self
            .tables
            .difficulty_for(fitness_level.as_ref().and_then(Value::as_str));

        let muscle_groups = muscle_groups(fields)?;

        debug!(
            "Normalized workout request: equipment={}, difficulty={}, muscles={:?}",
            equipment, difficulty, muscle_groups
        );

        Ok(WorkoutRequest {
            goal: present(fields, "goal"),
            fitness_level,
            session_time: present(fields, "sessionTime"),
            difficulty,
            equipment,
            muscle_groups,
        })
    }

    /// Any JSON object is accepted as a prediction payload.
    pub fn prediction(&self, body: &Value) -> Result<PredictionRequest> {
        as_object(body)?;
        Ok(PredictionRequest {
            payload: body.clone(),
        })
    }

    fn invalid_equipment(&self, value: String) -> ValidationError {
        ValidationError::InvalidEquipment {
            value,
            allowed: self.tables.allowed_equipment().join(", "),
        }
    }
}

fn as_object(body: &Value) -> Result<&Map<String, Value>> {
    body.as_object().ok_or(ValidationError::NotAnObject)
}

fn present(fields: &Map<String, Value>, key: &str) -> Option<Value> {
    fields.get(key).filter(|v| !v.is_null()).cloned()
}

fn required_string(fields: &Map<String, Value>, key: &'static str) -> Result<String> {
    match fields.get(key) {
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.clone()),
        Some(Value::String(_)) | Some(Value::Null) | None => Err(ValidationError::MissingField(key)),
        Some(other) => Err(ValidationError::InvalidField {
            field: key,
            reason: format!("expected a string, found {}", other),
        }),
    }
}

/// Numbers and numeric strings are accepted; blank strings count as absent.
fn optional_number(fields: &Map<String, Value>, key: &'static str) -> Result<Option<f64>> {
    match fields.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => Ok(n.as_f64()),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => s.trim().parse::<f64>().map(Some).map_err(|_| {
            ValidationError::InvalidField {
                field: key,
                reason: format!("'{}' is not a number", s),
            }
        }),
        Some(other) => Err(ValidationError::InvalidField {
            field: key,
            reason: format!("expected a number, found {}", other),
        }),
    }
}

/// `muscleGroups` (array) wins over `muscleGroup` (string); blanks are dropped.
fn muscle_groups(fields: &Map<String, Value>) -> Result<Vec<String>> {
    let mut groups = Vec::new();

    match fields.get("muscleGroups") {
        None | Some(Value::Null) => {}
        Some(Value::Array(items)) => {
            for item in items {
                match item {
                    Value::String(s) => groups.push(s.trim().to_string()),
                    other => {
                        return Err(ValidationError::InvalidField {
                            field: "muscleGroups",
                            reason: format!("expected a list of strings, found {}", other),
                        });
                    }
                }
            }
        }
        Some(_) => {
            return Err(ValidationError::InvalidField {
                field: "muscleGroups",
                reason: "expected a list".to_string(),
            });
        }
    }

    if groups.is_empty() {
        match fields.get("muscleGroup") {
            None | Some(Value::Null) => {}
            Some(Value::String(s)) => groups.push(s.trim().to_string()),
            Some(other) => {
                return Err(ValidationError::InvalidField {
                    field: "muscleGroup",
                    reason: format!("expected a string, found {}", other),
                });
            }
        }
    }

    groups.retain(|g| !g.is_empty());
    if groups.is_empty() {
        groups.push(DEFAULT_MUSCLE_GROUP.to_string());
    }
    Ok(groups)
}
