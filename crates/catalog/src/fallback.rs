//! Curated exercises substituted when the exercise provider has nothing
//! for a muscle group.
//!
//! The catalog is keyed by lower-cased muscle name. It is either the
//! built-in set or loaded from a JSON file of the form
//! `{"back": [{"name": ..., "type": ..., ...}, ...]}`, and is never mutated
//! after construction.

use crate::error::{CatalogError, Result};
use crate::types::ExternalExercise;
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

/// Read-only map from muscle name to curated exercises.
#[derive(Debug, Clone, Default)]
pub struct FallbackCatalog {
    by_muscle: HashMap<String, Vec<ExternalExercise>>,
}

impl FallbackCatalog {
    /// Empty catalog; every muscle degrades to a placeholder.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in catalog (eight back exercises).
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        catalog.by_muscle.insert("back".to_string(), builtin_back_exercises());
        catalog
    }

    /// Load a catalog from a JSON file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CatalogError::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let contents = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&contents).map_err(|e| match e {
            CatalogError::ParseError { reason, .. } => CatalogError::ParseError {
                path: path.display().to_string(),
                reason,
            },
            other => other,
        })?;
        info!(
            "Loaded fallback catalog from {} ({} muscle groups)",
            path.display(),
            catalog.by_muscle.len()
        );
        Ok(catalog)
    }

    /// Parse a catalog from JSON text.
    pub fn from_json(contents: &str) -> Result<Self> {
        let raw: HashMap<String, Vec<ExternalExercise>> =
            serde_json::from_str(contents).map_err(|e| CatalogError::ParseError {
                path: "<inline>".to_string(),
                reason: e.to_string(),
            })?;

        let mut by_muscle = HashMap::with_capacity(raw.len());
        for (muscle, exercises) in raw {
            if exercises.is_empty() {
                return Err(CatalogError::EmptyEntry { muscle });
            }
            by_muscle.insert(muscle.to_lowercase(), exercises);
        }
        Ok(Self { by_muscle })
    }

    /// Curated exercises for a muscle, matched case-insensitively.
    pub fn get(&self, muscle: &str) -> Option<&[ExternalExercise]> {
        self.by_muscle
            .get(&muscle.to_lowercase())
            .map(|exercises| exercises.as_slice())
    }

    pub fn muscle_count(&self) -> usize {
        self.by_muscle.len()
    }
}

fn exercise(
    name: &str,
    kind: &str,
    equipment: &str,
    difficulty: &str,
    instructions: &str,
) -> ExternalExercise {
    ExternalExercise {
        name: name.to_string(),
        kind: kind.to_string(),
        muscle: "back".to_string(),
        equipment: equipment.to_string(),
        difficulty: difficulty.to_string(),
        instructions: instructions.to_string(),
    }
}

fn builtin_back_exercises() -> Vec<ExternalExercise> {
    vec![
        exercise(
            "Bent-Over Barbell Row",
            "strength",
            "barbell",
            "intermediate",
            "Stand with feet shoulder-width apart, holding a barbell with an overhand grip. \
             Bend at the hips and knees slightly, keeping your back straight. Pull the barbell \
             towards your lower chest, squeezing your shoulder blades together. Lower the barbell \
             back to the starting position.",
        ),
        exercise(
            "Lat Pulldown",
            "strength",
            "machine",
            "beginner",
            "Sit at a lat pulldown machine with your thighs secured under the pads. Grasp the bar \
             with a wide overhand grip. Pull the bar down towards your upper chest, squeezing your \
             shoulder blades together. Slowly return the bar to the starting position.",
        ),
        exercise(
            "Seated Cable Row",
            "strength",
            "machine",
            "beginner",
            "Sit at a cable row machine with your feet on the platform and knees slightly bent. \
             Grasp the handle with both hands. Pull the handle towards your torso, keeping your \
             back straight and squeezing your shoulder blades together. Slowly return to the \
             starting position.",
        ),
        exercise(
            "Inverted Row",
            "strength",
            "body only",
            "beginner",
            "Set a bar at waist height and lie underneath it. Grasp the bar with an overhand grip, \
             hands shoulder-width apart. Keep your body straight and pull your chest up to the \
             bar. Lower yourself back down with control.",
        ),
        exercise(
            "Superman",
            "stretching",
            "body only",
            "beginner",
            "Lie face down on the floor with arms extended in front of you. Simultaneously lift \
             your arms, chest, and legs off the ground. Hold for a few seconds, then lower back \
             down.",
        ),
        exercise(
            "One-Arm Dumbbell Row",
            "strength",
            "dumbbell",
            "beginner",
            "Place your right knee and hand on a bench, holding a dumbbell in your left hand. Keep \
             your back straight and pull the dumbbell towards your torso, squeezing your shoulder \
             blade. Lower the dumbbell back down. Repeat on the other side.",
        ),
        exercise(
            "Deadlift",
            "strength",
            "barbell",
            "intermediate",
            "Stand with feet hip-width apart, barbell over mid-foot. Bend at the hips and knees to \
             grip the barbell. Keep your back straight and lift the bar by extending your hips and \
             knees. Lower the bar back to the ground with control.",
        ),
        exercise(
            "Resistance Band Pull-Apart",
            "strength",
            "resistance band",
            "beginner",
            "Hold a resistance band with both hands at shoulder height. Pull the band apart by \
             moving your hands outward, squeezing your shoulder blades together. Return to the \
             starting position with control.",
        ),
    ]
}
