//! Static mapping tables used to translate caller vocabulary into provider
//! parameters.
//!
//! The tables are built once at startup and shared read-only (`Arc`) across
//! all requests, so lookups need no synchronization.

use crate::types::{Difficulty, Equipment, Goal};
use std::collections::HashMap;

/// Daily calories used when the goal is not in the table.
pub const DEFAULT_TARGET_CALORIES: u32 = 2000;

/// Goal → calories, fitness level → difficulty, and the equipment allow-list.
#[derive(Debug, Clone)]
pub struct MappingTables {
    goal_calories: HashMap<Goal, u32>,
    difficulty_by_level: HashMap<&'static str, Difficulty>,
    equipment_names: HashMap<&'static str, Equipment>,
}

impl MappingTables {
    /// The standard tables.
    pub fn standard() -> Self {
        let goal_calories = HashMap::from([
            (Goal::WeightLoss, 1600),
            (Goal::MaintainWeight, 2000),
            (Goal::MuscleGain, 2500),
        ]);

        let difficulty_by_level = HashMap::from([
            ("Beginner", Difficulty::Beginner),
            ("Intermediate", Difficulty::Intermediate),
            ("Advanced", Difficulty::Expert),
        ]);

        let mut equipment_names: HashMap<&'static str, Equipment> = Equipment::ALL
            .iter()
            .map(|equipment| (equipment.as_str(), *equipment))
            .collect();
        // Provider spelling, still sent by older clients
        equipment_names.insert("body only", Equipment::BodyOnly);

        Self {
            goal_calories,
            difficulty_by_level,
            equipment_names,
        }
    }

    /// Static calories for a goal, `DEFAULT_TARGET_CALORIES` when unknown.
    pub fn calories_for(&self, goal: &Goal) -> u32 {
        self.goal_calories
            .get(goal)
            .copied()
            .unwrap_or(DEFAULT_TARGET_CALORIES)
    }

    /// Unknown or missing fitness levels map to beginner.
    pub fn difficulty_for(&self, fitness_level: Option<&str>) -> Difficulty {
        fitness_level
            .and_then(|level| self.difficulty_by_level.get(level))
            .copied()
            .unwrap_or(Difficulty::Beginner)
    }

    /// `None` when the name is outside the allow-list.
    pub fn equipment_for(&self, name: &str) -> Option<Equipment> {
        self.equipment_names.get(name).copied()
    }

    /// Canonical names of the allowed equipment, for error messages.
    pub fn allowed_equipment(&self) -> Vec<&'static str> {
        Equipment::ALL.iter().map(|e| e.as_str()).collect()
    }
}

impl Default for MappingTables {
    fn default() -> Self {
        Self::standard()
    }
}
