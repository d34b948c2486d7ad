//! # Catalog Crate
//!
//! Domain types and the immutable reference data every flow reads:
//!
//! - **types**: exercises, meal plans, goals, difficulty and equipment
//! - **tables**: goal → calories, fitness level → difficulty, equipment allow-list
//! - **fallback**: curated exercises used when the provider returns nothing
//! - **error**: errors raised while loading the fallback catalog
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::{FallbackCatalog, MappingTables, Goal};
//!
//! let tables = MappingTables::standard();
//! let calories = tables.calories_for(&Goal::parse("Weight Loss"));
//!
//! let fallback = FallbackCatalog::builtin();
//! let back = fallback.get("back").unwrap();
//! ```

pub mod error;
pub mod fallback;
pub mod tables;
pub mod types;

// Re-export commonly used types for convenience
pub use error::{CatalogError, Result};
pub use fallback::FallbackCatalog;
pub use tables::{DEFAULT_TARGET_CALORIES, MappingTables};
pub use types::{
    Difficulty, Equipment, ExternalExercise, Goal, Meal, MealPlanResult, Nutrients,
};
