//! # Sources Crate
//!
//! The provider gateway: outbound calls to the external data providers.
//!
//! ## Components
//!
//! ### Exercise provider
//! One lookup per muscle group against the exercise catalog
//! (`ApiNinjasExercises`). An empty list is a normal answer.
//!
//! ### Meal-plan provider
//! A single day plan for a calorie target and diet (`SpoonacularMealPlans`).
//!
//! Both sit behind traits (`ExerciseProvider`, `MealPlanProvider`) so the
//! orchestrator can be driven by in-memory providers in tests. Any transport,
//! status or decoding failure surfaces as a `ProviderError`; there are no
//! retries at this layer.
//!
//! ## Example Usage
//!
//! ```ignore
//! use sources::{ApiNinjasExercises, ExerciseProvider, ExerciseQuery, ProviderConfig};
//!
//! let provider = ApiNinjasExercises::new(ProviderConfig::new(
//!     "https://api.api-ninjas.com",
//!     api_key,
//! ))?;
//! let exercises = provider.fetch_exercises(&query).await?;
//! ```

pub mod api_ninjas;
pub mod error;
pub mod http;
pub mod spoonacular;
pub mod traits;

// Re-export commonly used types
pub use api_ninjas::ApiNinjasExercises;
pub use error::{ProviderError, Result};
pub use http::ProviderConfig;
pub use spoonacular::SpoonacularMealPlans;
pub use traits::{ExerciseProvider, ExerciseQuery, MealPlanProvider, MealQuery};
