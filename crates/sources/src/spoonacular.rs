//! Meal-planning provider backed by the Spoonacular meal planner.
//!
//! `GET {base}/mealplanner/generate?timeFrame=day&targetCalories=..&diet=..&exclude=..&apiKey=..`
//!
//! Only `meals` and `nutrients` are read from the reply.

use async_trait::async_trait;
use catalog::MealPlanResult;
use reqwest::Client;
use tracing::{info, instrument};

use crate::error::Result;
use crate::http::{ProviderConfig, build_client, send_json};
use crate::traits::{MealPlanProvider, MealQuery};

const PROVIDER_NAME: &str = "spoonacular";

/// HTTP meal-plan provider
#[derive(Clone)]
pub struct SpoonacularMealPlans {
    client: Client,
    config: ProviderConfig,
}

impl SpoonacularMealPlans {
    pub fn new(config: ProviderConfig) -> Result<Self> {
        let client = build_client(PROVIDER_NAME, config.timeout)?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl MealPlanProvider for SpoonacularMealPlans {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    #[instrument(skip(self), fields(target_calories = query.target_calories))]
    async fn generate_plan(&self, query: &MealQuery) -> Result<MealPlanResult> {
        let target_calories = query.target_calories.to_string();
        let request = self
            .client
            .get(self.config.endpoint("/mealplanner/generate"))
            .query(&[
                ("timeFrame", "day"),
                ("targetCalories", target_calories.as_str()),
                ("diet", query.diet.as_str()),
                ("exclude", query.exclude.as_str()),
                ("apiKey", self.config.api_key.as_str()),
            ]);

        let plan: MealPlanResult = send_json(PROVIDER_NAME, request).await?;
        info!("Received meal plan with {} meals", plan.meals.len());
        Ok(plan)
    }
}
