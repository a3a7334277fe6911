use std::sync::Arc;

use nutrition_advisor_core::application::NutritionAdvisorService;

use crate::args::Args;

#[derive(Clone)]
pub struct AppState {
    pub args: Arc<Args>,
    pub service: NutritionAdvisorService,
}

impl AppState {
    pub fn new(args: Arc<Args>, service: NutritionAdvisorService) -> Self {
        Self { args, service }
    }
}
