use std::sync::Arc;

use crate::{
    api::AnalyticsApi,
    models::{ComparisonStats, ViewingStats},
    services::fallback,
    with_fallback,
};

/// Viewing analytics; answers from built-in data when the API fails
pub struct AnalyticsService {
    api: Arc<dyn AnalyticsApi>,
}

impl AnalyticsService {
    pub fn new(api: Arc<dyn AnalyticsApi>) -> Self {
        Self { api }
    }

    pub async fn viewing_stats(&self) -> ViewingStats {
        with_fallback!(
            "viewing_stats",
            self.api.viewing_stats(),
            fallback::viewing_stats()
        )
    }

    pub async fn comparison(&self) -> ComparisonStats {
        with_fallback!("comparison", self.api.comparison(), fallback::comparison())
    }
}
