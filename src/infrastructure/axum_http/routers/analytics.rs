use std::sync::Arc;

use axum::{
    Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::get,
};
use tracing::error;

use crate::{
    application::usecases::analytics::AnalyticsUseCase,
    domain::repositories::{plans::PlanRepository, subscriptions::SubscriptionRepository},
    infrastructure::memory::{
        plan_store::InMemoryPlanStore, subscription_store::InMemorySubscriptionStore,
    },
};

pub fn routes(
    plan_store: Arc<InMemoryPlanStore>,
    subscription_store: Arc<InMemorySubscriptionStore>,
) -> Router {
    let analytics_usecase = AnalyticsUseCase::new(plan_store, subscription_store);

    Router::new()
        .route("/subscriptions", get(subscription_analytics))
        .with_state(Arc::new(analytics_usecase))
}

pub async fn subscription_analytics<P, S>(
    State(analytics_usecase): State<Arc<AnalyticsUseCase<P, S>>>,
) -> impl IntoResponse
where
    P: PlanRepository + Send + Sync,
    S: SubscriptionRepository + Send + Sync,
{
    match analytics_usecase.snapshot().await {
        Ok(snapshot) => Json(snapshot).into_response(),
        Err(err) => {
            error!(error = ?err, "analytics: snapshot failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
        }
    }
}
