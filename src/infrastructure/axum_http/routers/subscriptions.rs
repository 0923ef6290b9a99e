use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{patch, post},
};
use uuid::Uuid;

use crate::{
    application::usecases::subscriptions::{SubscriptionError, SubscriptionUseCase},
    domain::{
        repositories::{plans::PlanRepository, subscriptions::SubscriptionRepository},
        value_objects::subscriptions::{
            InsertSubscriptionModel, SubscriptionOptions, UpdateSubscriptionStatusModel,
        },
    },
    infrastructure::memory::{
        plan_store::InMemoryPlanStore, subscription_store::InMemorySubscriptionStore,
    },
};

pub fn routes(
    plan_store: Arc<InMemoryPlanStore>,
    subscription_store: Arc<InMemorySubscriptionStore>,
) -> Router {
    let subscription_usecase = SubscriptionUseCase::new(plan_store, subscription_store);

    Router::new()
        .route("/", post(create_subscription))
        .route("/:subscription_id/status", patch(update_status))
        .with_state(Arc::new(subscription_usecase))
}

pub async fn create_subscription<P, S>(
    State(subscription_usecase): State<Arc<SubscriptionUseCase<P, S>>>,
    Json(model): Json<InsertSubscriptionModel>,
) -> Result<impl IntoResponse, SubscriptionError>
where
    P: PlanRepository + Send + Sync,
    S: SubscriptionRepository + Send + Sync,
{
    let subscription = subscription_usecase
        .create_subscription(
            model.user_id,
            model.plan_id,
            SubscriptionOptions {
                trial: model.trial,
                cycle_override: model.cycle,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(subscription)))
}

pub async fn update_status<P, S>(
    State(subscription_usecase): State<Arc<SubscriptionUseCase<P, S>>>,
    Path(subscription_id): Path<Uuid>,
    Json(model): Json<UpdateSubscriptionStatusModel>,
) -> Result<impl IntoResponse, SubscriptionError>
where
    P: PlanRepository + Send + Sync,
    S: SubscriptionRepository + Send + Sync,
{
    let subscription = subscription_usecase
        .update_status(subscription_id, model.status)
        .await?;
    Ok(Json(subscription))
}
