use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    application::usecases::plans::{PlanError, PlanUseCase},
    domain::{
        repositories::{plans::PlanRepository, subscriptions::SubscriptionRepository},
        value_objects::plans::{PlanDraft, PlanPatch},
    },
    infrastructure::memory::{
        plan_store::InMemoryPlanStore, subscription_store::InMemorySubscriptionStore,
    },
};

pub fn routes(
    plan_store: Arc<InMemoryPlanStore>,
    subscription_store: Arc<InMemorySubscriptionStore>,
) -> Router {
    let plan_usecase = PlanUseCase::new(plan_store, subscription_store);

    Router::new()
        .route("/", post(create_plan).get(list_plans))
        .route(
            "/:plan_id",
            get(get_plan).patch(update_plan).delete(delete_plan),
        )
        .with_state(Arc::new(plan_usecase))
}

pub async fn create_plan<P, S>(
    State(plan_usecase): State<Arc<PlanUseCase<P, S>>>,
    Json(draft): Json<PlanDraft>,
) -> Result<impl IntoResponse, PlanError>
where
    P: PlanRepository + Send + Sync,
    S: SubscriptionRepository + Send + Sync,
{
    let plan = plan_usecase.create_plan(draft).await?;
    Ok((StatusCode::CREATED, Json(plan)))
}

pub async fn list_plans<P, S>(
    State(plan_usecase): State<Arc<PlanUseCase<P, S>>>,
) -> Result<impl IntoResponse, PlanError>
where
    P: PlanRepository + Send + Sync,
    S: SubscriptionRepository + Send + Sync,
{
    let plans = plan_usecase.list_plans().await?;
    Ok(Json(plans))
}

pub async fn get_plan<P, S>(
    State(plan_usecase): State<Arc<PlanUseCase<P, S>>>,
    Path(plan_id): Path<Uuid>,
) -> Result<impl IntoResponse, PlanError>
where
    P: PlanRepository + Send + Sync,
    S: SubscriptionRepository + Send + Sync,
{
    let plan = plan_usecase.get_plan(plan_id).await?;
    Ok(Json(plan))
}

pub async fn update_plan<P, S>(
    State(plan_usecase): State<Arc<PlanUseCase<P, S>>>,
    Path(plan_id): Path<Uuid>,
    Json(patch): Json<PlanPatch>,
) -> Result<impl IntoResponse, PlanError>
where
    P: PlanRepository + Send + Sync,
    S: SubscriptionRepository + Send + Sync,
{
    let plan = plan_usecase.update_plan(plan_id, patch).await?;
    Ok(Json(plan))
}

pub async fn delete_plan<P, S>(
    State(plan_usecase): State<Arc<PlanUseCase<P, S>>>,
    Path(plan_id): Path<Uuid>,
) -> Result<impl IntoResponse, PlanError>
where
    P: PlanRepository + Send + Sync,
    S: SubscriptionRepository + Send + Sync,
{
    plan_usecase.delete_plan(plan_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
