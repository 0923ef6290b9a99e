use std::sync::Arc;

use anyhow::Context;
use chrono::{Duration, Months, Utc};
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::domain::{
    entities::subscriptions::{InsertSubscriptionEntity, SubscriptionEntity},
    repositories::{plans::PlanRepository, subscriptions::SubscriptionRepository},
    value_objects::{
        enums::subscription_statuses::SubscriptionStatus, subscriptions::SubscriptionOptions,
    },
};

#[derive(Debug, Error)]
pub enum SubscriptionError {
    #[error("plan not found")]
    PlanNotFound,
    #[error("subscription not found")]
    SubscriptionNotFound,
    #[error("subscription cannot move from {from} to {to}")]
    InvalidTransition {
        from: SubscriptionStatus,
        to: SubscriptionStatus,
    },
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl SubscriptionError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            SubscriptionError::PlanNotFound | SubscriptionError::SubscriptionNotFound => {
                StatusCode::NOT_FOUND
            }
            SubscriptionError::InvalidTransition { .. } => StatusCode::CONFLICT,
            SubscriptionError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type SubscriptionResult<T> = std::result::Result<T, SubscriptionError>;

/// Ledger orchestration: subscription creation against a resolvable,
/// non-deprecated plan, and lifecycle transitions.
pub struct SubscriptionUseCase<P, S>
where
    P: PlanRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
{
    plan_repo: Arc<P>,
    subscription_repo: Arc<S>,
}

impl<P, S> SubscriptionUseCase<P, S>
where
    P: PlanRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
{
    pub fn new(plan_repo: Arc<P>, subscription_repo: Arc<S>) -> Self {
        Self {
            plan_repo,
            subscription_repo,
        }
    }

    /// A trial request against a plan whose trial policy is disabled is
    /// silently ignored: the subscription starts active and the returned
    /// entity shows `trial: false`.
    pub async fn create_subscription(
        &self,
        user_id: Uuid,
        plan_id: Uuid,
        options: SubscriptionOptions,
    ) -> SubscriptionResult<SubscriptionEntity> {
        info!(
            %user_id,
            %plan_id,
            trial_requested = options.trial,
            "subscriptions: create requested"
        );

        let plan = self
            .plan_repo
            .find_by_id(plan_id)
            .await
            .map_err(|err| {
                error!(%plan_id, store_error = ?err, "subscriptions: failed to resolve plan");
                SubscriptionError::Internal(err)
            })?
            .ok_or_else(|| {
                let err = SubscriptionError::PlanNotFound;
                warn!(
                    %user_id,
                    %plan_id,
                    status = err.status_code().as_u16(),
                    "subscriptions: plan does not exist"
                );
                err
            })?;

        if !plan.status.accepts_subscriptions() {
            let err = SubscriptionError::PlanNotFound;
            warn!(
                %user_id,
                %plan_id,
                plan_status = %plan.status,
                status = err.status_code().as_u16(),
                "subscriptions: deprecated plan refused"
            );
            return Err(err);
        }

        let cycle = options.cycle_override.unwrap_or(plan.billing.cycle);
        let now = Utc::now();

        let trial_granted = options.trial && plan.trial.enabled;
        if options.trial && !trial_granted {
            info!(
                %user_id,
                %plan_id,
                "subscriptions: trial requested on a plan without trial, starting active"
            );
        }

        let (status, next_billing_at) = if trial_granted {
            let trial_ends = now
                .checked_add_signed(Duration::days(i64::from(plan.trial.duration_days)))
                .context("failed to compute trial end date")?;
            (SubscriptionStatus::Trial, trial_ends)
        } else {
            let period_ends = now
                .checked_add_months(Months::new(cycle.months()))
                .context("failed to compute billing period end")?;
            (SubscriptionStatus::Active, period_ends)
        };

        let subscription = self
            .subscription_repo
            .insert(InsertSubscriptionEntity {
                user_id,
                plan_id,
                status,
                billing_cycle: cycle,
                next_billing_at,
                trial: trial_granted,
            })
            .await
            .map_err(|err| {
                error!(
                    %user_id,
                    %plan_id,
                    store_error = ?err,
                    "subscriptions: failed to insert subscription"
                );
                SubscriptionError::Internal(err)
            })?;

        info!(
            subscription_id = %subscription.id,
            %user_id,
            %plan_id,
            status = %subscription.status,
            billing_cycle = %subscription.billing_cycle,
            "subscriptions: created"
        );

        Ok(subscription)
    }

    pub async fn update_status(
        &self,
        subscription_id: Uuid,
        new_status: SubscriptionStatus,
    ) -> SubscriptionResult<SubscriptionEntity> {
        info!(%subscription_id, new_status = %new_status, "subscriptions: status change requested");

        let subscription = self
            .subscription_repo
            .find_by_id(subscription_id)
            .await
            .map_err(|err| {
                error!(
                    %subscription_id,
                    store_error = ?err,
                    "subscriptions: failed to load subscription"
                );
                SubscriptionError::Internal(err)
            })?
            .ok_or_else(|| {
                let err = SubscriptionError::SubscriptionNotFound;
                warn!(
                    %subscription_id,
                    status = err.status_code().as_u16(),
                    "subscriptions: status change target missing"
                );
                err
            })?;

        if !subscription.status.can_transition_to(new_status) {
            let err = SubscriptionError::InvalidTransition {
                from: subscription.status,
                to: new_status,
            };
            warn!(
                %subscription_id,
                from = %subscription.status,
                to = %new_status,
                status = err.status_code().as_u16(),
                "subscriptions: transition refused"
            );
            return Err(err);
        }

        let updated = self
            .subscription_repo
            .update_status(subscription_id, new_status)
            .await
            .map_err(|err| {
                error!(
                    %subscription_id,
                    store_error = ?err,
                    "subscriptions: failed to commit status change"
                );
                SubscriptionError::Internal(err)
            })?
            .ok_or(SubscriptionError::SubscriptionNotFound)?;

        info!(%subscription_id, status = %updated.status, "subscriptions: status changed");
        Ok(updated)
    }

    pub async fn get_subscription(
        &self,
        subscription_id: Uuid,
    ) -> SubscriptionResult<SubscriptionEntity> {
        self.subscription_repo
            .find_by_id(subscription_id)
            .await
            .map_err(SubscriptionError::Internal)?
            .ok_or(SubscriptionError::SubscriptionNotFound)
    }
}
