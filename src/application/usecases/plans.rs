use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::domain::{
    entities::plans::PlanEntity,
    repositories::{plans::PlanRepository, subscriptions::SubscriptionRepository},
    value_objects::plans::{PlanDraft, PlanFeature, PlanLimitation, PlanPatch, PlanPricing, PlanValidation},
};

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("plan validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),
    #[error("plan not found")]
    PlanNotFound,
    #[error("plan has {subscription_count} subscription(s) referencing it")]
    Conflict { subscription_count: usize },
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl PlanError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            PlanError::Validation(_) => StatusCode::BAD_REQUEST,
            PlanError::PlanNotFound => StatusCode::NOT_FOUND,
            PlanError::Conflict { .. } => StatusCode::CONFLICT,
            PlanError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type PlanResult<T> = std::result::Result<T, PlanError>;

/// Plan catalog orchestration: validation, CRUD, and the
/// delete-only-if-unreferenced rule.
pub struct PlanUseCase<P, S>
where
    P: PlanRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
{
    plan_repo: Arc<P>,
    subscription_repo: Arc<S>,
}

impl<P, S> PlanUseCase<P, S>
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

    /// Collects every rule violation so a caller can display them together.
    /// Currency membership needs no rule here: `Currency` is a closed enum
    /// and unsupported codes never deserialize.
    pub fn validate_plan(draft: &PlanDraft) -> PlanValidation {
        PlanValidation::from_errors(collect_violations(
            &draft.name,
            &draft.pricing,
            &draft.features,
            &draft.limitations,
        ))
    }

    pub async fn create_plan(&self, draft: PlanDraft) -> PlanResult<PlanEntity> {
        info!(plan_name = %draft.name, "plans: create requested");

        let validation = Self::validate_plan(&draft);
        if !validation.valid {
            let err = PlanError::Validation(validation.errors);
            warn!(
                plan_name = %draft.name,
                status = err.status_code().as_u16(),
                %err,
                "plans: draft rejected"
            );
            return Err(err);
        }

        let plan = self.plan_repo.create(draft).await.map_err(|err| {
            error!(store_error = ?err, "plans: failed to store new plan");
            PlanError::Internal(err)
        })?;

        info!(plan_id = %plan.id, plan_name = %plan.name, "plans: created");
        Ok(plan)
    }

    /// Merges the typed patch into the stored plan and re-validates the
    /// merged result before committing. No partial write on failure.
    pub async fn update_plan(&self, plan_id: Uuid, patch: PlanPatch) -> PlanResult<PlanEntity> {
        info!(%plan_id, "plans: update requested");

        let existing = self
            .plan_repo
            .find_by_id(plan_id)
            .await
            .map_err(|err| {
                error!(%plan_id, store_error = ?err, "plans: failed to load plan for update");
                PlanError::Internal(err)
            })?
            .ok_or_else(|| {
                let err = PlanError::PlanNotFound;
                warn!(%plan_id, status = err.status_code().as_u16(), "plans: update target missing");
                err
            })?;

        let merged = existing.merged_with(&patch);
        let violations = collect_violations(
            &merged.name,
            &merged.pricing,
            &merged.features,
            &merged.limitations,
        );
        if !violations.is_empty() {
            let err = PlanError::Validation(violations);
            warn!(
                %plan_id,
                status = err.status_code().as_u16(),
                %err,
                "plans: merged update rejected"
            );
            return Err(err);
        }

        let updated = self
            .plan_repo
            .update(plan_id, merged)
            .await
            .map_err(|err| {
                error!(%plan_id, store_error = ?err, "plans: failed to commit update");
                PlanError::Internal(err)
            })?
            .ok_or(PlanError::PlanNotFound)?;

        info!(%plan_id, "plans: updated");
        Ok(updated)
    }

    /// Deletion is rejected while any subscription references the plan,
    /// including canceled history: the ledger never forgets and analytics
    /// must keep resolving plans.
    pub async fn delete_plan(&self, plan_id: Uuid) -> PlanResult<()> {
        info!(%plan_id, "plans: delete requested");

        if self
            .plan_repo
            .find_by_id(plan_id)
            .await
            .map_err(|err| {
                error!(%plan_id, store_error = ?err, "plans: failed to load plan for delete");
                PlanError::Internal(err)
            })?
            .is_none()
        {
            let err = PlanError::PlanNotFound;
            warn!(%plan_id, status = err.status_code().as_u16(), "plans: delete target missing");
            return Err(err);
        }

        let references = self
            .subscription_repo
            .find_by_plan(plan_id)
            .await
            .map_err(|err| {
                error!(%plan_id, store_error = ?err, "plans: failed to check plan references");
                PlanError::Internal(err)
            })?;

        if !references.is_empty() {
            let err = PlanError::Conflict {
                subscription_count: references.len(),
            };
            warn!(
                %plan_id,
                subscription_count = references.len(),
                status = err.status_code().as_u16(),
                "plans: delete blocked by subscriptions"
            );
            return Err(err);
        }

        let deleted = self.plan_repo.delete(plan_id).await.map_err(|err| {
            error!(%plan_id, store_error = ?err, "plans: failed to delete plan");
            PlanError::Internal(err)
        })?;

        if !deleted {
            return Err(PlanError::PlanNotFound);
        }

        info!(%plan_id, "plans: deleted");
        Ok(())
    }

    pub async fn get_plan(&self, plan_id: Uuid) -> PlanResult<PlanEntity> {
        self.plan_repo
            .find_by_id(plan_id)
            .await
            .map_err(PlanError::Internal)?
            .ok_or(PlanError::PlanNotFound)
    }

    pub async fn list_plans(&self) -> PlanResult<Vec<PlanEntity>> {
        let plans = self.plan_repo.list().await.map_err(|err| {
            error!(store_error = ?err, "plans: failed to list plans");
            PlanError::Internal(err)
        })?;
        info!(plan_count = plans.len(), "plans: listed");
        Ok(plans)
    }
}

fn collect_violations(
    name: &str,
    pricing: &PlanPricing,
    features: &[PlanFeature],
    limitations: &[PlanLimitation],
) -> Vec<String> {
    let mut errors = Vec::new();

    if name.trim().is_empty() {
        errors.push("name must not be empty".to_string());
    }
    if !pricing.monthly.is_finite() || pricing.monthly < 0.0 {
        errors.push("monthly price must be a non-negative number".to_string());
    }
    if !pricing.yearly.is_finite() || pricing.yearly < 0.0 {
        errors.push("yearly price must be a non-negative number".to_string());
    }
    for limitation in limitations {
        if !limitation.unlimited && limitation.value < 0.0 {
            errors.push(format!(
                "limitation \"{}\" must have a non-negative value",
                limitation.name
            ));
        }
    }
    for feature in features {
        if feature.name.trim().is_empty() {
            errors.push(format!("feature \"{}\" must have a name", feature.id));
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        entities::subscriptions::SubscriptionEntity,
        repositories::{plans::MockPlanRepository, subscriptions::MockSubscriptionRepository},
        value_objects::enums::{
            billing_cycles::BillingCycle, currencies::Currency, plan_types::PlanType,
            subscription_statuses::SubscriptionStatus,
        },
    };
    use chrono::Utc;
    use mockall::predicate::eq;

    fn sample_draft(name: &str) -> PlanDraft {
        PlanDraft {
            name: name.to_string(),
            description: "Starter tier".to_string(),
            plan_type: PlanType::Basic,
            status: Default::default(),
            pricing: PlanPricing {
                monthly: 29.0,
                yearly: 290.0,
                currency: Currency::Eur,
            },
            features: Vec::new(),
            limitations: Vec::new(),
            permissions: Vec::new(),
            trial: Default::default(),
            billing: Default::default(),
            metadata: Default::default(),
            created_by: "admin".to_string(),
        }
    }

    fn sample_plan(id: Uuid, draft: PlanDraft) -> PlanEntity {
        PlanEntity::from_draft(id, draft, Utc::now())
    }

    fn sample_subscription(plan_id: Uuid) -> SubscriptionEntity {
        let now = Utc::now();
        SubscriptionEntity {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            plan_id,
            status: SubscriptionStatus::Active,
            billing_cycle: BillingCycle::Monthly,
            next_billing_at: now,
            trial: false,
            created_at: now,
        }
    }

    #[tokio::test]
    async fn creates_valid_plan() {
        let mut plan_repo = MockPlanRepository::new();
        let subscription_repo = MockSubscriptionRepository::new();

        let draft = sample_draft("Basique");
        let stored = sample_plan(Uuid::new_v4(), draft.clone());
        let returned = stored.clone();

        plan_repo
            .expect_create()
            .with(eq(draft.clone()))
            .returning(move |_| Ok(returned.clone()));

        let usecase = PlanUseCase::new(Arc::new(plan_repo), Arc::new(subscription_repo));
        let plan = usecase.create_plan(draft.clone()).await.unwrap();

        assert_eq!(plan.name, draft.name);
        assert_eq!(plan.pricing, draft.pricing);
        assert_eq!(plan.created_at, plan.updated_at);
    }

    #[tokio::test]
    async fn rejects_empty_name_with_named_violation() {
        let plan_repo = MockPlanRepository::new();
        let subscription_repo = MockSubscriptionRepository::new();

        let usecase = PlanUseCase::new(Arc::new(plan_repo), Arc::new(subscription_repo));
        let err = usecase.create_plan(sample_draft("   ")).await.unwrap_err();

        match err {
            PlanError::Validation(errors) => {
                assert!(errors.iter().any(|e| e.contains("name")));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn collects_all_violations_at_once() {
        let mut draft = sample_draft("");
        draft.pricing.monthly = -1.0;
        draft.pricing.yearly = f64::NAN;
        draft.features.push(PlanFeature {
            id: "f1".to_string(),
            name: String::new(),
            description: String::new(),
            category: Default::default(),
            enabled: true,
            unlimited: None,
        });

        let validation = PlanUseCase::<MockPlanRepository, MockSubscriptionRepository>::validate_plan(&draft);

        assert!(!validation.valid);
        assert_eq!(validation.errors.len(), 4);
    }

    #[tokio::test]
    async fn update_changes_only_patched_fields() {
        let mut plan_repo = MockPlanRepository::new();
        let subscription_repo = MockSubscriptionRepository::new();

        let plan_id = Uuid::new_v4();
        let existing = sample_plan(plan_id, sample_draft("Basique"));
        let before = existing.clone();

        plan_repo
            .expect_find_by_id()
            .with(eq(plan_id))
            .returning(move |_| Ok(Some(existing.clone())));
        plan_repo
            .expect_update()
            .withf(move |id, merged| {
                *id == plan_id
                    && merged.name == "Premium"
                    && merged.description == before.description
                    && merged.pricing == before.pricing
                    && merged.plan_type == before.plan_type
                    && merged.created_at == before.created_at
            })
            .returning(|_, merged| Ok(Some(merged)));

        let usecase = PlanUseCase::new(Arc::new(plan_repo), Arc::new(subscription_repo));
        let patch = PlanPatch {
            name: Some("Premium".to_string()),
            ..Default::default()
        };
        let updated = usecase.update_plan(plan_id, patch).await.unwrap();

        assert_eq!(updated.name, "Premium");
    }

    #[tokio::test]
    async fn update_rejects_invalid_merge_result() {
        let mut plan_repo = MockPlanRepository::new();
        let subscription_repo = MockSubscriptionRepository::new();

        let plan_id = Uuid::new_v4();
        let existing = sample_plan(plan_id, sample_draft("Basique"));

        plan_repo
            .expect_find_by_id()
            .with(eq(plan_id))
            .returning(move |_| Ok(Some(existing.clone())));

        let usecase = PlanUseCase::new(Arc::new(plan_repo), Arc::new(subscription_repo));
        let patch = PlanPatch {
            name: Some(String::new()),
            ..Default::default()
        };
        let err = usecase.update_plan(plan_id, patch).await.unwrap_err();

        assert!(matches!(err, PlanError::Validation(_)));
    }

    #[tokio::test]
    async fn update_unknown_plan_is_not_found() {
        let mut plan_repo = MockPlanRepository::new();
        let subscription_repo = MockSubscriptionRepository::new();

        plan_repo
            .expect_find_by_id()
            .returning(|_| Ok(None));

        let usecase = PlanUseCase::new(Arc::new(plan_repo), Arc::new(subscription_repo));
        let err = usecase
            .update_plan(Uuid::new_v4(), PlanPatch::default())
            .await
            .unwrap_err();

        assert!(matches!(err, PlanError::PlanNotFound));
    }

    #[tokio::test]
    async fn delete_unreferenced_plan_succeeds() {
        let mut plan_repo = MockPlanRepository::new();
        let mut subscription_repo = MockSubscriptionRepository::new();

        let plan_id = Uuid::new_v4();
        let existing = sample_plan(plan_id, sample_draft("Basique"));

        plan_repo
            .expect_find_by_id()
            .with(eq(plan_id))
            .returning(move |_| Ok(Some(existing.clone())));
        subscription_repo
            .expect_find_by_plan()
            .with(eq(plan_id))
            .returning(|_| Ok(Vec::new()));
        plan_repo
            .expect_delete()
            .with(eq(plan_id))
            .returning(|_| Ok(true));

        let usecase = PlanUseCase::new(Arc::new(plan_repo), Arc::new(subscription_repo));
        usecase.delete_plan(plan_id).await.unwrap();
    }

    #[tokio::test]
    async fn delete_referenced_plan_conflicts() {
        let mut plan_repo = MockPlanRepository::new();
        let mut subscription_repo = MockSubscriptionRepository::new();

        let plan_id = Uuid::new_v4();
        let existing = sample_plan(plan_id, sample_draft("Basique"));

        plan_repo
            .expect_find_by_id()
            .with(eq(plan_id))
            .returning(move |_| Ok(Some(existing.clone())));
        subscription_repo
            .expect_find_by_plan()
            .with(eq(plan_id))
            .returning(move |_| Ok(vec![sample_subscription(plan_id), sample_subscription(plan_id)]));

        let usecase = PlanUseCase::new(Arc::new(plan_repo), Arc::new(subscription_repo));
        let err = usecase.delete_plan(plan_id).await.unwrap_err();

        assert!(matches!(
            err,
            PlanError::Conflict {
                subscription_count: 2
            }
        ));
    }
}
