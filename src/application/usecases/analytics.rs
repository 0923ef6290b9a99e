use std::{collections::HashMap, sync::Arc};

use anyhow::Result;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::{
    entities::plans::PlanEntity,
    repositories::{plans::PlanRepository, subscriptions::SubscriptionRepository},
    value_objects::{analytics::AnalyticsSnapshot, enums::billing_cycles::BillingCycle},
};

/// Derives MRR/ARR over the whole ledger. Yearly-billed subscriptions are
/// amortized (yearly price / 12) into MRR; ARR is MRR x 12.
pub struct AnalyticsUseCase<P, S>
where
    P: PlanRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
{
    plan_repo: Arc<P>,
    subscription_repo: Arc<S>,
}

impl<P, S> AnalyticsUseCase<P, S>
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

    pub async fn snapshot(&self) -> Result<AnalyticsSnapshot> {
        let subscriptions = self.subscription_repo.list_all().await?;

        let mut plan_cache: HashMap<Uuid, PlanEntity> = HashMap::new();
        let mut active_subscriptions = 0usize;
        let mut mrr = 0.0f64;

        for subscription in &subscriptions {
            if !subscription.status.is_billable() {
                continue;
            }
            active_subscriptions += 1;

            if !plan_cache.contains_key(&subscription.plan_id) {
                match self.plan_repo.find_by_id(subscription.plan_id).await? {
                    Some(plan) => {
                        plan_cache.insert(subscription.plan_id, plan);
                    }
                    None => {
                        // Delete-if-unreferenced makes this unreachable in
                        // normal operation.
                        warn!(
                            subscription_id = %subscription.id,
                            plan_id = %subscription.plan_id,
                            "analytics: subscription references a missing plan, skipped"
                        );
                        continue;
                    }
                }
            }
            let Some(plan) = plan_cache.get(&subscription.plan_id) else {
                continue;
            };

            mrr += match subscription.billing_cycle {
                BillingCycle::Monthly => plan.pricing.monthly,
                BillingCycle::Yearly => plan.pricing.yearly / 12.0,
            };
        }

        let snapshot = AnalyticsSnapshot {
            total_subscriptions: subscriptions.len(),
            active_subscriptions,
            mrr,
            arr: mrr * 12.0,
        };

        info!(
            total = snapshot.total_subscriptions,
            active = snapshot.active_subscriptions,
            mrr = snapshot.mrr,
            arr = snapshot.arr,
            "analytics: snapshot computed"
        );

        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        entities::subscriptions::SubscriptionEntity,
        repositories::{plans::MockPlanRepository, subscriptions::MockSubscriptionRepository},
        value_objects::{
            enums::{
                currencies::Currency, plan_types::PlanType,
                subscription_statuses::SubscriptionStatus,
            },
            plans::{PlanDraft, PlanPricing},
        },
    };
    use chrono::Utc;

    fn priced_plan(monthly: f64, yearly: f64) -> PlanEntity {
        PlanEntity::from_draft(
            Uuid::new_v4(),
            PlanDraft {
                name: "Plan".to_string(),
                description: String::new(),
                plan_type: PlanType::Basic,
                status: Default::default(),
                pricing: PlanPricing {
                    monthly,
                    yearly,
                    currency: Currency::Eur,
                },
                features: Vec::new(),
                limitations: Vec::new(),
                permissions: Vec::new(),
                trial: Default::default(),
                billing: Default::default(),
                metadata: Default::default(),
                created_by: "admin".to_string(),
            },
            Utc::now(),
        )
    }

    fn subscription(
        plan_id: Uuid,
        status: SubscriptionStatus,
        cycle: BillingCycle,
    ) -> SubscriptionEntity {
        let now = Utc::now();
        SubscriptionEntity {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            plan_id,
            status,
            billing_cycle: cycle,
            next_billing_at: now,
            trial: status == SubscriptionStatus::Trial,
            created_at: now,
        }
    }

    #[tokio::test]
    async fn amortizes_yearly_plans_into_mrr() {
        let mut plan_repo = MockPlanRepository::new();
        let mut subscription_repo = MockSubscriptionRepository::new();

        let monthly_plan = priced_plan(29.0, 290.0);
        let yearly_plan = priced_plan(99.0, 990.0);
        let monthly_id = monthly_plan.id;
        let yearly_id = yearly_plan.id;

        let subs = vec![
            subscription(monthly_id, SubscriptionStatus::Active, BillingCycle::Monthly),
            subscription(monthly_id, SubscriptionStatus::Active, BillingCycle::Monthly),
            subscription(yearly_id, SubscriptionStatus::Active, BillingCycle::Yearly),
        ];
        subscription_repo
            .expect_list_all()
            .returning(move || Ok(subs.clone()));
        plan_repo.expect_find_by_id().returning(move |id| {
            let plan = if id == monthly_id {
                monthly_plan.clone()
            } else {
                yearly_plan.clone()
            };
            Ok(Some(plan))
        });

        let usecase = AnalyticsUseCase::new(Arc::new(plan_repo), Arc::new(subscription_repo));
        let snapshot = usecase.snapshot().await.unwrap();

        assert_eq!(snapshot.total_subscriptions, 3);
        assert_eq!(snapshot.active_subscriptions, 3);
        assert!((snapshot.mrr - (29.0 + 29.0 + 990.0 / 12.0)).abs() < 1e-9);
        assert!((snapshot.arr - snapshot.mrr * 12.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn non_billable_statuses_count_only_in_total() {
        let mut plan_repo = MockPlanRepository::new();
        let mut subscription_repo = MockSubscriptionRepository::new();

        let plan = priced_plan(29.0, 290.0);
        let plan_id = plan.id;

        let subs = vec![
            subscription(plan_id, SubscriptionStatus::Trial, BillingCycle::Monthly),
            subscription(plan_id, SubscriptionStatus::PastDue, BillingCycle::Monthly),
            subscription(plan_id, SubscriptionStatus::Canceled, BillingCycle::Monthly),
            subscription(plan_id, SubscriptionStatus::Expired, BillingCycle::Monthly),
        ];
        subscription_repo
            .expect_list_all()
            .returning(move || Ok(subs.clone()));
        plan_repo
            .expect_find_by_id()
            .returning(move |_| Ok(Some(plan.clone())));

        let usecase = AnalyticsUseCase::new(Arc::new(plan_repo), Arc::new(subscription_repo));
        let snapshot = usecase.snapshot().await.unwrap();

        assert_eq!(snapshot.total_subscriptions, 4);
        assert_eq!(snapshot.active_subscriptions, 1);
        assert!((snapshot.mrr - 29.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn empty_ledger_yields_zero_snapshot() {
        let plan_repo = MockPlanRepository::new();
        let mut subscription_repo = MockSubscriptionRepository::new();

        subscription_repo
            .expect_list_all()
            .returning(|| Ok(Vec::new()));

        let usecase = AnalyticsUseCase::new(Arc::new(plan_repo), Arc::new(subscription_repo));
        let snapshot = usecase.snapshot().await.unwrap();

        assert_eq!(snapshot, AnalyticsSnapshot::default());
    }
}
