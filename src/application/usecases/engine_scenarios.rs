//! End-to-end scenarios over the real in-memory stores, exercising the plan
//! catalog, the ledger and analytics together.

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    application::usecases::{
        analytics::AnalyticsUseCase,
        plans::{PlanError, PlanUseCase},
        subscriptions::{SubscriptionError, SubscriptionUseCase},
    },
    domain::{
        repositories::subscriptions::SubscriptionRepository,
        value_objects::{
            enums::{
                billing_cycles::BillingCycle, currencies::Currency, plan_types::PlanType,
                subscription_statuses::SubscriptionStatus,
            },
            plans::{PlanDraft, PlanPatch, PlanPricing},
            subscriptions::SubscriptionOptions,
        },
    },
    infrastructure::memory::{
        plan_store::InMemoryPlanStore, subscription_store::InMemorySubscriptionStore,
    },
};

struct Engine {
    plans: PlanUseCase<InMemoryPlanStore, InMemorySubscriptionStore>,
    subscriptions: SubscriptionUseCase<InMemoryPlanStore, InMemorySubscriptionStore>,
    analytics: AnalyticsUseCase<InMemoryPlanStore, InMemorySubscriptionStore>,
    subscription_store: Arc<InMemorySubscriptionStore>,
}

fn engine() -> Engine {
    let plan_store = Arc::new(InMemoryPlanStore::new());
    let subscription_store = Arc::new(InMemorySubscriptionStore::new());

    Engine {
        plans: PlanUseCase::new(Arc::clone(&plan_store), Arc::clone(&subscription_store)),
        subscriptions: SubscriptionUseCase::new(
            Arc::clone(&plan_store),
            Arc::clone(&subscription_store),
        ),
        analytics: AnalyticsUseCase::new(Arc::clone(&plan_store), Arc::clone(&subscription_store)),
        subscription_store,
    }
}

fn draft(name: &str, monthly: f64, yearly: f64) -> PlanDraft {
    PlanDraft {
        name: name.to_string(),
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
    }
}

#[tokio::test]
async fn basique_plan_single_subscriber() {
    let engine = engine();

    let plan = engine
        .plans
        .create_plan(draft("Basique", 29.0, 290.0))
        .await
        .unwrap();

    engine
        .subscriptions
        .create_subscription(Uuid::new_v4(), plan.id, Default::default())
        .await
        .unwrap();

    let snapshot = engine.analytics.snapshot().await.unwrap();
    assert_eq!(snapshot.total_subscriptions, 1);
    assert_eq!(snapshot.active_subscriptions, 1);
    assert!((snapshot.mrr - 29.0).abs() < 1e-9);
    assert!((snapshot.arr - 348.0).abs() < 1e-9);
}

#[tokio::test]
async fn mixed_cycles_amortize_into_mrr() {
    let engine = engine();

    let monthly_plan = engine
        .plans
        .create_plan(draft("Basique", 29.0, 290.0))
        .await
        .unwrap();
    let yearly_plan = engine
        .plans
        .create_plan(draft("Annuel", 99.0, 990.0))
        .await
        .unwrap();

    for _ in 0..2 {
        engine
            .subscriptions
            .create_subscription(Uuid::new_v4(), monthly_plan.id, Default::default())
            .await
            .unwrap();
    }
    engine
        .subscriptions
        .create_subscription(
            Uuid::new_v4(),
            yearly_plan.id,
            SubscriptionOptions {
                trial: false,
                cycle_override: Some(BillingCycle::Yearly),
            },
        )
        .await
        .unwrap();

    let snapshot = engine.analytics.snapshot().await.unwrap();
    assert!((snapshot.mrr - (29.0 + 29.0 + 990.0 / 12.0)).abs() < 1e-9);
    assert!((snapshot.arr - snapshot.mrr * 12.0).abs() < 1e-9);
}

#[tokio::test]
async fn referenced_plan_survives_delete_attempt() {
    let engine = engine();

    let plan = engine
        .plans
        .create_plan(draft("Basique", 29.0, 290.0))
        .await
        .unwrap();

    for _ in 0..2 {
        engine
            .subscriptions
            .create_subscription(Uuid::new_v4(), plan.id, Default::default())
            .await
            .unwrap();
    }

    let err = engine.plans.delete_plan(plan.id).await.unwrap_err();
    assert!(matches!(
        err,
        PlanError::Conflict {
            subscription_count: 2
        }
    ));

    let listed = engine.plans.list_plans().await.unwrap();
    assert!(listed.iter().any(|p| p.id == plan.id));
}

#[tokio::test]
async fn unknown_plan_leaves_ledger_untouched() {
    let engine = engine();

    let err = engine
        .subscriptions
        .create_subscription(Uuid::new_v4(), Uuid::new_v4(), Default::default())
        .await
        .unwrap_err();

    assert!(matches!(err, SubscriptionError::PlanNotFound));
    assert!(engine.subscription_store.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn canceled_history_still_blocks_delete() {
    let engine = engine();

    let plan = engine
        .plans
        .create_plan(draft("Basique", 29.0, 290.0))
        .await
        .unwrap();
    let subscription = engine
        .subscriptions
        .create_subscription(Uuid::new_v4(), plan.id, Default::default())
        .await
        .unwrap();

    engine
        .subscriptions
        .update_status(subscription.id, SubscriptionStatus::PastDue)
        .await
        .unwrap();
    engine
        .subscriptions
        .update_status(subscription.id, SubscriptionStatus::Canceled)
        .await
        .unwrap();

    let err = engine.plans.delete_plan(plan.id).await.unwrap_err();
    assert!(matches!(err, PlanError::Conflict { .. }));

    // The canceled row still counts in totals but not in revenue.
    let snapshot = engine.analytics.snapshot().await.unwrap();
    assert_eq!(snapshot.total_subscriptions, 1);
    assert_eq!(snapshot.active_subscriptions, 0);
    assert!((snapshot.mrr).abs() < 1e-9);
}

#[tokio::test]
async fn patch_then_delete_roundtrip() {
    let engine = engine();

    let plan = engine
        .plans
        .create_plan(draft("Basique", 29.0, 290.0))
        .await
        .unwrap();

    let patched = engine
        .plans
        .update_plan(
            plan.id,
            PlanPatch {
                name: Some("Basique v2".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(patched.name, "Basique v2");
    assert_eq!(patched.pricing, plan.pricing);
    assert_eq!(patched.created_at, plan.created_at);

    engine.plans.delete_plan(plan.id).await.unwrap();
    let err = engine.plans.get_plan(plan.id).await.unwrap_err();
    assert!(matches!(err, PlanError::PlanNotFound));
}
