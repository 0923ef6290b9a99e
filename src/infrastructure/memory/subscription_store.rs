use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::{
    entities::subscriptions::{InsertSubscriptionEntity, SubscriptionEntity},
    repositories::subscriptions::SubscriptionRepository,
    value_objects::enums::subscription_statuses::SubscriptionStatus,
};

#[derive(Default)]
struct SubscriptionTable {
    rows: HashMap<Uuid, SubscriptionEntity>,
    /// Creation order, also serves as the audit trail: rows are never
    /// removed.
    order: Vec<Uuid>,
    by_plan: HashMap<Uuid, Vec<Uuid>>,
}

/// In-memory subscription ledger, indexed by plan for reference checks.
/// There is deliberately no delete: canceled and expired subscriptions stay
/// visible to audit and analytics.
#[derive(Default)]
pub struct InMemorySubscriptionStore {
    table: RwLock<SubscriptionTable>,
}

impl InMemorySubscriptionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SubscriptionRepository for InMemorySubscriptionStore {
    async fn insert(&self, entity: InsertSubscriptionEntity) -> Result<SubscriptionEntity> {
        let mut table = self.table.write().await;

        let subscription = SubscriptionEntity {
            id: Uuid::new_v4(),
            user_id: entity.user_id,
            plan_id: entity.plan_id,
            status: entity.status,
            billing_cycle: entity.billing_cycle,
            next_billing_at: entity.next_billing_at,
            trial: entity.trial,
            created_at: Utc::now(),
        };

        table.order.push(subscription.id);
        table
            .by_plan
            .entry(subscription.plan_id)
            .or_default()
            .push(subscription.id);
        table.rows.insert(subscription.id, subscription.clone());

        Ok(subscription)
    }

    async fn find_by_id(&self, subscription_id: Uuid) -> Result<Option<SubscriptionEntity>> {
        let table = self.table.read().await;
        Ok(table.rows.get(&subscription_id).cloned())
    }

    async fn find_by_plan(&self, plan_id: Uuid) -> Result<Vec<SubscriptionEntity>> {
        let table = self.table.read().await;

        let ids = match table.by_plan.get(&plan_id) {
            Some(ids) => ids,
            None => return Ok(Vec::new()),
        };

        Ok(ids
            .iter()
            .filter_map(|id| table.rows.get(id).cloned())
            .collect())
    }

    async fn update_status(
        &self,
        subscription_id: Uuid,
        status: SubscriptionStatus,
    ) -> Result<Option<SubscriptionEntity>> {
        let mut table = self.table.write().await;

        let Some(subscription) = table.rows.get_mut(&subscription_id) else {
            return Ok(None);
        };

        subscription.status = status;
        Ok(Some(subscription.clone()))
    }

    async fn list_all(&self) -> Result<Vec<SubscriptionEntity>> {
        let table = self.table.read().await;
        Ok(table
            .order
            .iter()
            .filter_map(|id| table.rows.get(id).cloned())
            .collect())
    }
}
