use anyhow::Result;
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use uuid::Uuid;

use crate::domain::{
    entities::subscriptions::{InsertSubscriptionEntity, SubscriptionEntity},
    value_objects::enums::subscription_statuses::SubscriptionStatus,
};

#[cfg_attr(test, automock)]
#[async_trait]
pub trait SubscriptionRepository {
    /// Assigns an id and `created_at`, stores and returns the subscription.
    async fn insert(&self, entity: InsertSubscriptionEntity) -> Result<SubscriptionEntity>;

    async fn find_by_id(&self, subscription_id: Uuid) -> Result<Option<SubscriptionEntity>>;

    /// Every subscription ever bound to the plan, regardless of status.
    async fn find_by_plan(&self, plan_id: Uuid) -> Result<Vec<SubscriptionEntity>>;

    /// Returns `None` when the id is unknown. The transition itself is
    /// already validated by the caller.
    async fn update_status(
        &self,
        subscription_id: Uuid,
        status: SubscriptionStatus,
    ) -> Result<Option<SubscriptionEntity>>;

    async fn list_all(&self) -> Result<Vec<SubscriptionEntity>>;
}
