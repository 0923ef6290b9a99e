use anyhow::Result;
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use uuid::Uuid;

use crate::domain::{entities::plans::PlanEntity, value_objects::plans::PlanDraft};

#[cfg_attr(test, automock)]
#[async_trait]
pub trait PlanRepository {
    /// Assigns an id, stamps created/updated timestamps, stores and returns
    /// the plan.
    async fn create(&self, draft: PlanDraft) -> Result<PlanEntity>;

    async fn find_by_id(&self, plan_id: Uuid) -> Result<Option<PlanEntity>>;

    /// Full-record replace. Returns `None` when the id is unknown; restamps
    /// `updated_at` on success.
    async fn update(&self, plan_id: Uuid, plan: PlanEntity) -> Result<Option<PlanEntity>>;

    /// Returns `false` when the id is unknown. Reference checks are the
    /// caller's responsibility.
    async fn delete(&self, plan_id: Uuid) -> Result<bool>;

    /// Ordered by `metadata.display_order` ascending, ties broken by
    /// creation order.
    async fn list(&self) -> Result<Vec<PlanEntity>>;
}
