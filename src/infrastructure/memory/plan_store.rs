use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::{
    entities::plans::PlanEntity, repositories::plans::PlanRepository,
    value_objects::plans::PlanDraft,
};

struct PlanRow {
    seq: u64,
    plan: PlanEntity,
}

#[derive(Default)]
struct PlanTable {
    rows: HashMap<Uuid, PlanRow>,
    next_seq: u64,
}

/// Authoritative in-memory plan catalog. Every mutating method takes a
/// single write guard, so check-then-act within the store is atomic.
#[derive(Default)]
pub struct InMemoryPlanStore {
    table: RwLock<PlanTable>,
}

impl InMemoryPlanStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PlanRepository for InMemoryPlanStore {
    async fn create(&self, draft: PlanDraft) -> Result<PlanEntity> {
        let mut table = self.table.write().await;

        let plan = PlanEntity::from_draft(Uuid::new_v4(), draft, Utc::now());
        let seq = table.next_seq;
        table.next_seq += 1;
        table.rows.insert(
            plan.id,
            PlanRow {
                seq,
                plan: plan.clone(),
            },
        );

        Ok(plan)
    }

    async fn find_by_id(&self, plan_id: Uuid) -> Result<Option<PlanEntity>> {
        let table = self.table.read().await;
        Ok(table.rows.get(&plan_id).map(|row| row.plan.clone()))
    }

    async fn update(&self, plan_id: Uuid, mut plan: PlanEntity) -> Result<Option<PlanEntity>> {
        let mut table = self.table.write().await;

        let Some(row) = table.rows.get_mut(&plan_id) else {
            return Ok(None);
        };

        // Identity and creation audit survive any update.
        plan.id = row.plan.id;
        plan.created_at = row.plan.created_at;
        plan.created_by = row.plan.created_by.clone();
        plan.updated_at = Utc::now();

        row.plan = plan.clone();
        Ok(Some(plan))
    }

    async fn delete(&self, plan_id: Uuid) -> Result<bool> {
        let mut table = self.table.write().await;
        Ok(table.rows.remove(&plan_id).is_some())
    }

    async fn list(&self) -> Result<Vec<PlanEntity>> {
        let table = self.table.read().await;

        let mut rows: Vec<(&u64, &PlanEntity)> = table
            .rows
            .values()
            .map(|row| (&row.seq, &row.plan))
            .collect();
        rows.sort_by_key(|(seq, plan)| (plan.metadata.display_order, **seq));

        Ok(rows.into_iter().map(|(_, plan)| plan.clone()).collect())
    }
}
