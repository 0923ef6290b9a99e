use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::{
    enums::{plan_statuses::PlanStatus, plan_types::PlanType},
    plans::{
        BillingPolicy, PlanDraft, PlanFeature, PlanLimitation, PlanMetadata, PlanPatch,
        PlanPermission, PlanPricing, TrialPolicy,
    },
};

/// A stored subscription tier. `id` is assigned at creation and never
/// changes; `updated_at` is restamped by the catalog on every write.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanEntity {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub plan_type: PlanType,
    pub status: PlanStatus,
    pub pricing: PlanPricing,
    pub features: Vec<PlanFeature>,
    pub limitations: Vec<PlanLimitation>,
    pub permissions: Vec<PlanPermission>,
    pub trial: TrialPolicy,
    pub billing: BillingPolicy,
    pub metadata: PlanMetadata,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PlanEntity {
    pub fn from_draft(id: Uuid, draft: PlanDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name,
            description: draft.description,
            plan_type: draft.plan_type,
            status: draft.status,
            pricing: draft.pricing,
            features: draft.features,
            limitations: draft.limitations,
            permissions: draft.permissions,
            trial: draft.trial,
            billing: draft.billing,
            metadata: draft.metadata,
            created_by: draft.created_by,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies a typed patch, leaving `None` fields untouched. Identity and
    /// audit fields are not patchable; `updated_at` is restamped by the
    /// store on commit.
    pub fn merged_with(&self, patch: &PlanPatch) -> Self {
        let mut merged = self.clone();
        if let Some(name) = &patch.name {
            merged.name = name.clone();
        }
        if let Some(description) = &patch.description {
            merged.description = description.clone();
        }
        if let Some(plan_type) = patch.plan_type {
            merged.plan_type = plan_type;
        }
        if let Some(status) = patch.status {
            merged.status = status;
        }
        if let Some(pricing) = &patch.pricing {
            merged.pricing = pricing.clone();
        }
        if let Some(features) = &patch.features {
            merged.features = features.clone();
        }
        if let Some(limitations) = &patch.limitations {
            merged.limitations = limitations.clone();
        }
        if let Some(permissions) = &patch.permissions {
            merged.permissions = permissions.clone();
        }
        if let Some(trial) = &patch.trial {
            merged.trial = trial.clone();
        }
        if let Some(billing) = &patch.billing {
            merged.billing = billing.clone();
        }
        if let Some(metadata) = &patch.metadata {
            merged.metadata = metadata.clone();
        }
        merged
    }
}
