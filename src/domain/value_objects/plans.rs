use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::enums::{
    billing_cycles::BillingCycle, currencies::Currency, feature_categories::FeatureCategory,
    invoicing_modes::InvoicingMode, limitation_types::{LimitationType, ResetPeriod},
    payment_methods::PaymentMethod, permission_actions::PermissionAction, plan_statuses::PlanStatus,
    plan_types::PlanType,
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanPricing {
    pub monthly: f64,
    pub yearly: f64,
    #[serde(default)]
    pub currency: Currency,
}

/// A marketable capability of a plan. Order is preserved for display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanFeature {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: FeatureCategory,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub unlimited: Option<bool>,
}

/// A quantitative cap on a resource. When `unlimited` is set the value is
/// ignored for enforcement but kept for display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanLimitation {
    pub id: String,
    #[serde(rename = "type")]
    pub limitation_type: LimitationType,
    pub name: String,
    pub value: f64,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub unlimited: bool,
    #[serde(default)]
    pub reset_period: Option<ResetPeriod>,
}

impl PlanLimitation {
    pub fn effective_value(&self) -> Option<f64> {
        if self.unlimited { None } else { Some(self.value) }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanPermission {
    pub id: String,
    pub resource: String,
    pub actions: BTreeSet<PermissionAction>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrialPolicy {
    pub enabled: bool,
    pub duration_days: u32,
    #[serde(default)]
    pub unlocked_feature_ids: Vec<String>,
}

impl Default for TrialPolicy {
    fn default() -> Self {
        Self {
            enabled: false,
            duration_days: 0,
            unlocked_feature_ids: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BillingPolicy {
    #[serde(default)]
    pub cycle: BillingCycle,
    #[serde(default)]
    pub invoicing: InvoicingMode,
    #[serde(default)]
    pub payment_methods: Vec<PaymentMethod>,
}

impl Default for BillingPolicy {
    fn default() -> Self {
        Self {
            cycle: BillingCycle::Monthly,
            invoicing: InvoicingMode::Automatic,
            payment_methods: vec![PaymentMethod::Card],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanMetadata {
    #[serde(default)]
    pub popular: bool,
    #[serde(default)]
    pub recommended: bool,
    #[serde(default)]
    pub customizable: bool,
    #[serde(default = "default_display_order")]
    pub display_order: u32,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub icon: String,
}

fn default_display_order() -> u32 {
    1
}

impl Default for PlanMetadata {
    fn default() -> Self {
        Self {
            popular: false,
            recommended: false,
            customizable: false,
            display_order: default_display_order(),
            color: String::new(),
            icon: String::new(),
        }
    }
}

/// Everything an administrator submits to create a plan. Identity and
/// timestamps are assigned by the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanDraft {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub plan_type: PlanType,
    #[serde(default)]
    pub status: PlanStatus,
    pub pricing: PlanPricing,
    #[serde(default)]
    pub features: Vec<PlanFeature>,
    #[serde(default)]
    pub limitations: Vec<PlanLimitation>,
    #[serde(default)]
    pub permissions: Vec<PlanPermission>,
    #[serde(default)]
    pub trial: TrialPolicy,
    #[serde(default)]
    pub billing: BillingPolicy,
    #[serde(default)]
    pub metadata: PlanMetadata,
    #[serde(default)]
    pub created_by: String,
}

/// Field-level update for a plan. `None` leaves the stored value untouched.
/// There is no id field: plan identity is immutable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlanPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub plan_type: Option<PlanType>,
    pub status: Option<PlanStatus>,
    pub pricing: Option<PlanPricing>,
    pub features: Option<Vec<PlanFeature>>,
    pub limitations: Option<Vec<PlanLimitation>>,
    pub permissions: Option<Vec<PlanPermission>>,
    pub trial: Option<TrialPolicy>,
    pub billing: Option<BillingPolicy>,
    pub metadata: Option<PlanMetadata>,
}

impl PlanPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.plan_type.is_none()
            && self.status.is_none()
            && self.pricing.is_none()
            && self.features.is_none()
            && self.limitations.is_none()
            && self.permissions.is_none()
            && self.trial.is_none()
            && self.billing.is_none()
            && self.metadata.is_none()
    }
}

/// Outcome of draft validation. Violations are collected, never fail-fast,
/// so a caller can render them together.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanValidation {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl PlanValidation {
    pub fn from_errors(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }
}
