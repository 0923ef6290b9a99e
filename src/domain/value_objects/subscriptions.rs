use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::enums::{
    billing_cycles::BillingCycle, subscription_statuses::SubscriptionStatus,
};

/// Request body for creating a subscription.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsertSubscriptionModel {
    pub user_id: Uuid,
    pub plan_id: Uuid,
    #[serde(default)]
    pub trial: bool,
    #[serde(default)]
    pub cycle: Option<BillingCycle>,
}

/// Creation options once the HTTP shape has been unwrapped.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubscriptionOptions {
    pub trial: bool,
    pub cycle_override: Option<BillingCycle>,
}

/// Request body for a status transition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateSubscriptionStatusModel {
    pub status: SubscriptionStatus,
}
