use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::enums::{
    billing_cycles::BillingCycle, subscription_statuses::SubscriptionStatus,
};

/// Binds one user to one plan. Rows are never physically deleted; canceled
/// and expired subscriptions remain for audit and analytics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubscriptionEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub plan_id: Uuid,
    pub status: SubscriptionStatus,
    pub billing_cycle: BillingCycle,
    pub next_billing_at: DateTime<Utc>,
    /// Set at creation only; a running subscription cannot be turned into a
    /// trial retroactively.
    pub trial: bool,
    pub created_at: DateTime<Utc>,
}

/// Fields the ledger needs to mint a subscription; id and created_at are
/// assigned on insert.
#[derive(Debug, Clone)]
pub struct InsertSubscriptionEntity {
    pub user_id: Uuid,
    pub plan_id: Uuid,
    pub status: SubscriptionStatus,
    pub billing_cycle: BillingCycle,
    pub next_billing_at: DateTime<Utc>,
    pub trial: bool,
}
