use serde::{Deserialize, Serialize};

/// Derived revenue view over the whole ledger. Recomputed on demand, never
/// persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AnalyticsSnapshot {
    pub total_subscriptions: usize,
    pub active_subscriptions: usize,
    pub mrr: f64,
    pub arr: f64,
}
