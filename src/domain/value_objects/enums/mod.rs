pub mod billing_cycles;
pub mod currencies;
pub mod feature_categories;
pub mod invoicing_modes;
pub mod limitation_types;
pub mod payment_methods;
pub mod permission_actions;
pub mod plan_statuses;
pub mod plan_types;
pub mod subscription_statuses;
