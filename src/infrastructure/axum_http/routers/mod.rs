pub mod analytics;
pub mod plans;
pub mod subscriptions;
