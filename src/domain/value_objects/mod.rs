pub mod analytics;
pub mod enums;
pub mod plans;
pub mod subscriptions;
