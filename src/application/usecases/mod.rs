pub mod analytics;
pub mod plans;
pub mod subscriptions;

#[cfg(test)]
mod engine_scenarios;
