pub mod plan_store;
pub mod seed;
pub mod subscription_store;
