pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::infrastructure::memory::{
    plan_store::InMemoryPlanStore, seed, subscription_store::InMemorySubscriptionStore,
};

pub fn init_observability() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    Ok(())
}

pub async fn run() -> Result<()> {
    let dotenvy_env = config::config_loader::load()?;
    info!("ENV has been loaded");

    let plan_store = Arc::new(InMemoryPlanStore::new());
    let subscription_store = Arc::new(InMemorySubscriptionStore::new());

    if dotenvy_env.seed_demo_data {
        let plans = seed::load_demo_plans(plan_store.as_ref()).await?;
        info!(plan_count = plans.len(), "Demo plans have been seeded");
    }

    infrastructure::axum_http::http_serve::start(
        Arc::new(dotenvy_env),
        plan_store,
        subscription_store,
    )
    .await?;

    Ok(())
}
