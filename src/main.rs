use anyhow::Result;
use tracing::error;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        error!("Server exited with error: {}", error);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    plan_desk::init_observability()?;

    plan_desk::run().await?;

    Ok(())
}
