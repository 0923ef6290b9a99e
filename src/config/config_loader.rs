use anyhow::{Ok, Result};

use super::config_model::{DotEnvyConfig, Server};

pub fn load() -> Result<DotEnvyConfig> {
    dotenvy::dotenv().ok();

    let server = Server {
        port: std::env::var("SERVER_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()?,
        body_limit: std::env::var("SERVER_BODY_LIMIT")
            .unwrap_or_else(|_| "10".to_string())
            .parse()?,
        timeout: std::env::var("SERVER_TIMEOUT")
            .unwrap_or_else(|_| "30".to_string())
            .parse()?,
    };

    let seed_demo_data = std::env::var("SEED_DEMO_DATA")
        .map(|value| value == "true" || value == "1")
        .unwrap_or(false);

    Ok(DotEnvyConfig {
        server,
        seed_demo_data,
    })
}
