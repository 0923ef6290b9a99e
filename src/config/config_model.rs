#[derive(Debug, Clone)]
pub struct DotEnvyConfig {
    pub server: Server,
    /// Demo fixtures are loaded only when this is set; stores never seed
    /// themselves.
    pub seed_demo_data: bool,
}

#[derive(Debug, Clone)]
pub struct Server {
    pub port: u16,
    pub body_limit: u64,
    pub timeout: u64,
}
