use std::env;

/// Demo configuration
#[derive(Debug, Clone)]
pub struct DemoConfig {
    /// Chunks per side of the square sample world
    pub chunks: i32,
    /// Draw road nodes as markers
    pub node_markers: bool,
    /// Name of the sample city
    pub city: String,
}

impl DemoConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        let chunks: i32 = env::var("CITYGRID_CHUNKS")
            .unwrap_or_else(|_| "2".to_string())
            .parse()?;
        if chunks < 1 {
            anyhow::bail!("CITYGRID_CHUNKS must be at least 1, got {}", chunks);
        }
        let node_markers = env::var("CITYGRID_NODE_MARKERS")
            .unwrap_or_else(|_| "false".to_string())
            .parse()?;
        let city = env::var("CITYGRID_CITY").unwrap_or_else(|_| "New City".to_string());

        Ok(Self {
            chunks,
            node_markers,
            city,
        })
    }
}
