use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// PostgreSQL connection URL; when set, the catalog is read from Postgres
    #[serde(default)]
    pub database_url: Option<String>,

    /// Path to a JSON dataset file, used when no database is configured
    #[serde(default)]
    pub dataset_path: Option<String>,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Number of recommendations returned when the client omits `count`
    #[serde(default = "default_count")]
    pub default_count: usize,

    /// Largest `count` a client may request
    #[serde(default = "default_max_count")]
    pub max_count: usize,

    /// Nearest neighbors consulted by collaborative filtering
    #[serde(default = "default_neighbor_count")]
    pub neighbor_count: usize,

    #[serde(default = "default_content_weight")]
    pub content_weight: f64,

    #[serde(default = "default_collaborative_weight")]
    pub collaborative_weight: f64,

    /// Upper bound (exclusive) of the content diversity perturbation; 0 disables it
    #[serde(default = "default_diversity_max")]
    pub diversity_max: f64,

    /// Seed for a reproducible diversity perturbation
    #[serde(default)]
    pub diversity_seed: Option<u64>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_count() -> usize {
    5
}

fn default_max_count() -> usize {
    100
}

fn default_neighbor_count() -> usize {
    3
}

fn default_content_weight() -> f64 {
    0.6
}

fn default_collaborative_weight() -> f64 {
    0.4
}

fn default_diversity_max() -> f64 {
    0.1
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: None,
            dataset_path: None,
            host: default_host(),
            port: default_port(),
            default_count: default_count(),
            max_count: default_max_count(),
            neighbor_count: default_neighbor_count(),
            content_weight: default_content_weight(),
            collaborative_weight: default_collaborative_weight(),
            diversity_max: default_diversity_max(),
            diversity_seed: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let config = envy::from_env::<Config>()
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.default_count == 0 || self.default_count > self.max_count {
            anyhow::bail!(
                "DEFAULT_COUNT must be between 1 and MAX_COUNT ({}), got {}",
                self.max_count,
                self.default_count
            );
        }
        if !self.diversity_max.is_finite() || self.diversity_max < 0.0 {
            anyhow::bail!("DIVERSITY_MAX must be a non-negative number");
        }
        for (name, weight) in [
            ("CONTENT_WEIGHT", self.content_weight),
            ("COLLABORATIVE_WEIGHT", self.collaborative_weight),
        ] {
            if !weight.is_finite() || weight < 0.0 {
                anyhow::bail!("{} must be a non-negative number", name);
            }
        }
        Ok(())
    }
}
