use std::path::PathBuf;

use config::{Config, ConfigError, File};
use seawatch_core::{Environment, TELEMETRY_TOPIC};
use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub struct Settings {
    pub environment: Environment,
    pub topic: String,
    pub tick_rate: u32,
    pub points_per_path: u32,
    pub jitter: Option<f64>,
    pub channel_capacity: usize,
    pub trajectories_path: PathBuf,
}

impl Settings {
    pub fn new() -> Result<Settings, ConfigError> {
        let environment = std::env::var("APP_ENVIRONMENT")
            .unwrap_or_else(|_| "local".to_string())
            .to_lowercase();

        Config::builder()
            .set_default("environment", environment.as_str())?
            .set_default("topic", TELEMETRY_TOPIC)?
            .set_default("tick_rate", 2)?
            .set_default("points_per_path", 20)?
            .set_default("channel_capacity", 64)?
            .set_default("trajectories_path", "demos/trajectories.json")?
            .add_source(File::with_name(&format!("config/{environment}")).required(false))
            .add_source(config::Environment::with_prefix("SEAWATCH_BROADCASTER").separator("__"))
            .build()?
            .try_deserialize()
    }
}
