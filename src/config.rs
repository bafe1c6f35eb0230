//! Configuration loader for the `vayuwatch-backend` service.
//!
//! This module centralizes all runtime configuration values and their
//! defaults, loading from environment variables (with optional `.env` file
//! support provided by the caller). By consolidating configuration logic
//! here, we avoid scattering `env::var` calls throughout the codebase.

use std::env;

use anyhow::{anyhow, Result};

/// Parse an optional integer environment variable with a default value.
macro_rules! parse_env_u64 {
    ($var_name:expr, $default:expr) => {
        env::var($var_name)
            .ok()
            .map(|v| v.parse::<u64>())
            .transpose()
            .map_err(|e| anyhow!("Invalid {}: {}", $var_name, e))?
            .unwrap_or($default)
    };
}

/// Parse an optional float environment variable with a default value.
macro_rules! parse_env_f64 {
    ($var_name:expr, $default:expr) => {
        env::var($var_name)
            .ok()
            .map(|v| v.parse::<f64>())
            .transpose()
            .map_err(|e| anyhow!("Invalid {}: {}", $var_name, e))?
            .unwrap_or($default)
    };
}

const DEFAULT_REFRESH_INTERVAL_MS: u64 = 180_000; // 3 minutes
const DEFAULT_CITY_MAX_DELTA: f64 = 20.0;
const DEFAULT_WARD_MAX_DELTA: f64 = 15.0;

/// Strongly typed application configuration.
///
/// All fields are immutable after loading, ensuring a consistent
/// configuration snapshot for the lifetime of the application.
#[derive(Debug, Clone)]
pub struct Config {
    // ---
    /// How often the simulator publishes a fresh tree, in milliseconds.
    pub refresh_interval_ms: u64,

    /// Maximum AQI offset applied to a city per tick.
    pub city_max_delta: f64,

    /// Maximum AQI offset applied to a ward per tick.
    pub ward_max_delta: f64,

    /// Fixed RNG seed for reproducible simulation runs. Unset in normal
    /// operation, where the simulator seeds itself from entropy.
    pub sim_seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            refresh_interval_ms: DEFAULT_REFRESH_INTERVAL_MS,
            city_max_delta: DEFAULT_CITY_MAX_DELTA,
            ward_max_delta: DEFAULT_WARD_MAX_DELTA,
            sim_seed: None,
        }
    }
}

/// Load configuration from environment variables with defaults.
///
/// Optional:
/// - `AQI_REFRESH_INTERVAL_MS` – simulation tick period (default: 180000)
/// - `AQI_CITY_MAX_DELTA` – city AQI perturbation bound (default: 20)
/// - `AQI_WARD_MAX_DELTA` – ward AQI perturbation bound (default: 15)
/// - `AQI_SIM_SEED` – fixed RNG seed for deterministic output (default: unset)
///
/// Returns an error if any present variable fails to parse.
pub fn load_from_env() -> Result<Config> {
    // ---
    let refresh_interval_ms = parse_env_u64!("AQI_REFRESH_INTERVAL_MS", DEFAULT_REFRESH_INTERVAL_MS);
    let city_max_delta = parse_env_f64!("AQI_CITY_MAX_DELTA", DEFAULT_CITY_MAX_DELTA);
    let ward_max_delta = parse_env_f64!("AQI_WARD_MAX_DELTA", DEFAULT_WARD_MAX_DELTA);

    let sim_seed = env::var("AQI_SIM_SEED")
        .ok()
        .map(|v| v.parse::<u64>())
        .transpose()
        .map_err(|e| anyhow!("Invalid AQI_SIM_SEED: {}", e))?;

    Ok(Config {
        refresh_interval_ms,
        city_max_delta,
        ward_max_delta,
        sim_seed,
    })
}

impl Config {
    /// Log the loaded configuration for debugging purposes.
    pub fn log_config(&self) {
        // ---
        tracing::info!("Configuration loaded:");
        tracing::info!("  AQI_REFRESH_INTERVAL_MS : {}", self.refresh_interval_ms);
        tracing::info!("  AQI_CITY_MAX_DELTA      : {}", self.city_max_delta);
        tracing::info!("  AQI_WARD_MAX_DELTA      : {}", self.ward_max_delta);
        tracing::info!(
            "  AQI_SIM_SEED            : {}",
            self.sim_seed
                .map(|s| s.to_string())
                .unwrap_or_else(|| "entropy".to_string())
        );
    }
}
