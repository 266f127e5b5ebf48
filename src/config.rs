// config.rs

use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

pub const CONFIG_PATH_ENV: &str = "TRADING_SIM_CONFIG";
pub const SEED_ENV: &str = "TRADING_SIM_SEED";

pub const DEFAULT_STARTING_CASH: f64 = 10_000.0;
pub const DEFAULT_MAX_MOVE_PCT: f64 = 5.0;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct StockSeed {
    pub symbol: String,
    pub name: String,
    pub price: f64,
}

impl StockSeed {
    fn new(symbol: &str, name: &str, price: f64) -> Self {
        Self {
            symbol: symbol.to_string(),
            name: name.to_string(),
            price,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct MarketConfig {
    /// Largest absolute percentage a price may move in one tick.
    pub max_move_pct: f64,
    pub stocks: Vec<StockSeed>,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            max_move_pct: DEFAULT_MAX_MOVE_PCT,
            stocks: vec![
                StockSeed::new("AAPL", "Apple Inc.", 145.0),
                StockSeed::new("GOOGL", "Alphabet Inc.", 2800.0),
                StockSeed::new("MSFT", "Microsoft Corp.", 300.0),
                StockSeed::new("TSLA", "Tesla Inc.", 700.0),
                StockSeed::new("AMZN", "Amazon.com Inc.", 3300.0),
            ],
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub starting_cash: f64,
    pub market: MarketConfig,
    /// Fixed RNG seed for reproducible sessions.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            starting_cash: DEFAULT_STARTING_CASH,
            market: MarketConfig::default(),
            seed: None,
        }
    }
}

impl Config {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Defaults, overridden by the file named in `TRADING_SIM_CONFIG` and the
    /// seed in `TRADING_SIM_SEED` when those are set.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = match env::var(CONFIG_PATH_ENV) {
            Ok(path) => {
                log::info!("Loading config from {}", path);
                Self::from_file(path)?
            }
            Err(_) => Self::default(),
        };

        if let Ok(raw) = env::var(SEED_ENV) {
            let seed = raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidSeed(raw.clone()))?;
            config.seed = Some(seed);
        }

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.starting_cash.is_finite() || self.starting_cash <= 0.0 {
            return Err(ConfigError::InvalidCash(self.starting_cash));
        }
        Ok(())
    }
}
