// errors.rs

use thiserror::Error;

/// Recoverable trading failures. The session prints these and re-prompts.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TradeError {
    #[error("Quantity must be positive (got {0}).")]
    InvalidQuantity(i64),

    #[error("Insufficient cash to buy {symbol}: cost ${cost:.2}, available ${cash:.2}.")]
    InsufficientFunds { symbol: String, cost: f64, cash: f64 },

    #[error("You do not have enough shares of {symbol} to sell (requested {requested}, held {held}).")]
    InsufficientHoldings {
        symbol: String,
        requested: i64,
        held: u64,
    },

    #[error("Cannot hold more shares of {symbol} (held {held}, requested {requested}).")]
    HoldingLimitExceeded {
        symbol: String,
        requested: i64,
        held: u64,
    },

    #[error("Invalid stock symbol: {0}")]
    UnknownSymbol(String),
}

/// Startup failures while loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid stock catalog: {0}")]
    InvalidCatalog(String),

    #[error("Starting cash must be a positive amount (got {0}).")]
    InvalidCash(f64),

    #[error("Invalid RNG seed: {0}")]
    InvalidSeed(String),
}
