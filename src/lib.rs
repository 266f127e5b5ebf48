//! Single-user simulated stock trading.
//!
//! [`market::Market`] owns the stock catalog and moves prices one tick at a
//! time; [`broker::Portfolio`] keeps the user's cash and holdings and
//! validates every trade before touching state. [`session::Session`] drives
//! both from a text menu.

pub mod broker;
pub mod config;
pub mod errors;
pub mod market;
pub mod models;
pub mod report;
pub mod session;

pub use broker::Portfolio;
pub use errors::{ConfigError, TradeError};
pub use market::Market;
pub use models::{Command, Holding, HoldingLine, PortfolioSummary, Stock, StockId};
