// broker/portfolio.rs

use crate::errors::TradeError;
use crate::market::Market;
use crate::models::{Holding, HoldingLine, PortfolioSummary, Stock};
use std::collections::HashMap;

/// One user's cash balance and share holdings.
#[derive(Debug, Clone)]
pub struct Portfolio {
    initial_cash: f64,
    cash: f64,
    holdings: HashMap<String, Holding>, // stock_symbol -> holding
}

impl Portfolio {
    pub fn new(initial_cash: f64) -> Self {
        Self {
            initial_cash,
            cash: initial_cash,
            holdings: HashMap::new(),
        }
    }

    /// Buys `quantity` shares at the stock's current price and returns the cost.
    pub fn buy_stock(&mut self, stock: &Stock, quantity: i64) -> Result<f64, TradeError> {
        if quantity <= 0 {
            return Err(TradeError::InvalidQuantity(quantity));
        }
        let cost = stock.price() * quantity as f64;
        if cost > self.cash {
            return Err(TradeError::InsufficientFunds {
                symbol: stock.symbol().to_string(),
                cost,
                cash: self.cash,
            });
        }
        let held = self.quantity_of(stock.symbol());
        let Some(new_quantity) = held.checked_add(quantity as u64) else {
            return Err(TradeError::HoldingLimitExceeded {
                symbol: stock.symbol().to_string(),
                requested: quantity,
                held,
            });
        };

        self.cash -= cost;
        self.holdings.insert(
            stock.symbol().to_string(),
            Holding {
                stock: stock.id(),
                symbol: stock.symbol().to_string(),
                quantity: new_quantity,
            },
        );

        log::debug!(
            "Bought {} {} at {:.2}, cash now {:.2}",
            quantity,
            stock.symbol(),
            stock.price(),
            self.cash
        );
        Ok(cost)
    }

    /// Sells `quantity` shares at the stock's current price and returns the proceeds.
    pub fn sell_stock(&mut self, stock: &Stock, quantity: i64) -> Result<f64, TradeError> {
        if quantity <= 0 {
            return Err(TradeError::InvalidQuantity(quantity));
        }
        let held = self.quantity_of(stock.symbol());
        if held < quantity as u64 {
            return Err(TradeError::InsufficientHoldings {
                symbol: stock.symbol().to_string(),
                requested: quantity,
                held,
            });
        }

        let proceeds = stock.price() * quantity as f64;
        let remaining = held - quantity as u64;
        if remaining == 0 {
            self.holdings.remove(stock.symbol());
        } else if let Some(holding) = self.holdings.get_mut(stock.symbol()) {
            holding.quantity = remaining;
        }
        self.cash += proceeds;

        log::debug!(
            "Sold {} {} at {:.2}, cash now {:.2}",
            quantity,
            stock.symbol(),
            stock.price(),
            self.cash
        );
        Ok(proceeds)
    }

    /// Holdings valued at the market's current prices, sorted by symbol.
    pub fn get_summary(&self, market: &Market) -> PortfolioSummary {
        let mut holdings: Vec<HoldingLine> = self
            .holdings
            .values()
            .filter_map(|holding| {
                let Some(stock) = resolve(market, holding) else {
                    log::warn!("{} is not listed on this market, left out of summary", holding.symbol);
                    return None;
                };
                Some(HoldingLine {
                    symbol: holding.symbol.clone(),
                    name: stock.name().to_string(),
                    quantity: holding.quantity,
                    value: stock.price() * holding.quantity as f64,
                })
            })
            .collect();
        holdings.sort_by(|a, b| a.symbol.cmp(&b.symbol));

        let total_value: f64 = holdings.iter().map(|line| line.value).sum();
        let net_worth = total_value + self.cash;
        PortfolioSummary {
            holdings,
            total_value,
            cash: self.cash,
            net_worth,
            pnl: net_worth - self.initial_cash,
        }
    }

    pub fn cash(&self) -> f64 {
        self.cash
    }

    pub fn initial_cash(&self) -> f64 {
        self.initial_cash
    }

    pub fn quantity_of(&self, stock_symbol: &str) -> u64 {
        self.holdings
            .get(&stock_symbol.trim().to_uppercase())
            .map_or(0, |holding| holding.quantity)
    }

    pub fn holdings(&self) -> &HashMap<String, Holding> {
        &self.holdings
    }

    pub fn is_empty(&self) -> bool {
        self.holdings.is_empty()
    }
}

/// Finds the stock a holding refers to. The handle is trusted only when it
/// still names the same symbol in `market`.
fn resolve<'a>(market: &'a Market, holding: &Holding) -> Option<&'a Stock> {
    market
        .stock(holding.stock)
        .filter(|stock| stock.symbol() == holding.symbol)
        .or_else(|| market.get_stock_by_symbol(&holding.symbol))
}
