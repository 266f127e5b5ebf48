// market.rs

use crate::config::MarketConfig;
use crate::errors::{ConfigError, TradeError};
use crate::models::{Stock, StockId};
use chrono::{DateTime, Utc};
use rand::Rng;
use std::collections::HashMap;

/// Prices never fall below this after a tick.
pub const MIN_PRICE: f64 = 1.0;

/// Catalog of tradable stocks and the authority over their prices.
#[derive(Debug, Clone)]
pub struct Market {
    stocks: Vec<Stock>,
    index: HashMap<String, StockId>, // canonical symbol -> catalog slot
    max_move_pct: f64,
    ticks: u64,
    last_tick: Option<DateTime<Utc>>,
}

impl Market {
    /// Market with the built-in five-stock catalog.
    pub fn initialize() -> Self {
        let mut market = Self::empty(crate::config::DEFAULT_MAX_MOVE_PCT);
        for seed in MarketConfig::default().stocks {
            market.insert(&seed.symbol, &seed.name, seed.price);
        }
        market
    }

    pub fn from_config(config: &MarketConfig) -> Result<Self, ConfigError> {
        if !config.max_move_pct.is_finite() || config.max_move_pct <= 0.0 {
            return Err(ConfigError::InvalidCatalog(format!(
                "max_move_pct must be positive, got {}",
                config.max_move_pct
            )));
        }
        if config.stocks.is_empty() {
            return Err(ConfigError::InvalidCatalog("no stocks configured".into()));
        }

        let mut market = Self::empty(config.max_move_pct);
        for seed in &config.stocks {
            let symbol = seed.symbol.trim().to_uppercase();
            if symbol.is_empty() {
                return Err(ConfigError::InvalidCatalog("empty stock symbol".into()));
            }
            if market.index.contains_key(&symbol) {
                return Err(ConfigError::InvalidCatalog(format!(
                    "duplicate symbol {}",
                    symbol
                )));
            }
            if !seed.price.is_finite() || seed.price <= 0.0 {
                return Err(ConfigError::InvalidCatalog(format!(
                    "{} has invalid price {}",
                    symbol, seed.price
                )));
            }
            market.insert(&symbol, &seed.name, seed.price);
        }
        Ok(market)
    }

    fn empty(max_move_pct: f64) -> Self {
        Self {
            stocks: Vec::new(),
            index: HashMap::new(),
            max_move_pct,
            ticks: 0,
            last_tick: None,
        }
    }

    fn insert(&mut self, symbol: &str, name: &str, price: f64) {
        let id = StockId(self.stocks.len());
        let stock = Stock::new(id, symbol, name, price);
        self.index.insert(stock.symbol().to_string(), id);
        self.stocks.push(stock);
    }

    /// Case-insensitive lookup.
    pub fn get_stock_by_symbol(&self, symbol: &str) -> Option<&Stock> {
        self.index
            .get(&symbol.trim().to_uppercase())
            .map(|id| &self.stocks[id.0])
    }

    pub fn require_stock(&self, symbol: &str) -> Result<&Stock, TradeError> {
        self.get_stock_by_symbol(symbol)
            .ok_or_else(|| TradeError::UnknownSymbol(symbol.trim().to_uppercase()))
    }

    /// Stock behind a handle, or `None` if the handle came from another market.
    pub fn stock(&self, id: StockId) -> Option<&Stock> {
        self.stocks.get(id.0)
    }

    /// Moves every price once by a uniform percentage in
    /// `[-max_move_pct, +max_move_pct)`, flooring at `MIN_PRICE`.
    pub fn simulate_market_movement<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let bound = self.max_move_pct;
        for stock in self.stocks.iter_mut() {
            let change_pct = rng.gen_range(-bound..bound);
            let mut price = stock.price() + stock.price() * change_pct / 100.0;
            if price < MIN_PRICE {
                price = MIN_PRICE;
            }
            log::debug!(
                "{}: {:.2} -> {:.2} ({:+.2}%)",
                stock.symbol(),
                stock.price(),
                price,
                change_pct
            );
            stock.set_price(price);
        }
        self.ticks += 1;
        self.last_tick = Some(Utc::now());
        log::info!("Market tick {} applied to {} stocks", self.ticks, self.stocks.len());
    }

    /// All stocks in catalog order.
    pub fn list_stocks(&self) -> Vec<&Stock> {
        self.stocks.iter().collect()
    }

    pub fn len(&self) -> usize {
        self.stocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stocks.is_empty()
    }

    pub fn max_move_pct(&self) -> f64 {
        self.max_move_pct
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn last_tick(&self) -> Option<DateTime<Utc>> {
        self.last_tick
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StockSeed;
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn penny_market() -> Market {
        Market::from_config(&MarketConfig {
            max_move_pct: 5.0,
            stocks: vec![
                StockSeed {
                    symbol: "PNY".into(),
                    name: "Penny Co.".into(),
                    price: 1.01,
                },
                StockSeed {
                    symbol: "BIG".into(),
                    name: "Big Co.".into(),
                    price: 200.0,
                },
            ],
        })
        .unwrap()
    }

    #[test]
    fn test_initialize_catalog() {
        let market = Market::initialize();
        assert_eq!(market.len(), 5);

        let expected = [
            ("AAPL", 145.0),
            ("GOOGL", 2800.0),
            ("MSFT", 300.0),
            ("TSLA", 700.0),
            ("AMZN", 3300.0),
        ];
        for (symbol, price) in expected {
            let stock = market.get_stock_by_symbol(symbol).unwrap();
            assert_eq!(stock.symbol(), symbol);
            assert_eq!(stock.price(), price);
        }
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let market = Market::initialize();
        assert_eq!(market.get_stock_by_symbol("aapl").unwrap().name(), "Apple Inc.");
        assert_eq!(market.get_stock_by_symbol(" GoOgL ").unwrap().symbol(), "GOOGL");
        assert!(market.get_stock_by_symbol("NOPE").is_none());
    }

    #[test]
    fn test_require_stock_reports_unknown_symbol() {
        let market = Market::initialize();
        assert_eq!(
            market.require_stock("nope").unwrap_err(),
            TradeError::UnknownSymbol("NOPE".into())
        );
    }

    #[test]
    fn test_stock_handle_outside_catalog() {
        let big = Market::initialize();
        let small = penny_market();
        let amzn = big.get_stock_by_symbol("AMZN").unwrap();

        assert!(small.stock(amzn.id()).is_none());
        assert_eq!(big.stock(amzn.id()).unwrap().symbol(), "AMZN");
    }

    #[test]
    fn test_list_stocks_is_stable() {
        let market = Market::initialize();
        let first: Vec<&str> = market.list_stocks().iter().map(|s| s.symbol()).collect();
        let second: Vec<&str> = market.list_stocks().iter().map(|s| s.symbol()).collect();
        assert_eq!(first, vec!["AAPL", "GOOGL", "MSFT", "TSLA", "AMZN"]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_movement_stays_within_bounds() {
        let mut market = Market::initialize();
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..200 {
            let before: Vec<f64> = market.list_stocks().iter().map(|s| s.price()).collect();
            market.simulate_market_movement(&mut rng);
            for (stock, old) in market.list_stocks().iter().zip(before) {
                let new = stock.price();
                if old * 0.95 < MIN_PRICE {
                    assert!(new >= MIN_PRICE);
                } else {
                    assert!(new >= old * 0.95 - 1e-9, "{} fell too far", stock.symbol());
                }
                assert!(new < old * 1.05 + 1e-9 || new == MIN_PRICE);
            }
        }
        assert_eq!(market.ticks(), 200);
        assert!(market.last_tick().is_some());
    }

    #[test]
    fn test_lowest_draw_moves_down_five_percent_and_floors() {
        let mut market = penny_market();
        // All-zero bits make gen_range return its lower bound.
        let mut rng = StepRng::new(0, 0);
        market.simulate_market_movement(&mut rng);

        assert_eq!(market.get_stock_by_symbol("PNY").unwrap().price(), 1.0);
        let big = market.get_stock_by_symbol("BIG").unwrap().price();
        assert!((big - 190.0).abs() < 1e-9);
    }

    #[test]
    fn test_highest_draw_stays_below_upper_bound() {
        let mut market = penny_market();
        let mut rng = StepRng::new(u64::MAX, 0);
        market.simulate_market_movement(&mut rng);

        let big = market.get_stock_by_symbol("BIG").unwrap().price();
        assert!(big > 209.99 && big < 210.0);
    }

    #[test]
    fn test_from_config_rejects_bad_catalogs() {
        let dup = MarketConfig {
            max_move_pct: 5.0,
            stocks: vec![
                StockSeed { symbol: "ABC".into(), name: "A".into(), price: 1.0 },
                StockSeed { symbol: "abc".into(), name: "B".into(), price: 2.0 },
            ],
        };
        assert!(matches!(Market::from_config(&dup), Err(ConfigError::InvalidCatalog(_))));

        let bad_price = MarketConfig {
            max_move_pct: 5.0,
            stocks: vec![StockSeed { symbol: "ABC".into(), name: "A".into(), price: 0.0 }],
        };
        assert!(Market::from_config(&bad_price).is_err());

        let empty = MarketConfig { max_move_pct: 5.0, stocks: vec![] };
        assert!(Market::from_config(&empty).is_err());

        let no_move = MarketConfig { max_move_pct: 0.0, ..MarketConfig::default() };
        assert!(Market::from_config(&no_move).is_err());
    }
}
