// models.rs

use serde::Serialize;

/// Handle to a stock in the market catalog. Only the market mints these.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StockId(pub(crate) usize);

#[derive(Serialize, Debug, Clone)]
pub struct Stock {
    id: StockId,
    symbol: String,
    name: String,
    price: f64,
}

impl Stock {
    pub(crate) fn new(id: StockId, symbol: &str, name: &str, price: f64) -> Self {
        Self {
            id,
            symbol: symbol.trim().to_uppercase(),
            name: name.to_string(),
            price,
        }
    }

    pub fn id(&self) -> StockId {
        self.id
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub(crate) fn set_price(&mut self, price: f64) {
        self.price = price;
    }
}

/// Shares of one stock owned by a portfolio. The price is looked up through
/// the market on demand, so the value always reflects the latest tick.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Holding {
    pub stock: StockId,
    pub symbol: String,
    pub quantity: u64,
}

/// One row of a portfolio summary.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct HoldingLine {
    pub symbol: String,
    pub name: String,
    pub quantity: u64,
    pub value: f64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PortfolioSummary {
    pub holdings: Vec<HoldingLine>,
    pub total_value: f64,
    pub cash: f64,
    pub net_worth: f64,
    pub pnl: f64, // Profit & Loss against the starting cash
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    ViewMarket,
    Buy,
    Sell,
    ViewPortfolio,
    Tick,
    Exit,
}

impl Command {
    /// Maps a menu choice ("1" to "6") to a command.
    pub fn from_menu_choice(choice: &str) -> Option<Self> {
        match choice.trim() {
            "1" => Some(Command::ViewMarket),
            "2" => Some(Command::Buy),
            "3" => Some(Command::Sell),
            "4" => Some(Command::ViewPortfolio),
            "5" => Some(Command::Tick),
            "6" => Some(Command::Exit),
            _ => None,
        }
    }
}
