// report.rs

use crate::market::Market;
use crate::models::PortfolioSummary;
use colored::*; // Use colored crate for text colors
use std::fmt;

/// Market data table, one row per stock in catalog order.
pub struct MarketTable<'a>(pub &'a Market);

impl fmt::Display for MarketTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let market = self.0;
        writeln!(f, "\n{}", "Current Market Data:".bold())?;
        writeln!(f, "{:<8} {:<20} {:<10}", "Symbol", "Name", "Price($)")?;
        for stock in market.list_stocks() {
            writeln!(
                f,
                "{:<8} {:<20} {:<10.2}",
                stock.symbol(),
                stock.name(),
                stock.price()
            )?;
        }
        if let Some(at) = market.last_tick() {
            writeln!(
                f,
                "Last movement: tick {} at {}",
                market.ticks(),
                at.format("%Y-%m-%d %H:%M:%S UTC")
            )?;
        }
        Ok(())
    }
}

/// Holdings, cash and P&L for one portfolio summary.
pub struct PortfolioTable<'a>(pub &'a PortfolioSummary);

impl fmt::Display for PortfolioTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summary = self.0;
        writeln!(f, "\n{}", "Your Portfolio:".bold())?;
        if summary.holdings.is_empty() {
            writeln!(f, "  (No holdings)")?;
        } else {
            writeln!(
                f,
                "{:<8} {:<20} {:<10} {:<10}",
                "Symbol", "Name", "Quantity", "Value($)"
            )?;
            for line in &summary.holdings {
                writeln!(
                    f,
                    "{:<8} {:<20} {:<10} {:<10.2}",
                    line.symbol, line.name, line.quantity, line.value
                )?;
            }
            writeln!(f, "Total value of holdings: ${:.2}", summary.total_value)?;
        }
        writeln!(f, "Available cash: ${:.2}", summary.cash)?;

        // Display P&L with color
        let pnl = if summary.pnl >= 0.0 {
            format!("+{:.2}", summary.pnl).green()
        } else {
            format!("{:.2}", summary.pnl).red()
        };
        writeln!(f, "Profit & Loss (P&L): {}", pnl)
    }
}

pub fn market_table(market: &Market) -> String {
    MarketTable(market).to_string()
}

pub fn portfolio_table(summary: &PortfolioSummary) -> String {
    PortfolioTable(summary).to_string()
}
