// session.rs

use crate::broker::Portfolio;
use crate::market::Market;
use crate::models::Command;
use crate::report;
use colored::*;
use rand::Rng;
use std::io::{self, BufRead, Write};

/// Interactive menu loop over any input/output pair and RNG.
pub struct Session<I, O, R> {
    market: Market,
    portfolio: Portfolio,
    input: I,
    output: O,
    rng: R,
}

impl<I: BufRead, O: Write, R: Rng> Session<I, O, R> {
    pub fn new(market: Market, portfolio: Portfolio, input: I, output: O, rng: R) -> Self {
        Self {
            market,
            portfolio,
            input,
            output,
            rng,
        }
    }

    pub fn run(&mut self) -> io::Result<()> {
        writeln!(
            self.output,
            "{}",
            "Welcome to the Simulated Stock Trading Platform!".bold()
        )?;
        writeln!(
            self.output,
            "You start with ${:.2} in cash.",
            self.portfolio.initial_cash()
        )?;

        loop {
            self.print_menu()?;
            let Some(choice) = self.read_line()? else {
                // EOF ends the session like Exit.
                break;
            };

            match Command::from_menu_choice(&choice) {
                Some(Command::Exit) => break,
                Some(command) => self.dispatch(command)?,
                None => writeln!(self.output, "Invalid option, please choose 1-6.")?,
            }
        }

        writeln!(
            self.output,
            "Thank you for using the Simulated Stock Trading Platform!"
        )?;
        self.output.flush()
    }

    fn dispatch(&mut self, command: Command) -> io::Result<()> {
        log::debug!("Command: {:?}", command);
        match command {
            Command::ViewMarket => {
                write!(self.output, "{}", report::MarketTable(&self.market))?;
            }
            Command::Buy | Command::Sell => self.trade(command)?,
            Command::ViewPortfolio => {
                let summary = self.portfolio.get_summary(&self.market);
                write!(self.output, "{}", report::PortfolioTable(&summary))?;
            }
            Command::Tick => {
                self.market.simulate_market_movement(&mut self.rng);
                writeln!(self.output, "Market prices have been updated.")?;
            }
            Command::Exit => {}
        }
        Ok(())
    }

    fn trade(&mut self, command: Command) -> io::Result<()> {
        let verb = if command == Command::Buy { "buy" } else { "sell" };

        self.prompt(&format!("Enter the stock symbol to {}: ", verb))?;
        let symbol = self.read_line()?.unwrap_or_default();
        let id = match self.market.require_stock(&symbol) {
            Ok(stock) => stock.id(),
            Err(err) => {
                log::warn!("{}", err);
                writeln!(self.output, "{}", "Invalid stock symbol.".red())?;
                return Ok(());
            }
        };

        self.prompt(&format!("Enter quantity to {}: ", verb))?;
        let raw = self.read_line()?.unwrap_or_default();
        let quantity = match raw.parse::<i64>() {
            Ok(quantity) => quantity,
            Err(_) => {
                writeln!(self.output, "{}", "Invalid quantity.".red())?;
                return Ok(());
            }
        };

        let Some(stock) = self.market.stock(id) else {
            return Ok(());
        };
        let result = if command == Command::Buy {
            self.portfolio.buy_stock(stock, quantity)
        } else {
            self.portfolio.sell_stock(stock, quantity)
        };

        match result {
            Ok(amount) => {
                let past = if command == Command::Buy { "Bought" } else { "Sold" };
                let message = format!(
                    "{} {} shares of {} for ${:.2}",
                    past,
                    quantity,
                    stock.symbol(),
                    amount
                );
                if command == Command::Buy {
                    writeln!(self.output, "{}", message.bright_cyan())?;
                } else {
                    writeln!(self.output, "{}", message.bright_magenta())?;
                }
            }
            Err(err) => {
                log::warn!("Trade rejected: {}", err);
                writeln!(self.output, "{}", err.to_string().red())?;
            }
        }
        Ok(())
    }

    fn print_menu(&mut self) -> io::Result<()> {
        writeln!(self.output, "\nMenu:")?;
        writeln!(self.output, "1. View Market Data")?;
        writeln!(self.output, "2. Buy Stocks")?;
        writeln!(self.output, "3. Sell Stocks")?;
        writeln!(self.output, "4. View Portfolio")?;
        writeln!(self.output, "5. Simulate Market Movement")?;
        writeln!(self.output, "6. Exit")?;
        self.prompt("Choose an option (1-6): ")
    }

    fn prompt(&mut self, text: &str) -> io::Result<()> {
        write!(self.output, "{}", text)?;
        self.output.flush()
    }

    /// Next trimmed line, or `None` at end of input.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    pub fn market(&self) -> &Market {
        &self.market
    }

    pub fn portfolio(&self) -> &Portfolio {
        &self.portfolio
    }

    /// Releases the output sink, e.g. to inspect a captured transcript.
    pub fn into_output(self) -> O {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use std::io::Cursor;

    fn run_script(script: &str) -> (Session<Cursor<Vec<u8>>, Vec<u8>, StepRng>, String) {
        let mut session = Session::new(
            Market::initialize(),
            Portfolio::new(10_000.0),
            Cursor::new(script.as_bytes().to_vec()),
            Vec::new(),
            StepRng::new(0, 0),
        );
        session.run().unwrap();
        let out = String::from_utf8(session.output.clone()).unwrap();
        (session, out)
    }

    #[test]
    fn test_buy_and_sell_through_menu() {
        let (session, out) = run_script("2\naapl\n10\n3\nAAPL\n5\n6\n");

        assert!(out.contains("Bought 10 shares of AAPL for $1450.00"));
        assert!(out.contains("Sold 5 shares of AAPL for $725.00"));
        assert!(out.contains("Thank you for using"));
        assert_eq!(session.portfolio().cash(), 9275.0);
        assert_eq!(session.portfolio().quantity_of("AAPL"), 5);
    }

    #[test]
    fn test_rejections_are_reported_and_loop_continues() {
        let (session, out) = run_script("2\nXYZ\n2\nGOOGL\nten\n2\nGOOGL\n100\n3\nMSFT\n1\n9\n6\n");

        assert!(out.contains("Invalid stock symbol."));
        assert!(out.contains("Invalid quantity."));
        assert!(out.contains("Insufficient cash to buy GOOGL"));
        assert!(out.contains("You do not have enough shares of MSFT to sell"));
        assert!(out.contains("Invalid option, please choose 1-6."));
        assert_eq!(session.portfolio().cash(), 10_000.0);
        assert!(session.portfolio().is_empty());
    }

    #[test]
    fn test_tick_updates_prices() {
        let (session, out) = run_script("5\n1\n");

        assert!(out.contains("Market prices have been updated."));
        assert!(out.contains("AAPL     Apple Inc.           137.75"));
        assert_eq!(session.market().ticks(), 1);
    }

    #[test]
    fn test_eof_ends_session() {
        let (_, out) = run_script("4\n");
        assert!(out.contains("(No holdings)"));
        assert!(out.contains("Thank you for using"));
    }
}
