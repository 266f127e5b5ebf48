// main.rs

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io;
use std::process;

use trading_sim::config::Config;
use trading_sim::session::Session;
use trading_sim::{Market, Portfolio};

fn main() {
    // Quiet by default so log lines don't interleave with the menu.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = run() {
        log::error!("{}", e);
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration (defaults unless overridden by env)
    let config = Config::from_env()?;
    config.validate()?;

    // 2. Build the market and the user's portfolio
    let market = Market::from_config(&config.market)?;
    let portfolio = Portfolio::new(config.starting_cash);

    let rng = match config.seed {
        Some(seed) => {
            log::info!("Using fixed RNG seed {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    // 3. Run the interactive menu until Exit or end of input
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(market, portfolio, stdin.lock(), stdout.lock(), rng);
    session.run()?;
    Ok(())
}
