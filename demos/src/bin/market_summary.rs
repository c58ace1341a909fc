//! Demo: Market Summary
//!
//! Showcases: public market data over REST, no credentials needed
//!
//! Run: cargo run --bin market_summary

use buda_rest::BudaClient;
use colored::*;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    println!("{}", "═".repeat(60).cyan());
    println!("{}", "  MARKET SUMMARY".cyan().bold());
    println!("{}", "  Buda SDK Demo - Public REST Endpoints".cyan());
    println!("{}", "═".repeat(60).cyan());
    println!();

    let client = BudaClient::new();

    let markets = client.markets().await?;
    println!("{} {} markets available\n", "✓".green(), markets.len());

    for market in markets.iter().take(5) {
        let ticker = client.ticker(&market.id).await?;
        let book = client.order_book(&market.id).await?;

        println!("{}", market.id.yellow().bold());
        println!("  Last:   {}", ticker.last_price);
        println!("  Ask:    {}", ticker.min_ask);
        println!("  Bid:    {}", ticker.max_bid);
        println!("  Volume: {}", ticker.volume);
        if let Some(spread) = book.spread() {
            println!("  Spread: {}", spread);
        }
        println!();
    }

    Ok(())
}
