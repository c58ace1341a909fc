//! Demo: Account Overview
//!
//! Showcases: authenticated endpoints - balances, fees, and quotations.
//! Everything here is read-only or simulated; nothing trades.
//!
//! Run: BUDA_API_KEY=... BUDA_API_SECRET=... cargo run --bin account_overview

use buda_rest::{BudaClient, Credentials, QuotationKind};
use buda_types::OrderSide;
use colored::*;
use rust_decimal_macros::dec;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    println!("{}", "═".repeat(60).cyan());
    println!("{}", "  ACCOUNT OVERVIEW".cyan().bold());
    println!("{}", "  Buda SDK Demo - Authenticated Endpoints".cyan());
    println!("{}", "═".repeat(60).cyan());
    println!();

    let creds = match Credentials::from_env() {
        Ok(creds) => creds,
        Err(e) => {
            println!("{} {}", "✗".red(), e);
            println!("Set BUDA_API_KEY and BUDA_API_SECRET to run this demo.");
            return Ok(());
        }
    };

    let client = BudaClient::with_credentials(creds);

    println!("{}", "--- Balances ---".yellow());
    for balance in client.balances().await? {
        println!("  {}: {} available", balance.id, balance.available_amount);
    }
    println!();

    println!("{}", "--- Trading Fees (BTC-CLP) ---".yellow());
    let fee = client
        .fee_percentage("btc-clp", OrderSide::Bid, false)
        .await?;
    println!("  Bid limit orders pay {}%", fee.fee);
    println!();

    println!("{}", "--- Quotation: buying 0.01 BTC ---".yellow());
    let quotation = client
        .quotation("btc-clp", QuotationKind::BidGivenSize, dec!(0.01), None)
        .await?;
    if let Some(quote_exchanged) = &quotation.quote_exchanged {
        println!("  Would exchange {}", quote_exchanged);
    }
    if let Some(fee) = &quotation.fee {
        println!("  Fee: {}", fee);
    }

    Ok(())
}
