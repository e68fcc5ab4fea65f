//! Shared page checkout against the eWAY sandbox.
//!
//! Run with: cargo run -p eway-client --example shared_checkout
//!
//! Reads `EWAY_API_KEY` and `EWAY_API_PASSWORD` (a `.env` file works too).
//! Without `EWAY_ACCESS_CODE` it creates an access code and prints the
//! shared page URL; with it, it prints the transaction result.

use std::env;
use std::str::FromStr;

use anyhow::Context;
use eway_client::{ClientConfig, Credentials, GatewayClient};
use eway_types::{Environment, RequestBuilder};
use rust_decimal::Decimal;

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,eway_client=debug".into()),
        )
        .init();

    let api_key = env::var("EWAY_API_KEY").context("EWAY_API_KEY environment variable is required")?;
    let password = env::var("EWAY_API_PASSWORD")
        .context("EWAY_API_PASSWORD environment variable is required")?;
    let sandbox = env_or("EWAY_SANDBOX", "true").parse::<bool>()?;

    let config = ClientConfig::new(Environment::from_sandbox_flag(sandbox));
    tracing::info!("Using {} gateway at {}", config.environment, config.base_url());
    let client = GatewayClient::with_config(Credentials::new(api_key, password), config)?;

    if let Ok(access_code) = env::var("EWAY_ACCESS_CODE") {
        let result = client.get_transaction_result(&access_code).await?;
        println!(
            "{} transaction {:?} for {} cents",
            if result.is_approved() { "✓ Approved" } else { "✗ Not approved" },
            result.transaction_id,
            result.total_amount
        );
        for message in result.messages() {
            println!("   {}: {}", message.code(), message);
        }
        return Ok(());
    }

    let amount = Decimal::from_str(&env_or("EWAY_AMOUNT", "10.00"))?;

    let mut builder = RequestBuilder::new();
    builder
        .redirect_url(&env_or("EWAY_REDIRECT_URL", "http://localhost:3000/complete"))?
        .cancel_url(&env_or("EWAY_CANCEL_URL", "http://localhost:3000/cancel"))?
        .header_text("Example Store")?
        .customer_title("Ms.")?
        .customer_first_name("Jane")?
        .customer_last_name("Doe")?
        .customer_email(&env_or("EWAY_CUSTOMER_EMAIL", "jane@example.com"))?
        .payment_total_amount(amount)?
        .payment_invoice_number("INV-0001")?
        .payment_invoice_description("Example order")?;

    let access = client
        .create_access_code(&builder.build_access_code_request())
        .await?;

    println!("Access code: {}", access.access_code);
    match access.shared_payment_url {
        Some(url) => println!("Send the customer to: {url}"),
        None => println!("Gateway returned no shared page URL"),
    }
    Ok(())
}
