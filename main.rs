//! BlockRun chat CLI
//!
//! Sends one prompt to a BlockRun model and pays for it with x402.
//!
//! ```text
//! blockrun-chat [MODEL] PROMPT...
//! ```
//!
//! The key is read from `BLOCKRUN_WALLET_KEY`, then `BASE_CHAIN_WALLET_KEY`, then
//! `~/.blockrun/.session`. A new wallet is created and saved when none exists.

use blockrun_llm::{ClientConfig, LlmClient, WalletStore};
use std::env;

const DEFAULT_MODEL: &str = "openai/gpt-4o-mini";

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let mut args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() {
        eprintln!("Usage: blockrun-chat [MODEL] PROMPT...");
        std::process::exit(2);
    }
    let model = if args.len() > 1 && args[0].contains('/') {
        args.remove(0)
    } else {
        DEFAULT_MODEL.to_string()
    };
    let prompt = args.join(" ");

    let wallet = WalletStore::default_location()?.get_or_create()?;
    if wallet.is_new {
        println!("Created a new wallet: {}", wallet.address);
        println!("Fund it with USDC on Base, then run this command again.");
        return Ok(());
    }

    let mut client = LlmClient::with_config(&wallet.private_key, ClientConfig::from_env())?;
    tracing::info!(address = %client.wallet_address(), model = %model, "Sending prompt");

    match client.chat(&model, &prompt).await {
        Ok(reply) => println!("{}", reply),
        Err(e) => {
            eprintln!("Request failed: {}", e);
            std::process::exit(1);
        }
    }

    let spending = client.spending();
    println!(
        "\nSpent ${:.6} USDC over {} paid call(s)",
        spending.total_usd, spending.calls
    );
    Ok(())
}
