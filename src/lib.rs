//! # BlockRun LLM client
//!
//! Pay-per-request access to the BlockRun LLM and image APIs using **x402**
//! micropayments: the server answers an unpaid request with HTTP 402 and a payment
//! challenge, the client signs an EIP-3009 `TransferWithAuthorization` for the
//! requested USDC amount with a local key, and retries the request once with the
//! signature attached.
//!
//! ## Features
//!
//! - **x402 v2 handshake**: `payment-required` challenge in, `PAYMENT-SIGNATURE` payload out
//! - **EIP-712 signing**: local secp256k1 signing, the private key never leaves the process
//! - **Session ledger**: total USD spent and number of paid calls
//! - **OpenAI-compatible chat**, image generation and model listings
//! - **Wallet store**: key persistence under `~/.blockrun`
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use blockrun_llm::{ChatCompletionOptions, ChatMessage, LlmClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // An empty key falls back to BASE_CHAIN_WALLET_KEY
//!     let mut client = LlmClient::new("")?;
//!
//!     let reply = client.chat("openai/gpt-4o", "Say hello").await?;
//!     println!("{}", reply);
//!
//!     let options = ChatCompletionOptions::new().with_max_tokens(256).with_search(true);
//!     let response = client
//!         .chat_completion("xai/grok-3", vec![ChatMessage::user("Latest Base news?")], Some(&options))
//!         .await?;
//!     println!("{:?}", response.usage);
//!
//!     println!("Spent ${:.6}", client.spending().total_usd);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - **`types`**: Wire structures of the handshake and the REST API
//! - **`crypto`**: EIP-712 hashing, signing, recovery and nonces
//! - **`wallet`**: Signing wallet and on-disk key store
//! - **`payment`**: Challenge parsing, payload assembly and the spending ledger
//! - **`client`**: The payment state machine and the LLM/image clients
//! - **`config`**: Client configuration and environment overrides
//! - **`validation`**: Input checks run before any network call
//! - **`error`**: Error handling
//!
//! ## Blockchain Support
//!
//! - **Base**: mainnet (`eip155:8453`) and Sepolia (`eip155:84532`)
//! - **Avalanche**: C-Chain and Fuji
//! - Other `eip155:<id>` chains when the challenge names the token contract

pub mod client;
pub mod config;
pub mod crypto;
pub mod error;
pub mod payment;
pub mod types;
pub mod validation;
pub mod wallet;

// Re-exports for convenience
pub use client::{ImageClient, LlmClient};
pub use config::ClientConfig;
pub use error::{BlockrunError, Result};
pub use payment::Spending;
pub use types::*;
pub use wallet::{Wallet, WalletStore};

/// Current version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
