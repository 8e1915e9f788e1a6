//! BlockRun API clients
//!
//! [`LlmClient`] and [`ImageClient`] are thin wrappers over a shared
//! [`PaymentOrchestrator`], which sends each request, answers an HTTP 402
//! challenge with a signed EIP-3009 authorization and retries exactly once.
//!
//! # Architecture
//!
//! - [`transport`] - the [`Transport`] seam and its `reqwest` implementation
//! - [`orchestrator`] - the payment state machine and session ledger
//! - [`llm`] - chat completions and model listings
//! - [`image`] - image generation
//!
//! # Examples
//!
//! ```no_run
//! use blockrun_llm::client::LlmClient;
//!
//! # async fn example() -> blockrun_llm::Result<()> {
//! let mut client = LlmClient::new("0x...your key...")?;
//! let reply = client.chat("openai/gpt-4o", "What is x402?").await?;
//! println!("{}", reply);
//!
//! let spending = client.spending();
//! println!("Spent ${:.4} over {} calls", spending.total_usd, spending.calls);
//! # Ok(())
//! # }
//! ```

pub mod image;
pub mod llm;
pub mod orchestrator;
pub mod transport;


pub use image::ImageClient;
pub use llm::LlmClient;
pub use orchestrator::{PaymentOrchestrator, PaymentState};
pub use transport::{HttpTransport, Transport, TransportRequest, TransportResponse};
