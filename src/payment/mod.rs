//! x402 payment handshake components
//!
//! A paid call runs through these pieces in order:
//! - [`challenge`] - find and decode the 402 challenge, pick the option to pay
//! - [`builder`] - resolve the EIP-712 domain and assemble the signed payload
//! - [`ledger`] - record settled payments for the session
//!
//! Signing itself lives in [`crate::wallet::Wallet`]; the request/response state
//! machine that drives all of this is [`crate::client::PaymentOrchestrator`].
//!
//! # Examples
//!
//! ```
//! use blockrun_llm::payment::challenge::{parse_challenge, select_option, ChallengeSource};
//!
//! # fn example() -> blockrun_llm::Result<()> {
//! let body = br#"{"x402Version":2,"accepts":[{"scheme":"exact","network":"eip155:8453",
//!     "amount":"1000","asset":"0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913",
//!     "payTo":"0x209693Bc6afc0C5328bA36FaF03C514EF312287C","maxTimeoutSeconds":300}]}"#;
//!
//! let source = ChallengeSource::from_body(body).expect("body carries a challenge");
//! let requirement = parse_challenge(&source)?;
//! let selected = select_option(&requirement)?;
//! assert_eq!(selected.atomic_amount, 1000);
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod challenge;
pub mod ledger;

#[cfg(test)]
mod tests;

pub use builder::{build_payment_payload, encode_payment_payload, resolve_domain};
pub use challenge::{parse_challenge, select_option, ChallengeSource, SelectedOption};
pub use ledger::{Spending, SpendingLedger};
