//! Cryptographic utilities for x402 payments
//!
//! This module provides the primitives behind the payment handshake: EIP-712 typed
//! data hashing, ECDSA signing over secp256k1, signer recovery and nonce generation.
//!
//! # Architecture
//!
//! - [`eip712`] - EIP-712 domain and `TransferWithAuthorization` hashing
//! - [`signature`] - Digest signing, signature recovery, address derivation and nonces
//!
//! # Examples
//!
//! ## EIP-712 Typed Data Hashing
//!
//! ```
//! use blockrun_llm::crypto::eip712::{
//!     create_transfer_with_authorization_hash, Domain, TransferWithAuthorization,
//! };
//! use ethereum_types::{Address, H256, U256};
//! use std::str::FromStr;
//!
//! let domain = Domain {
//!     name: "USD Coin".to_string(),
//!     version: "2".to_string(),
//!     chain_id: 8453,
//!     verifying_contract: Address::from_str("833589fCD6eDb6E08f4c7C32D4f71b54bdA02913").unwrap(),
//! };
//!
//! let message = TransferWithAuthorization {
//!     from: Address::from_low_u64_be(1),
//!     to: Address::from_low_u64_be(2),
//!     value: U256::from(1_000_000u64),
//!     valid_after: U256::zero(),
//!     valid_before: U256::from(u64::MAX),
//!     nonce: H256::zero(),
//! };
//!
//! let digest = create_transfer_with_authorization_hash(&domain, &message);
//! assert_ne!(digest, H256::zero());
//! ```
//!
//! ## Generating Nonces
//!
//! ```
//! use blockrun_llm::crypto::signature::{format_nonce, generate_nonce};
//!
//! let nonce = generate_nonce().unwrap();
//! assert_eq!(format_nonce(&nonce).len(), 66);
//! ```

pub mod eip712;
pub mod signature;


// Re-export commonly used items
pub use eip712::{Domain, TransferWithAuthorization};
pub use signature::{
    address_from_secret_key, format_nonce, generate_nonce, recover_signer, sign_digest,
    to_checksum_address, verify_eip712_signature,
};
