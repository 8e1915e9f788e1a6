//! Core types for the BlockRun client
//!
//! This module defines the wire structures of the x402 handshake and the request and
//! response bodies of the BlockRun REST API.
//!
//! # Architecture
//!
//! - [`payment`] - x402 v2 payment requirement and payload structures
//! - [`network`] - Chain ids and USDC contracts per network
//! - [`constants`] - Protocol constants (networks, schemes, headers, token defaults)
//! - [`chat`] - Chat completion and model listing bodies
//! - [`image`] - Image generation bodies
//!
//! # Examples
//!
//! ## Decoding a payment challenge
//!
//! ```
//! use blockrun_llm::types::{PaymentOption, PaymentRequirement, ResourceInfo};
//!
//! # fn example() -> blockrun_llm::Result<()> {
//! let requirement = PaymentRequirement {
//!     x402_version: 2,
//!     accepts: vec![PaymentOption {
//!         scheme: "exact".to_string(),
//!         network: "eip155:8453".to_string(),
//!         amount: "1000".to_string(),
//!         asset: "0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913".to_string(),
//!         pay_to: "0x209693Bc6afc0C5328bA36FaF03C514EF312287C".to_string(),
//!         max_timeout_seconds: 300,
//!         extra: None,
//!     }],
//!     resource: ResourceInfo::default(),
//!     extensions: None,
//!     error: None,
//! };
//!
//! let header = requirement.to_base64()?;
//! assert_eq!(PaymentRequirement::from_base64(&header)?, requirement);
//! # Ok(())
//! # }
//! ```

pub mod chat;
pub mod constants;
pub mod image;
pub mod network;
pub mod payment;

// Re-export commonly used types
pub use chat::{
    AllModel, ChatCompletionOptions, ChatCompletionRequest, ChatMessage, ChatResponse, Choice,
    Model, ModelKind, Usage,
};
pub use constants::{headers, networks, schemes, token};
pub use image::{
    ImageData, ImageGenerateOptions, ImageGenerationRequest, ImageModel, ImageResponse,
};
pub use network::NetworkConfig;
pub use payment::{
    AmountSource, OptionExtra, PaymentData, PaymentOption, PaymentPayload, PaymentRequirement,
    ResourceInfo, TransferAuthorization, X402_VERSION,
};
