//! Payment-related types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// x402 protocol version spoken by this client
pub const X402_VERSION: u32 = 2;

/// Payment requirements sent by the server with an HTTP 402 response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRequirement {
    /// Protocol version
    #[serde(rename = "x402Version")]
    pub x402_version: u32,
    /// Acceptable payment options, in server preference order
    #[serde(default)]
    pub accepts: Vec<PaymentOption>,
    /// The protected resource
    #[serde(default)]
    pub resource: ResourceInfo,
    /// Protocol extensions, passed through untouched
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Map<String, Value>>,
    /// Human-readable reason (v1 servers)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PaymentRequirement {
    /// Decode a base64-encoded `payment-required` header value
    pub fn from_base64(encoded: &str) -> crate::Result<Self> {
        use base64::{engine::general_purpose, Engine as _};
        let decoded = general_purpose::STANDARD.decode(encoded.trim())?;
        let requirement: PaymentRequirement = serde_json::from_slice(&decoded)?;
        Ok(requirement)
    }

    /// Encode the requirement the way a server puts it in the header
    pub fn to_base64(&self) -> crate::Result<String> {
        use base64::{engine::general_purpose, Engine as _};
        let json = serde_json::to_string(self)?;
        Ok(general_purpose::STANDARD.encode(json))
    }
}

/// A single payment option
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentOption {
    /// Payment scheme identifier (e.g., "exact")
    pub scheme: String,
    /// Chain-namespaced network identifier (e.g., "eip155:8453")
    pub network: String,
    /// Amount in the token's smallest unit, as a decimal string
    #[serde(default)]
    pub amount: String,
    /// Token contract address
    #[serde(default)]
    pub asset: String,
    /// Recipient wallet address
    #[serde(rename = "payTo")]
    pub pay_to: String,
    /// Maximum time allowed for payment completion in seconds
    #[serde(rename = "maxTimeoutSeconds", default)]
    pub max_timeout_seconds: u64,
    /// Scheme-specific additional information
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra: Option<OptionExtra>,
}

/// Where the amount of an option came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AmountSource {
    /// v2 `amount` field
    Amount(String),
    /// v1 `extra.maxAmountRequired` field
    LegacyMaxAmountRequired(String),
}

impl AmountSource {
    /// The amount string, whatever its origin
    pub fn value(&self) -> &str {
        match self {
            AmountSource::Amount(value) | AmountSource::LegacyMaxAmountRequired(value) => value,
        }
    }
}

impl PaymentOption {
    /// Resolve the payable amount, preferring `amount` over the legacy extra field
    pub fn resolve_amount(&self) -> Option<AmountSource> {
        if !self.amount.is_empty() {
            return Some(AmountSource::Amount(self.amount.clone()));
        }
        self.extra
            .as_ref()
            .and_then(|extra| extra.max_amount_required.as_deref())
            .filter(|legacy| !legacy.is_empty())
            .map(|legacy| AmountSource::LegacyMaxAmountRequired(legacy.to_string()))
    }

    /// Token name advertised for the EIP-712 domain, if any
    pub fn token_name(&self) -> Option<&str> {
        self.extra.as_ref().and_then(|extra| extra.name.as_deref())
    }

    /// Token version advertised for the EIP-712 domain, if any
    pub fn token_version(&self) -> Option<&str> {
        self.extra.as_ref().and_then(|extra| extra.version.as_deref())
    }
}

/// Typed view of a payment option's `extra` map
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OptionExtra {
    /// EIP-712 token name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// EIP-712 token version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Legacy v1 amount field
    #[serde(rename = "maxAmountRequired", skip_serializing_if = "Option::is_none")]
    pub max_amount_required: Option<String>,
    /// Any other keys the server sent
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl OptionExtra {
    /// Token metadata only, as echoed in the `accepted` option
    pub fn token(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            version: Some(version.into()),
            ..Self::default()
        }
    }
}

/// Information about the resource being paid for
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceInfo {
    /// URL of the protected resource
    #[serde(default)]
    pub url: String,
    /// Human-readable description of the resource
    #[serde(default)]
    pub description: String,
    /// MIME type of the expected response
    #[serde(rename = "mimeType", default)]
    pub mime_type: String,
}

/// Signed payment payload sent in the `PAYMENT-SIGNATURE` header
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentPayload {
    /// Protocol version identifier
    #[serde(rename = "x402Version")]
    pub x402_version: u32,
    /// The resource being paid for
    pub resource: ResourceInfo,
    /// The option the client accepted
    pub accepted: PaymentOption,
    /// Signature and authorization
    pub payload: PaymentData,
    /// Extensions echoed from the requirement
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Map<String, Value>>,
}

impl PaymentPayload {
    /// Decode a base64-encoded payment payload
    pub fn from_base64(encoded: &str) -> crate::Result<Self> {
        use base64::{engine::general_purpose, Engine as _};
        let decoded = general_purpose::STANDARD.decode(encoded)?;
        let payload: PaymentPayload = serde_json::from_slice(&decoded)?;
        Ok(payload)
    }

    /// Encode the payment payload to base64
    pub fn to_base64(&self) -> crate::Result<String> {
        use base64::{engine::general_purpose, Engine as _};
        let json = serde_json::to_string(self)?;
        Ok(general_purpose::STANDARD.encode(json))
    }
}

/// Signature plus the authorization it covers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentData {
    /// 65-byte EIP-712 signature, 0x-prefixed hex
    pub signature: String,
    /// EIP-3009 authorization parameters
    pub authorization: TransferAuthorization,
}

/// EIP-3009 `TransferWithAuthorization` parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferAuthorization {
    /// Payer's wallet address
    pub from: String,
    /// Recipient's wallet address
    pub to: String,
    /// Payment amount in atomic units
    pub value: String,
    /// Unix timestamp when authorization becomes valid
    #[serde(rename = "validAfter")]
    pub valid_after: String,
    /// Unix timestamp when authorization expires
    #[serde(rename = "validBefore")]
    pub valid_before: String,
    /// 32-byte random nonce to prevent replay attacks
    pub nonce: String,
}

impl TransferAuthorization {
    /// Length of the validity window in seconds
    pub fn validity_window(&self) -> crate::Result<i64> {
        let valid_after: i64 = self.valid_after.parse().map_err(|_| {
            crate::BlockrunError::signing("Invalid validAfter timestamp")
        })?;
        let valid_before: i64 = self.valid_before.parse().map_err(|_| {
            crate::BlockrunError::signing("Invalid validBefore timestamp")
        })?;
        Ok(valid_before - valid_after)
    }
}
