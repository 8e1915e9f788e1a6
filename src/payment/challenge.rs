//! Decoding of 402 payment challenges

use crate::types::constants::headers::PAYMENT_REQUIRED;
use crate::types::{AmountSource, PaymentOption, PaymentRequirement};
use crate::{BlockrunError, Result};
use http::HeaderMap;
use serde::Deserialize;
use serde_json::value::RawValue;

/// Where a challenge was found in a 402 response
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChallengeSource {
    /// Base64 value of the `payment-required` header
    Header(String),
    /// Raw JSON bytes taken from the response body
    Body(Vec<u8>),
}

/// Marker keys of a challenge embedded in a response body
#[derive(Deserialize)]
struct BodyChallenge<'a> {
    #[serde(borrow, default)]
    x402: Option<&'a RawValue>,
    #[serde(rename = "x402Version", borrow, default)]
    x402_version: Option<&'a RawValue>,
}

impl ChallengeSource {
    /// Locate the challenge of a 402 response, header first
    pub fn from_response(headers: &HeaderMap, body: &[u8]) -> Option<Self> {
        let header = headers
            .get(PAYMENT_REQUIRED)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty());

        match header {
            Some(value) => Some(Self::Header(value.to_string())),
            None => Self::from_body(body),
        }
    }

    /// Body fallback; the bytes are passed on as received, never re-encoded
    pub fn from_body(body: &[u8]) -> Option<Self> {
        let marker: BodyChallenge<'_> = serde_json::from_slice(body).ok()?;

        match marker.x402 {
            Some(raw) if raw.get().starts_with('{') => Some(Self::Body(raw.get().as_bytes().to_vec())),
            Some(raw) if raw.get().starts_with('"') => serde_json::from_str::<String>(raw.get())
                .ok()
                .map(Self::Header),
            Some(_) => Some(Self::Body(body.to_vec())),
            None if marker.x402_version.is_some() => Some(Self::Body(body.to_vec())),
            None => None,
        }
    }
}

/// Decode a challenge into a payment requirement
pub fn parse_challenge(source: &ChallengeSource) -> Result<PaymentRequirement> {
    let decoded = match source {
        ChallengeSource::Header(value) => PaymentRequirement::from_base64(value),
        ChallengeSource::Body(bytes) => serde_json::from_slice(bytes).map_err(BlockrunError::from),
    };
    decoded.map_err(|e| BlockrunError::payment_caused_by("challenge is unparsable", e))
}

/// The option the client will pay, with its amount resolved
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedOption {
    pub option: PaymentOption,
    pub amount: AmountSource,
    /// Amount in the token's smallest unit
    pub atomic_amount: u128,
}

impl SelectedOption {
    /// The resolved amount string
    pub fn amount(&self) -> &str {
        self.amount.value()
    }
}

/// Pick the first offered option and resolve its amount
pub fn select_option(requirement: &PaymentRequirement) -> Result<SelectedOption> {
    let option = requirement
        .accepts
        .first()
        .ok_or_else(|| BlockrunError::payment("no payment options offered"))?;

    let amount = option
        .resolve_amount()
        .ok_or_else(|| BlockrunError::payment("no amount found"))?;

    let value = amount.value();
    if !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(BlockrunError::payment(format!(
            "amount is not a base-10 integer: {}",
            value
        )));
    }
    let atomic_amount = value
        .parse::<u128>()
        .map_err(|_| BlockrunError::payment(format!("amount out of range: {}", value)))?;

    Ok(SelectedOption {
        option: option.clone(),
        amount,
        atomic_amount,
    })
}
