//! Assembly of the signed payment payload

use super::challenge::SelectedOption;
use crate::config::ClientConfig;
use crate::crypto::eip712::Domain;
use crate::crypto::signature::{parse_address, to_checksum_address};
use crate::types::network::{resolve_chain_id, NetworkConfig};
use crate::types::{
    constants::token, OptionExtra, PaymentData, PaymentOption, PaymentPayload, PaymentRequirement,
    ResourceInfo, X402_VERSION,
};
use crate::{BlockrunError, Result};

/// MIME type reported when the challenge does not name one
pub const DEFAULT_MIME_TYPE: &str = "application/json";

/// Resolve the EIP-712 domain for a payment option
///
/// The chain comes from the option's network, falling back to the configured default.
/// The verifying contract is the option's asset when it is an address, otherwise the
/// USDC deployment of that chain. Configured token name/version win over the ones the
/// server advertises.
pub fn resolve_domain(option: &PaymentOption, config: &ClientConfig) -> Result<Domain> {
    let chain_id = resolve_chain_id(&option.network).unwrap_or(config.default_chain_id);

    let verifying_contract = match parse_address(&option.asset, "asset") {
        Ok(address) => address,
        Err(_) => {
            let network = NetworkConfig::from_chain_id(chain_id).ok_or_else(|| {
                BlockrunError::signing(format!("No USDC contract known for chain {}", chain_id))
            })?;
            parse_address(network.usdc_contract, "asset")?
        }
    };

    let name = config
        .token_name
        .as_deref()
        .or_else(|| option.token_name())
        .unwrap_or(token::DEFAULT_NAME);
    let version = config
        .token_version
        .as_deref()
        .or_else(|| option.token_version())
        .unwrap_or(token::DEFAULT_VERSION);

    Ok(Domain {
        name: name.to_string(),
        version: version.to_string(),
        chain_id,
        verifying_contract,
    })
}

/// Resource info echoed in the payload
///
/// The server URL is kept verbatim; `request_url` only fills an absent one.
pub fn resolve_resource(requirement: &PaymentRequirement, request_url: &str) -> ResourceInfo {
    let resource = &requirement.resource;
    ResourceInfo {
        url: if resource.url.is_empty() {
            request_url.to_string()
        } else {
            resource.url.clone()
        },
        description: resource.description.clone(),
        mime_type: if resource.mime_type.is_empty() {
            DEFAULT_MIME_TYPE.to_string()
        } else {
            resource.mime_type.clone()
        },
    }
}

/// Combine the chosen option and its signed authorization into a payload
pub fn build_payment_payload(
    requirement: &PaymentRequirement,
    selected: &SelectedOption,
    domain: &Domain,
    payment: PaymentData,
    request_url: &str,
) -> PaymentPayload {
    let option = &selected.option;
    let asset = if parse_address(&option.asset, "asset").is_ok() {
        option.asset.clone()
    } else {
        to_checksum_address(&domain.verifying_contract)
    };

    let accepted = PaymentOption {
        scheme: option.scheme.clone(),
        network: option.network.clone(),
        amount: selected.amount().to_string(),
        asset,
        pay_to: option.pay_to.clone(),
        max_timeout_seconds: option.max_timeout_seconds,
        extra: Some(OptionExtra::token(&domain.name, &domain.version)),
    };

    PaymentPayload {
        x402_version: X402_VERSION,
        resource: resolve_resource(requirement, request_url),
        accepted,
        payload: payment,
        extensions: requirement.extensions.clone(),
    }
}

/// Base64 value for the `PAYMENT-SIGNATURE` header
pub fn encode_payment_payload(payload: &PaymentPayload) -> Result<String> {
    payload.to_base64()
}
