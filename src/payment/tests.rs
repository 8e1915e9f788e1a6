//! Tests for challenge parsing and payload assembly

use super::builder::{build_payment_payload, resolve_domain, resolve_resource, DEFAULT_MIME_TYPE};
use super::challenge::{parse_challenge, select_option, ChallengeSource};
use crate::config::ClientConfig;
use crate::crypto::signature::parse_address;
use crate::types::{
    AmountSource, OptionExtra, PaymentData, PaymentOption, PaymentPayload, PaymentRequirement,
    ResourceInfo, TransferAuthorization,
};
use crate::BlockrunError;
use http::{HeaderMap, HeaderValue};
use serde_json::{json, Map};

const PAY_TO: &str = "0x209693Bc6afc0C5328bA36FaF03C514EF312287C";
const BASE_USDC: &str = "0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913";

fn option(amount: &str) -> PaymentOption {
    PaymentOption {
        scheme: "exact".to_string(),
        network: "eip155:8453".to_string(),
        amount: amount.to_string(),
        asset: BASE_USDC.to_string(),
        pay_to: PAY_TO.to_string(),
        max_timeout_seconds: 300,
        extra: None,
    }
}

fn requirement(accepts: Vec<PaymentOption>) -> PaymentRequirement {
    PaymentRequirement {
        x402_version: 2,
        accepts,
        resource: ResourceInfo {
            url: "https://blockrun.ai/api/v1/chat/completions".to_string(),
            description: "Chat completion".to_string(),
            mime_type: String::new(),
        },
        extensions: None,
        error: None,
    }
}

fn payment_data() -> PaymentData {
    PaymentData {
        signature: format!("0x{}", "ab".repeat(65)),
        authorization: TransferAuthorization {
            from: "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266".to_string(),
            to: PAY_TO.to_string(),
            value: "1000".to_string(),
            valid_after: "1749999400".to_string(),
            valid_before: "1750000300".to_string(),
            nonce: format!("0x{}", "07".repeat(32)),
        },
    }
}

fn assert_payment_error(err: BlockrunError, needle: &str) {
    match err {
        BlockrunError::Payment { message, .. } => {
            assert!(message.contains(needle), "{} does not mention {}", message, needle)
        }
        other => panic!("expected payment error, got {:?}", other),
    }
}

#[test]
fn test_header_takes_precedence_over_body() {
    let encoded = requirement(vec![option("1000")]).to_base64().unwrap();
    let mut headers = HeaderMap::new();
    headers.insert("payment-required", HeaderValue::from_str(&encoded).unwrap());

    let source = ChallengeSource::from_response(&headers, br#"{"x402Version":2}"#).unwrap();
    assert_eq!(source, ChallengeSource::Header(encoded));
}

#[test]
fn test_body_fallback_variants() {
    let headers = HeaderMap::new();

    let nested = br#"{"error":"payment required","x402":{"x402Version":2,"accepts":[]}}"#;
    assert_eq!(
        ChallengeSource::from_response(&headers, nested),
        Some(ChallengeSource::Body(br#"{"x402Version":2,"accepts":[]}"#.to_vec()))
    );

    let encoded = requirement(vec![option("1000")]).to_base64().unwrap();
    let as_string = json!({ "x402": encoded }).to_string();
    assert_eq!(
        ChallengeSource::from_body(as_string.as_bytes()),
        Some(ChallengeSource::Header(encoded))
    );

    let top_level = br#"{"x402Version":2,"accepts":[]}"#;
    assert_eq!(
        ChallengeSource::from_body(top_level),
        Some(ChallengeSource::Body(top_level.to_vec()))
    );

    assert_eq!(ChallengeSource::from_body(br#"{"error":"nope"}"#), None);
    assert_eq!(ChallengeSource::from_body(b"<html>402</html>"), None);
}

#[test]
fn test_body_challenge_keeps_raw_bytes() {
    let body = br#"{"x402":{"x402Version":2,"accepts":[{"scheme":"exact","network":"eip155:8453","amount":"123456789012345678901234567890","payTo":"0x209693Bc6afc0C5328bA36FaF03C514EF312287C"}]}}"#;
    let source = ChallengeSource::from_body(body).unwrap();
    let parsed = parse_challenge(&source).unwrap();
    assert_eq!(parsed.accepts[0].amount, "123456789012345678901234567890");
}

#[test]
fn test_unparsable_challenges() {
    let bad_base64 = ChallengeSource::Header("!!!not-base64!!!".to_string());
    assert_payment_error(parse_challenge(&bad_base64).unwrap_err(), "challenge is unparsable");

    use base64::{engine::general_purpose, Engine as _};
    let bad_json = ChallengeSource::Header(general_purpose::STANDARD.encode("{not json"));
    assert_payment_error(parse_challenge(&bad_json).unwrap_err(), "challenge is unparsable");

    let bad_body = ChallengeSource::Body(b"[1,2,3]".to_vec());
    assert_payment_error(parse_challenge(&bad_body).unwrap_err(), "challenge is unparsable");
}

#[test]
fn test_select_first_option() {
    let mut second = option("2000");
    second.network = "eip155:84532".to_string();
    let selected = select_option(&requirement(vec![option("1000"), second])).unwrap();

    assert_eq!(selected.option.network, "eip155:8453");
    assert_eq!(selected.amount, AmountSource::Amount("1000".to_string()));
    assert_eq!(selected.atomic_amount, 1000);
}

#[test]
fn test_select_legacy_amount() {
    let mut legacy = option("");
    legacy.extra = Some(OptionExtra {
        max_amount_required: Some("250000".to_string()),
        ..OptionExtra::default()
    });
    let selected = select_option(&requirement(vec![legacy])).unwrap();
    assert_eq!(
        selected.amount,
        AmountSource::LegacyMaxAmountRequired("250000".to_string())
    );
    assert_eq!(selected.amount(), "250000");
}

#[test]
fn test_select_errors() {
    assert_payment_error(
        select_option(&requirement(vec![])).unwrap_err(),
        "no payment options offered",
    );
    assert_payment_error(
        select_option(&requirement(vec![option("")])).unwrap_err(),
        "no amount found",
    );
    assert_payment_error(
        select_option(&requirement(vec![option("1.5")])).unwrap_err(),
        "not a base-10 integer",
    );
    assert_payment_error(
        select_option(&requirement(vec![option("-100")])).unwrap_err(),
        "not a base-10 integer",
    );
}

#[test]
fn test_resolve_domain() {
    let config = ClientConfig::new();

    let domain = resolve_domain(&option("1000"), &config).unwrap();
    assert_eq!(domain.chain_id, 8453);
    assert_eq!(domain.name, "USD Coin");
    assert_eq!(domain.version, "2");
    assert_eq!(domain.verifying_contract, parse_address(BASE_USDC, "asset").unwrap());

    let mut sepolia = option("1000");
    sepolia.network = "base-sepolia".to_string();
    sepolia.asset = String::new();
    sepolia.extra = Some(OptionExtra::token("USDC", "2"));
    let domain = resolve_domain(&sepolia, &config).unwrap();
    assert_eq!(domain.chain_id, 84532);
    assert_eq!(domain.name, "USDC");
    assert_eq!(
        domain.verifying_contract,
        parse_address("0x036CbD53842c5426634e7929541eC2318f3dCF7e", "asset").unwrap()
    );

    let mut unknown = option("1000");
    unknown.network = "mystery-chain".to_string();
    let domain = resolve_domain(&unknown, &config.clone().with_default_chain(84532)).unwrap();
    assert_eq!(domain.chain_id, 84532);
}

#[test]
fn test_resolve_domain_overrides_and_failures() {
    let mut with_extra = option("1000");
    with_extra.extra = Some(OptionExtra::token("USDC", "1"));
    let config = ClientConfig::new().with_token_domain("Bridged USDC", "2");
    let domain = resolve_domain(&with_extra, &config).unwrap();
    assert_eq!(domain.name, "Bridged USDC");
    assert_eq!(domain.version, "2");

    let mut orphan = option("1000");
    orphan.network = "eip155:10".to_string();
    orphan.asset = "usdc".to_string();
    let err = resolve_domain(&orphan, &ClientConfig::new()).unwrap_err();
    assert!(matches!(err, BlockrunError::Signing { .. }));
}

#[test]
fn test_resource_defaults() {
    let mut req = requirement(vec![option("1000")]);
    let resource = resolve_resource(&req, "http://localhost/v1/chat/completions");
    assert_eq!(resource.url, "https://blockrun.ai/api/v1/chat/completions");
    assert_eq!(resource.mime_type, DEFAULT_MIME_TYPE);

    req.resource = ResourceInfo {
        url: String::new(),
        description: String::new(),
        mime_type: "text/plain".to_string(),
    };
    let resource = resolve_resource(&req, "http://localhost/v1/chat/completions");
    assert_eq!(resource.url, "http://localhost/v1/chat/completions");
    assert_eq!(resource.mime_type, "text/plain");
}

#[test]
fn test_build_payment_payload() {
    let mut extensions = Map::new();
    extensions.insert("bazaar".to_string(), json!({"discoverable": true}));

    let mut legacy = option("");
    legacy.extra = Some(OptionExtra {
        max_amount_required: Some("1000".to_string()),
        ..OptionExtra::default()
    });
    let mut req = requirement(vec![legacy]);
    req.extensions = Some(extensions.clone());

    let selected = select_option(&req).unwrap();
    let domain = resolve_domain(&selected.option, &ClientConfig::new()).unwrap();
    let payload = build_payment_payload(&req, &selected, &domain, payment_data(), "http://unused");

    assert_eq!(payload.x402_version, 2);
    assert_eq!(payload.accepted.amount, "1000");
    assert_eq!(payload.accepted.asset, BASE_USDC);
    assert_eq!(payload.accepted.pay_to, PAY_TO);
    assert_eq!(
        payload.accepted.extra,
        Some(OptionExtra::token("USD Coin", "2"))
    );
    assert_eq!(payload.resource.mime_type, DEFAULT_MIME_TYPE);
    assert_eq!(payload.extensions, Some(extensions));

    let encoded = payload.to_base64().unwrap();
    assert_eq!(PaymentPayload::from_base64(&encoded).unwrap(), payload);
}

#[test]
fn test_payload_echoes_fallback_contract() {
    let mut no_asset = option("1000");
    no_asset.asset = String::new();
    let req = requirement(vec![no_asset]);
    let selected = select_option(&req).unwrap();
    let domain = resolve_domain(&selected.option, &ClientConfig::new()).unwrap();

    let payload = build_payment_payload(&req, &selected, &domain, payment_data(), "http://unused");
    assert_eq!(payload.accepted.asset, BASE_USDC);
}
