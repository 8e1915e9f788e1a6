//! Tests for the wallet and its store

use super::store::{address_from_key, WalletStore, LEGACY_KEY_FILE, SESSION_FILE};
use super::{AuthorizationRequest, Wallet};
use crate::crypto::eip712::{create_transfer_with_authorization_hash, Domain, TransferWithAuthorization};
use crate::crypto::signature::{parse_address, recover_signer};
use crate::BlockrunError;
use ethereum_types::{H256, U256};

const HARDHAT_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
const HARDHAT_ADDRESS: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";
const PAY_TO: &str = "0x209693Bc6afc0C5328bA36FaF03C514EF312287C";

fn base_domain() -> Domain {
    Domain {
        name: "USD Coin".to_string(),
        version: "2".to_string(),
        chain_id: 8453,
        verifying_contract: parse_address("0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913", "asset")
            .unwrap(),
    }
}

#[test]
fn test_wallet_from_private_key() {
    let prefixed = Wallet::from_private_key(HARDHAT_KEY).unwrap();
    let bare = Wallet::from_private_key(HARDHAT_KEY.trim_start_matches("0x")).unwrap();

    assert_eq!(prefixed.address(), HARDHAT_ADDRESS);
    assert_eq!(bare.address(), HARDHAT_ADDRESS);
    assert_eq!(prefixed.private_key_hex(), HARDHAT_KEY);
}

#[test]
fn test_wallet_rejects_bad_keys() {
    for key in ["", "0x1234", "zz0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80"] {
        match Wallet::from_private_key(key) {
            Err(BlockrunError::Validation { field, .. }) => assert_eq!(field, "privateKey"),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    let zero = format!("0x{}", "0".repeat(64));
    assert!(Wallet::from_private_key(&zero).is_err());
}

#[test]
fn test_debug_hides_key() {
    let wallet = Wallet::from_private_key(HARDHAT_KEY).unwrap();
    let printed = format!("{:?}", wallet);
    assert!(printed.contains(HARDHAT_ADDRESS));
    assert!(!printed.contains("ac0974bec39a17e3"));
}

#[test]
fn test_random_wallets_differ() {
    let a = Wallet::random().unwrap();
    let b = Wallet::random().unwrap();
    assert_ne!(a.address(), b.address());
    assert_eq!(
        Wallet::from_private_key(&a.private_key_hex()).unwrap().address(),
        a.address()
    );
}

#[test]
fn test_sign_transfer_authorization() {
    let wallet = Wallet::from_private_key(HARDHAT_KEY).unwrap();
    let domain = base_domain();
    let nonce = H256::repeat_byte(0x07);
    let now = 1_750_000_000;

    let data = wallet
        .sign_transfer_authorization(&AuthorizationRequest {
            domain: &domain,
            pay_to: PAY_TO,
            amount: "500000",
            max_timeout_seconds: 300,
            nonce,
            now,
        })
        .unwrap();

    let auth = &data.authorization;
    assert_eq!(auth.from, HARDHAT_ADDRESS);
    assert_eq!(auth.to, PAY_TO);
    assert_eq!(auth.value, "500000");
    assert_eq!(auth.valid_after, "1749999400");
    assert_eq!(auth.valid_before, "1750000300");
    assert_eq!(auth.validity_window().unwrap(), 900);
    assert_eq!(auth.nonce, format!("0x{}", "07".repeat(32)));

    let digest = create_transfer_with_authorization_hash(
        &domain,
        &TransferWithAuthorization {
            from: wallet.raw_address(),
            to: parse_address(PAY_TO, "recipient").unwrap(),
            value: U256::from(500_000u64),
            valid_after: U256::from(1_749_999_400u64),
            valid_before: U256::from(1_750_000_300u64),
            nonce,
        },
    );
    assert_eq!(data.signature.len(), 132);
    assert_eq!(recover_signer(&data.signature, digest).unwrap(), wallet.raw_address());
}

#[test]
fn test_sign_rejects_bad_inputs() {
    let wallet = Wallet::from_private_key(HARDHAT_KEY).unwrap();
    let domain = base_domain();
    let request = |amount: &'static str, pay_to: &'static str| AuthorizationRequest {
        domain: &domain,
        pay_to,
        amount,
        max_timeout_seconds: 300,
        nonce: H256::zero(),
        now: 1_750_000_000,
    };

    for amount in ["", "1.5", "-1", "1e6", "0x10"] {
        let err = wallet
            .sign_transfer_authorization(&request(amount, PAY_TO))
            .unwrap_err();
        assert!(matches!(err, BlockrunError::Signing { .. }), "{}", amount);
    }

    let err = wallet
        .sign_transfer_authorization(&request("1000", "0xnotanaddress"))
        .unwrap_err();
    assert!(matches!(err, BlockrunError::Signing { .. }));
}

#[test]
fn test_store_save_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let store = WalletStore::new(dir.path().join("blockrun"));
    assert!(store.load().is_none());

    let path = store.save(HARDHAT_KEY).unwrap();
    assert_eq!(path, store.session_path());
    assert_eq!(store.load().as_deref(), Some(HARDHAT_KEY));

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}

#[test]
fn test_store_falls_back_to_legacy_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(LEGACY_KEY_FILE), format!("{}\n", HARDHAT_KEY)).unwrap();
    std::fs::write(dir.path().join(SESSION_FILE), "   ").unwrap();

    let store = WalletStore::new(dir.path());
    assert_eq!(store.load().as_deref(), Some(HARDHAT_KEY));
}

#[test]
fn test_get_or_create_priority() {
    let dir = tempfile::tempdir().unwrap();
    let store = WalletStore::new(dir.path());

    let created = store.get_or_create_with(None).unwrap();
    assert!(created.is_new);
    assert!(store.session_path().exists());

    let reloaded = store.get_or_create_with(None).unwrap();
    assert!(!reloaded.is_new);
    assert_eq!(reloaded.address, created.address);

    let from_env = store
        .get_or_create_with(Some(HARDHAT_KEY.to_string()))
        .unwrap();
    assert!(!from_env.is_new);
    assert_eq!(from_env.address, HARDHAT_ADDRESS);
}

#[test]
fn test_address_from_key() {
    assert_eq!(address_from_key(HARDHAT_KEY).unwrap(), HARDHAT_ADDRESS);
    assert!(address_from_key("not-a-key").is_err());
}
