//! Signature, address and nonce utilities

use super::eip712::keccak256;
use crate::{BlockrunError, Result};
use ethereum_types::{Address, H256};
use k256::ecdsa::{RecoveryId, Signature as K256Signature, VerifyingKey};
use secp256k1::{Message, PublicKey, SecretKey, SECP256K1};
use std::str::FromStr;

/// Offset Ethereum adds to the raw recovery id
const RECOVERY_ID_OFFSET: u8 = 27;

/// Generate a random nonce for EIP-3009 authorization
///
/// Draws directly from the operating system's entropy source on every call.
pub fn generate_nonce() -> Result<H256> {
    use rand::{rngs::OsRng, RngCore};
    let mut bytes = [0u8; 32];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| BlockrunError::crypto(format!("Entropy source unavailable: {}", e)))?;
    Ok(H256::from(bytes))
}

/// 0x-prefixed lowercase hex of a 32-byte value
pub fn format_nonce(nonce: &H256) -> String {
    format!("0x{}", hex::encode(nonce.as_bytes()))
}

/// Sign a 32-byte digest, returning `r ‖ s ‖ v` with `v` in {27, 28}
pub fn sign_digest(digest: H256, secret_key: &SecretKey) -> Result<[u8; 65]> {
    let message = Message::from_digest_slice(digest.as_bytes())
        .map_err(|_| BlockrunError::signing("Invalid message hash"))?;

    let signature = SECP256K1.sign_ecdsa_recoverable(&message, secret_key);
    let (recovery_id, compact) = signature.serialize_compact();

    let mut v = u8::try_from(recovery_id.to_i32())
        .map_err(|_| BlockrunError::signing("Invalid recovery ID"))?;
    if v < RECOVERY_ID_OFFSET {
        v += RECOVERY_ID_OFFSET;
    }

    let mut sig_bytes = [0u8; 65];
    sig_bytes[0..64].copy_from_slice(&compact);
    sig_bytes[64] = v;
    Ok(sig_bytes)
}

/// Verify an EIP-712 signature by recovering the signer address
pub fn verify_eip712_signature(
    signature: &str,
    message_hash: H256,
    expected_address: Address,
) -> Result<bool> {
    Ok(recover_signer(signature, message_hash)? == expected_address)
}

/// Recover the address that produced `signature` over `message_hash`
pub fn recover_signer(signature: &str, message_hash: H256) -> Result<Address> {
    let sig_bytes = hex::decode(signature.trim_start_matches("0x"))
        .map_err(|_| BlockrunError::signing("Invalid hex signature"))?;

    if sig_bytes.len() != 65 {
        return Err(BlockrunError::signing("Signature must be 65 bytes"));
    }

    let v = sig_bytes[64];
    let v = if v >= RECOVERY_ID_OFFSET {
        v - RECOVERY_ID_OFFSET
    } else {
        v
    };
    let recovery_id =
        RecoveryId::from_byte(v).ok_or_else(|| BlockrunError::signing("Invalid recovery ID"))?;

    let k256_sig = K256Signature::from_slice(&sig_bytes[0..64])
        .map_err(|_| BlockrunError::signing("Invalid signature format"))?;

    let verifying_key =
        VerifyingKey::recover_from_prehash(message_hash.as_bytes(), &k256_sig, recovery_id)
            .map_err(|_| BlockrunError::signing("Failed to recover public key"))?;

    Ok(ethereum_address_from_pubkey(&verifying_key))
}

/// Convert a recovered public key to an Ethereum address
fn ethereum_address_from_pubkey(pubkey: &VerifyingKey) -> Address {
    let encoded = pubkey.to_encoded_point(false);
    address_from_uncompressed(encoded.as_bytes())
}

/// Derive the Ethereum address owning `secret_key`
pub fn address_from_secret_key(secret_key: &SecretKey) -> Address {
    let public_key = PublicKey::from_secret_key(SECP256K1, secret_key);
    address_from_uncompressed(&public_key.serialize_uncompressed())
}

/// Last 20 bytes of `keccak256(x ‖ y)` for an uncompressed `0x04 ‖ x ‖ y` key
fn address_from_uncompressed(pubkey_bytes: &[u8]) -> Address {
    let pubkey_hash = keccak256(&pubkey_bytes[1..]);
    Address::from_slice(&pubkey_hash[12..])
}

/// EIP-55 mixed-case checksum encoding of an address
pub fn to_checksum_address(address: &Address) -> String {
    let lower = hex::encode(address.as_bytes());
    let hash = keccak256(lower.as_bytes());

    let mut checksummed = String::with_capacity(42);
    checksummed.push_str("0x");
    for (i, c) in lower.chars().enumerate() {
        let nibble = if i % 2 == 0 {
            hash[i / 2] >> 4
        } else {
            hash[i / 2] & 0x0f
        };
        if c.is_ascii_alphabetic() && nibble >= 8 {
            checksummed.push(c.to_ascii_uppercase());
        } else {
            checksummed.push(c);
        }
    }
    checksummed
}

/// Parse a 0x-prefixed (or bare) hex address, naming the offending field on failure
pub fn parse_address(value: &str, field: &str) -> Result<Address> {
    let hex_part = value.strip_prefix("0x").unwrap_or(value);
    if hex_part.len() != 40 || !hex_part.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(BlockrunError::signing(format!("Invalid {} address", field)));
    }
    Address::from_str(hex_part).map_err(|_| BlockrunError::signing(format!("Invalid {} address", field)))
}
