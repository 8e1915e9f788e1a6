//! Local signing wallet
//!
//! A [`Wallet`] owns a secp256k1 private key and produces EIP-3009
//! `TransferWithAuthorization` signatures for x402 payments. The key is only ever
//! used for local EIP-712 signing; it is never serialized into a payment payload
//! or written to a log. Persisting it is the job of [`store::WalletStore`].
//!
//! # Examples
//!
//! ```
//! use blockrun_llm::wallet::Wallet;
//!
//! # fn example() -> blockrun_llm::Result<()> {
//! let wallet = Wallet::from_private_key(
//!     "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80",
//! )?;
//! assert_eq!(wallet.address(), "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
//! # Ok(())
//! # }
//! ```

use crate::crypto::eip712::{create_transfer_with_authorization_hash, Domain, TransferWithAuthorization};
use crate::crypto::signature::{
    address_from_secret_key, format_nonce, parse_address, sign_digest, to_checksum_address,
};
use crate::types::{PaymentData, TransferAuthorization};
use crate::validation::validate_private_key;
use crate::{BlockrunError, Result};
use ethereum_types::{Address, H256, U256};
use secp256k1::SecretKey;

pub mod store;

pub use store::{WalletInfo, WalletStore};

/// Seconds subtracted from `now` for `validAfter`, absorbing clock skew
pub const VALID_AFTER_SKEW_SECONDS: i64 = 600;

/// Parameters of a single transfer authorization
#[derive(Debug, Clone)]
pub struct AuthorizationRequest<'a> {
    /// EIP-712 domain of the token contract
    pub domain: &'a Domain,
    /// Recipient, echoed verbatim into the authorization
    pub pay_to: &'a str,
    /// Amount in atomic units, base-10
    pub amount: &'a str,
    /// Server-granted validity in seconds
    pub max_timeout_seconds: u64,
    /// Single-use authorization nonce
    pub nonce: H256,
    /// Current unix time in seconds
    pub now: i64,
}

/// Wallet holding a secp256k1 signing key
#[derive(Clone)]
pub struct Wallet {
    secret_key: SecretKey,
    address: Address,
}

impl std::fmt::Debug for Wallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Wallet")
            .field("address", &self.address())
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

impl Wallet {
    /// Load a wallet from a 64-character hex private key, `0x` prefix optional
    pub fn from_private_key(private_key: &str) -> Result<Self> {
        let private_key = private_key.trim();
        validate_private_key(private_key)?;

        let bytes = hex::decode(private_key.trim_start_matches("0x"))
            .map_err(|_| BlockrunError::validation("privateKey", "Invalid hex in private key"))?;
        let secret_key = SecretKey::from_slice(&bytes).map_err(|_| {
            BlockrunError::validation("privateKey", "Private key is not a valid secp256k1 scalar")
        })?;

        Ok(Self::from_secret_key(secret_key))
    }

    /// Generate a fresh wallet from OS entropy
    pub fn random() -> Result<Self> {
        use rand::{rngs::OsRng, RngCore};
        let mut bytes = [0u8; 32];
        loop {
            OsRng
                .try_fill_bytes(&mut bytes)
                .map_err(|e| BlockrunError::crypto(format!("Entropy source unavailable: {}", e)))?;
            if let Ok(secret_key) = SecretKey::from_slice(&bytes) {
                return Ok(Self::from_secret_key(secret_key));
            }
        }
    }

    fn from_secret_key(secret_key: SecretKey) -> Self {
        let address = address_from_secret_key(&secret_key);
        Self {
            secret_key,
            address,
        }
    }

    /// EIP-55 checksummed address
    pub fn address(&self) -> String {
        to_checksum_address(&self.address)
    }

    /// Raw 20-byte address
    pub fn raw_address(&self) -> Address {
        self.address
    }

    /// `0x`-prefixed private key, for persistence only
    pub fn private_key_hex(&self) -> String {
        format!("0x{}", hex::encode(self.secret_key.secret_bytes()))
    }

    /// Sign a 32-byte digest, returning `r ‖ s ‖ v`
    pub fn sign_digest(&self, digest: H256) -> Result<[u8; 65]> {
        sign_digest(digest, &self.secret_key)
    }

    /// Build and sign an EIP-3009 transfer authorization
    ///
    /// The window runs from `now - 600` to `now + max_timeout_seconds`. The sender
    /// is always this wallet's address.
    pub fn sign_transfer_authorization(&self, request: &AuthorizationRequest<'_>) -> Result<PaymentData> {
        let value = parse_amount(request.amount)?;
        let to = parse_address(request.pay_to, "recipient")?;

        let timeout = i64::try_from(request.max_timeout_seconds)
            .map_err(|_| BlockrunError::signing("maxTimeoutSeconds out of range"))?;
        let valid_after = request.now - VALID_AFTER_SKEW_SECONDS;
        let valid_before = request
            .now
            .checked_add(timeout)
            .ok_or_else(|| BlockrunError::signing("maxTimeoutSeconds out of range"))?;
        if valid_after < 0 {
            return Err(BlockrunError::signing("Clock is before the unix epoch"));
        }

        let message = TransferWithAuthorization {
            from: self.address,
            to,
            value,
            valid_after: U256::from(valid_after as u64),
            valid_before: U256::from(valid_before as u64),
            nonce: request.nonce,
        };
        let digest = create_transfer_with_authorization_hash(request.domain, &message);
        let signature = self.sign_digest(digest)?;

        Ok(PaymentData {
            signature: format!("0x{}", hex::encode(signature)),
            authorization: TransferAuthorization {
                from: self.address(),
                to: request.pay_to.to_string(),
                value: request.amount.to_string(),
                valid_after: valid_after.to_string(),
                valid_before: valid_before.to_string(),
                nonce: format_nonce(&request.nonce),
            },
        })
    }
}

/// Parse a non-negative base-10 integer amount
fn parse_amount(amount: &str) -> Result<U256> {
    if amount.is_empty() || !amount.bytes().all(|b| b.is_ascii_digit()) {
        return Err(BlockrunError::signing(format!("Invalid amount: {}", amount)));
    }
    U256::from_dec_str(amount)
        .map_err(|_| BlockrunError::signing(format!("Invalid amount: {}", amount)))
}

#[cfg(test)]
mod tests;
