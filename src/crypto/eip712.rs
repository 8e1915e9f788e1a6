//! EIP-712 typed data utilities for EIP-3009 `TransferWithAuthorization`

use ethereum_types::{Address, H256, U256};

/// Canonical type string of the EIP-712 domain used by USDC
pub const EIP712_DOMAIN_TYPE: &str =
    "EIP712Domain(string name,string version,uint256 chainId,address verifyingContract)";

/// Canonical type string of the EIP-3009 authorization struct
pub const TRANSFER_WITH_AUTHORIZATION_TYPE: &str = "TransferWithAuthorization(address from,address to,uint256 value,uint256 validAfter,uint256 validBefore,bytes32 nonce)";

/// EIP-712 domain separator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Domain {
    pub name: String,
    pub version: String,
    pub chain_id: u64,
    pub verifying_contract: Address,
}

impl Domain {
    /// Hash the domain separator
    pub fn separator(&self) -> H256 {
        let mut data = Vec::with_capacity(32 * 5);
        data.extend_from_slice(&keccak256(EIP712_DOMAIN_TYPE.as_bytes()));
        data.extend_from_slice(&keccak256(self.name.as_bytes()));
        data.extend_from_slice(&keccak256(self.version.as_bytes()));
        data.extend_from_slice(&encode_uint(U256::from(self.chain_id)));
        data.extend_from_slice(&encode_address(self.verifying_contract));

        H256::from(keccak256(&data))
    }
}

/// EIP-3009 `TransferWithAuthorization` message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferWithAuthorization {
    pub from: Address,
    pub to: Address,
    pub value: U256,
    pub valid_after: U256,
    pub valid_before: U256,
    pub nonce: H256,
}

impl TransferWithAuthorization {
    /// Hash the struct according to EIP-712: `keccak256(typeHash ‖ encodeData)`
    pub fn struct_hash(&self) -> H256 {
        let mut data = Vec::with_capacity(32 * 7);
        data.extend_from_slice(&keccak256(TRANSFER_WITH_AUTHORIZATION_TYPE.as_bytes()));
        data.extend_from_slice(&encode_address(self.from));
        data.extend_from_slice(&encode_address(self.to));
        data.extend_from_slice(&encode_uint(self.value));
        data.extend_from_slice(&encode_uint(self.valid_after));
        data.extend_from_slice(&encode_uint(self.valid_before));
        data.extend_from_slice(self.nonce.as_bytes());

        H256::from(keccak256(&data))
    }
}

/// Create the EIP-712 signing digest for an EIP-3009 transfer authorization
pub fn create_transfer_with_authorization_hash(
    domain: &Domain,
    message: &TransferWithAuthorization,
) -> H256 {
    hash_typed_data(domain.separator(), message.struct_hash())
}

/// Final EIP-712 digest: `keccak256(0x19 ‖ 0x01 ‖ domainSeparator ‖ structHash)`
pub fn hash_typed_data(domain_separator: H256, struct_hash: H256) -> H256 {
    let mut data = Vec::with_capacity(2 + 64);
    data.extend_from_slice(&[0x19, 0x01]);
    data.extend_from_slice(domain_separator.as_bytes());
    data.extend_from_slice(struct_hash.as_bytes());

    H256::from(keccak256(&data))
}

/// Left-pad an address to a 32-byte word
fn encode_address(address: Address) -> [u8; 32] {
    let mut padded = [0u8; 32];
    padded[12..32].copy_from_slice(address.as_bytes());
    padded
}

/// Big-endian 32-byte word
fn encode_uint(value: U256) -> [u8; 32] {
    let mut word = [0u8; 32];
    value.to_big_endian(&mut word);
    word
}

/// Keccak-256 hash function
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    use sha3::{Digest, Keccak256};
    Keccak256::digest(data).into()
}
