//! Network configuration types

use super::constants::networks;

/// Network configuration with chain-specific details
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkConfig {
    /// Chain ID for the network
    pub chain_id: u64,
    /// USDC contract address
    pub usdc_contract: &'static str,
    /// Legacy network name
    pub name: &'static str,
    /// Whether this is a testnet
    pub is_testnet: bool,
}

const KNOWN_NETWORKS: [NetworkConfig; 4] = [
    NetworkConfig {
        chain_id: 8453,
        usdc_contract: "0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913",
        name: networks::BASE_MAINNET,
        is_testnet: false,
    },
    NetworkConfig {
        chain_id: 84532,
        usdc_contract: "0x036CbD53842c5426634e7929541eC2318f3dCF7e",
        name: networks::BASE_SEPOLIA,
        is_testnet: true,
    },
    NetworkConfig {
        chain_id: 43114,
        usdc_contract: "0xB97EF9Ef8734C71904D8002F8b6Bc66Dd9c48a6E",
        name: networks::AVALANCHE_MAINNET,
        is_testnet: false,
    },
    NetworkConfig {
        chain_id: 43113,
        usdc_contract: "0x5425890298aed601595a70AB815c96711a31Bc65",
        name: networks::AVALANCHE_FUJI,
        is_testnet: true,
    },
];

impl NetworkConfig {
    /// Base mainnet configuration
    pub fn base_mainnet() -> Self {
        KNOWN_NETWORKS[0]
    }

    /// Base Sepolia testnet configuration
    pub fn base_sepolia() -> Self {
        KNOWN_NETWORKS[1]
    }

    /// Get network config by chain id
    pub fn from_chain_id(chain_id: u64) -> Option<Self> {
        KNOWN_NETWORKS
            .iter()
            .find(|config| config.chain_id == chain_id)
            .copied()
    }

    /// Get network config by legacy name (`base`) or CAIP-2 identifier (`eip155:8453`)
    pub fn from_name(name: &str) -> Option<Self> {
        match parse_eip155_chain_id(name) {
            Some(chain_id) => Self::from_chain_id(chain_id),
            None => KNOWN_NETWORKS
                .iter()
                .find(|config| config.name == name)
                .copied(),
        }
    }

    /// CAIP-2 identifier of this network
    pub fn caip2(&self) -> String {
        format!("{}:{}", networks::EIP155_NAMESPACE, self.chain_id)
    }
}

/// Extract the numeric chain id of an `eip155:<id>` network identifier
pub fn parse_eip155_chain_id(network: &str) -> Option<u64> {
    let (namespace, reference) = network.split_once(':')?;
    if namespace != networks::EIP155_NAMESPACE {
        return None;
    }
    reference.parse().ok()
}

/// Resolve the chain id for a network identifier, including unknown `eip155` chains
pub fn resolve_chain_id(network: &str) -> Option<u64> {
    parse_eip155_chain_id(network).or_else(|| NetworkConfig::from_name(network).map(|c| c.chain_id))
}
