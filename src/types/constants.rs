//! Common constants for networks, schemes and x402 headers

/// Common network identifiers
pub mod networks {
    /// Base mainnet (legacy v1 name)
    pub const BASE_MAINNET: &str = "base";
    /// Base Sepolia testnet (legacy v1 name)
    pub const BASE_SEPOLIA: &str = "base-sepolia";
    /// Avalanche mainnet (legacy v1 name)
    pub const AVALANCHE_MAINNET: &str = "avalanche";
    /// Avalanche Fuji testnet (legacy v1 name)
    pub const AVALANCHE_FUJI: &str = "avalanche-fuji";

    /// Base mainnet, CAIP-2 form
    pub const BASE_MAINNET_CAIP2: &str = "eip155:8453";
    /// Base Sepolia testnet, CAIP-2 form
    pub const BASE_SEPOLIA_CAIP2: &str = "eip155:84532";

    /// Namespace prefix of EVM chain identifiers
    pub const EIP155_NAMESPACE: &str = "eip155";

    /// Get USDC contract address for a network
    pub fn get_usdc_address(network: &str) -> Option<&'static str> {
        super::super::NetworkConfig::from_name(network).map(|config| config.usdc_contract)
    }

    /// Check if a network is known
    pub fn is_supported(network: &str) -> bool {
        super::super::NetworkConfig::from_name(network).is_some()
    }
}

/// Common payment schemes
pub mod schemes {
    /// Exact payment scheme (EIP-3009)
    pub const EXACT: &str = "exact";
}

/// HTTP headers used by the x402 handshake
pub mod headers {
    /// Challenge header sent by the server with a 402 response
    pub const PAYMENT_REQUIRED: &str = "payment-required";
    /// Signed payment header attached to the retried request
    pub const PAYMENT_SIGNATURE: &str = "payment-signature";
}

/// EIP-712 domain defaults for USDC
pub mod token {
    /// Default token name used in the EIP-712 domain
    pub const DEFAULT_NAME: &str = "USD Coin";
    /// Default token version used in the EIP-712 domain
    pub const DEFAULT_VERSION: &str = "2";
    /// USDC has 6 decimals
    pub const MICRO_UNITS_PER_USD: u64 = 1_000_000;
}
