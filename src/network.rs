//! Network URL constants for the Meridian SDK.

/// Default ledger node REST base URL (testnet).
pub const DEFAULT_NODE_URL: &str = "https://node.testnet.meridian.trade";

/// Default wallet service base URL (testnet).
pub const DEFAULT_WALLET_URL: &str = "https://wallet.testnet.meridian.trade";
