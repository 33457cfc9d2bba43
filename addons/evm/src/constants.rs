// Provider configuration keys
pub const CLIENT_ADDRESS: &str = "client_address";
pub const ACCOUNT_KEY: &str = "account_key";
pub const GAS_LIMIT: &str = "gas_limit";

// Environment fallbacks for the provider configuration
pub const ENV_CLIENT_ADDRESS: &str = "ETHEREUM_CLIENT_ADDRESS";
pub const ENV_ACCOUNT_KEY: &str = "ETHEREUM_ACCOUNT_KEY";

// Resource types
pub const SMART_CONTRACT_RESOURCE: &str = "ethereum_smart_contract";
pub const TX_SEND_RESOURCE: &str = "ethereum_tx_send";

// Resource attributes named in error paths
pub const CONTRACT_BIN: &str = "bin";
pub const TRANSACTION_TO: &str = "to";

// Default values
pub const DEFAULT_GAS_LIMIT: u64 = 1_000_000;
