use error_stack::{Report, ResultExt};

use crate::constants::{
    ACCOUNT_KEY, CLIENT_ADDRESS, DEFAULT_GAS_LIMIT, ENV_ACCOUNT_KEY, ENV_CLIENT_ADDRESS,
    GAS_LIMIT,
};
use crate::errors::{BridgeError, BridgeResult};
use crate::rpc::EvmRpc;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ProviderConfigFile {
    client_address: Option<String>,
    account_key: Option<String>,
    gas_limit: Option<u64>,
}

/// Provider-level settings shared by every resource.
#[derive(Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    pub client_address: String,
    pub account_key: Option<String>,
    pub gas_limit: u64,
}

impl ProviderConfig {
    /// Explicit settings win; missing ones fall back to the environment.
    pub fn load<F>(toml_document: Option<&str>, env: F) -> BridgeResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file: ProviderConfigFile = match toml_document {
            Some(document) => toml::from_str(document)
                .map_err(|e| Report::new(BridgeError::Config(e.to_string())))
                .attach_printable("Parsing provider configuration")?,
            None => ProviderConfigFile::default(),
        };

        let client_address = file
            .client_address
            .or_else(|| env(ENV_CLIENT_ADDRESS))
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| {
                Report::new(BridgeError::Config(format!("missing '{}'", CLIENT_ADDRESS)))
                    .attach_printable(format!(
                        "Set '{}' in the provider configuration or {}",
                        CLIENT_ADDRESS, ENV_CLIENT_ADDRESS
                    ))
            })?;

        let account_key =
            file.account_key.or_else(|| env(ENV_ACCOUNT_KEY)).filter(|key| !key.trim().is_empty());

        let gas_limit = file.gas_limit.unwrap_or(DEFAULT_GAS_LIMIT);
        if gas_limit == 0 {
            let reason = format!("{} must be positive", GAS_LIMIT);
            return Err(Report::new(BridgeError::Config(reason)));
        }

        Ok(Self { client_address, account_key, gas_limit })
    }

    pub fn from_toml_str(document: &str) -> BridgeResult<Self> {
        Self::load(Some(document), |name| std::env::var(name).ok())
    }

    pub fn from_env() -> BridgeResult<Self> {
        Self::load(None, |name| std::env::var(name).ok())
    }

    /// A resource-level key overrides the provider key.
    pub fn resolve_account_key<'a>(
        &'a self,
        resource_key: Option<&'a str>,
    ) -> BridgeResult<&'a str> {
        resource_key
            .filter(|key| !key.trim().is_empty())
            .or(self.account_key.as_deref())
            .ok_or_else(|| {
                Report::new(BridgeError::Config(format!("missing '{}'", ACCOUNT_KEY)))
                    .attach_printable(format!(
                        "Set '{}' on the resource, in the provider configuration or {}",
                        ACCOUNT_KEY, ENV_ACCOUNT_KEY
                    ))
            })
    }

    pub fn client(&self) -> BridgeResult<EvmRpc> {
        EvmRpc::new(&self.client_address)
    }
}

// account_key is secret material
impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("client_address", &self.client_address)
            .field("account_key", &self.account_key.as_ref().map(|_| "<redacted>"))
            .field("gas_limit", &self.gas_limit)
            .finish()
    }
}
