use std::fmt;

use error_stack::ResultExt;

use crate::codec::RawArgument;
use crate::commands::ContractBridge;
use crate::config::ProviderConfig;
use crate::constants::SMART_CONTRACT_RESOURCE;
use crate::errors::BridgeResult;
use crate::rpc::ChainClient;

/// `ethereum_smart_contract`: deploys `bin` with `parameters` converted
/// against the constructor declared in `abi`.
#[derive(Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SmartContractResource {
    pub abi: String,
    pub bin: String,
    #[serde(default)]
    pub parameters: Vec<RawArgument>,
    #[serde(default)]
    pub account_key: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmartContractState {
    pub id: String,
    pub address: String,
    pub transaction: String,
}

impl SmartContractResource {
    pub async fn create<C: ChainClient + ?Sized>(
        &self,
        bridge: &ContractBridge<C>,
        config: &ProviderConfig,
    ) -> BridgeResult<SmartContractState> {
        let secret_key = config.resolve_account_key(self.account_key.as_deref())?;
        let result = bridge
            .deploy(&self.abi, &self.bin, &self.parameters, secret_key)
            .await
            .attach_printable(format!("Creating {}", SMART_CONTRACT_RESOURCE))?;

        let address = result.contract_address_hex().unwrap_or_default();
        let state = SmartContractState {
            id: address.clone(),
            address,
            transaction: result.tx_hash_hex(),
        };
        Ok(self.read(&state))
    }

    /// Returns the recorded state; the chain is not queried.
    pub fn read(&self, state: &SmartContractState) -> SmartContractState {
        state.clone()
    }

    pub fn update(&self, state: &SmartContractState) -> SmartContractState {
        self.read(state)
    }

    /// Forgets the state locally. Deployed code cannot be removed.
    pub fn delete(&self, state: SmartContractState) {
        drop(state)
    }
}

impl fmt::Debug for SmartContractResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmartContractResource")
            .field("abi", &self.abi)
            .field("bin", &self.bin)
            .field("parameters", &self.parameters)
            .field("account_key", &self.account_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
