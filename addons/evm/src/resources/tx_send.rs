use std::fmt;

use error_stack::ResultExt;

use crate::codec::RawArgument;
use crate::commands::ContractBridge;
use crate::config::ProviderConfig;
use crate::constants::TX_SEND_RESOURCE;
use crate::errors::BridgeResult;
use crate::rpc::ChainClient;

/// `ethereum_tx_send`: calls `method` on the contract at `to`. Without a
/// `method` the transaction carries no calldata.
#[derive(Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TransactionSendResource {
    pub abi: String,
    pub to: String,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub parameters: Vec<RawArgument>,
    #[serde(default)]
    pub account_key: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionSendState {
    pub id: String,
    pub hash: String,
}

impl TransactionSendResource {
    pub async fn create<C: ChainClient + ?Sized>(
        &self,
        bridge: &ContractBridge<C>,
        config: &ProviderConfig,
    ) -> BridgeResult<TransactionSendState> {
        let secret_key = config.resolve_account_key(self.account_key.as_deref())?;
        let method = self.method.as_deref().unwrap_or_default();
        let result = bridge
            .invoke(&self.abi, &self.to, method, &self.parameters, secret_key)
            .await
            .attach_printable(format!(
                "Creating {} '{}' on {}",
                TX_SEND_RESOURCE, method, self.to
            ))?;

        let hash = result.tx_hash_hex();
        Ok(self.read(&TransactionSendState { id: hash.clone(), hash }))
    }

    pub fn read(&self, state: &TransactionSendState) -> TransactionSendState {
        state.clone()
    }

    pub fn update(&self, state: &TransactionSendState) -> TransactionSendState {
        self.read(state)
    }

    /// A sent transaction cannot be recalled.
    pub fn delete(&self, state: TransactionSendState) {
        drop(state)
    }
}

impl fmt::Debug for TransactionSendResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransactionSendResource")
            .field("abi", &self.abi)
            .field("to", &self.to)
            .field("method", &self.method)
            .field("parameters", &self.parameters)
            .field("account_key", &self.account_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
