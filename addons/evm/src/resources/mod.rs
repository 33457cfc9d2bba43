// Declarative resource adapters: create deploys or invokes, the rest are
// local no-ops that never touch the chain.

use error_stack::{Report, ResultExt};

use crate::constants::{SMART_CONTRACT_RESOURCE, TX_SEND_RESOURCE};
use crate::errors::{BridgeError, BridgeResult};

mod smart_contract;
mod tx_send;

pub use smart_contract::{SmartContractResource, SmartContractState};
pub use tx_send::{TransactionSendResource, TransactionSendState};

/// A batch of resource definitions, in declaration order per resource type.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResourceFile {
    #[serde(default, rename = "ethereum_smart_contract")]
    pub smart_contracts: Vec<SmartContractResource>,
    #[serde(default, rename = "ethereum_tx_send")]
    pub transactions: Vec<TransactionSendResource>,
}

impl ResourceFile {
    pub fn from_toml_str(document: &str) -> BridgeResult<Self> {
        toml::from_str(document)
            .map_err(|e| Report::new(BridgeError::Config(e.to_string())))
            .attach_printable(format!(
                "Parsing [[{}]] and [[{}]] definitions",
                SMART_CONTRACT_RESOURCE, TX_SEND_RESOURCE
            ))
    }

    pub fn is_empty(&self) -> bool {
        self.smart_contracts.is_empty() && self.transactions.is_empty()
    }
}
