use alloy::hex;
use alloy::primitives::{Address, TxHash};
use alloy::providers::fillers::{
    BlobGasFiller, ChainIdFiller, FillProvider, GasFiller, JoinFill, NonceFiller,
};
use alloy::providers::{Identity, Provider, ProviderBuilder, RootProvider};
use async_trait::async_trait;
use error_stack::{Report, ResultExt};
use url::Url;

use crate::errors::{BridgeError, BridgeResult, RpcContext};

/// The chain capabilities the bridge consumes. Implementations must not
/// retry internally: a failed query is reported and the caller decides.
#[async_trait]
pub trait ChainClient: Send + Sync {
    async fn pending_nonce(&self, address: &Address) -> BridgeResult<u64>;

    async fn suggest_gas_price(&self) -> BridgeResult<u128>;

    async fn chain_id(&self) -> BridgeResult<u64>;

    async fn submit_transaction(&self, signed_transaction: &[u8]) -> BridgeResult<TxHash>;
}

pub type HttpProvider = FillProvider<
    JoinFill<
        Identity,
        JoinFill<GasFiller, JoinFill<BlobGasFiller, JoinFill<NonceFiller, ChainIdFiller>>>,
    >,
    RootProvider,
>;

#[derive(Clone, Debug)]
pub struct EvmRpc {
    pub url: Url,
    pub provider: HttpProvider,
}

impl EvmRpc {
    pub fn new(url: &str) -> BridgeResult<Self> {
        let url = Url::try_from(url).map_err(|e| {
            Report::new(BridgeError::Config(format!("invalid client_address '{}': {}", url, e)))
        })?;

        let provider = ProviderBuilder::new().on_http(url.clone());
        Ok(Self { url, provider })
    }

    fn query_error(&self, method: &str, params: Option<String>, reason: String) -> Report<BridgeError> {
        Report::new(BridgeError::ClientQuery { method: method.to_string(), reason }).attach(
            RpcContext { endpoint: self.url.to_string(), method: method.to_string(), params },
        )
    }
}

#[async_trait]
impl ChainClient for EvmRpc {
    async fn pending_nonce(&self, address: &Address) -> BridgeResult<u64> {
        self.provider
            .get_transaction_count(*address)
            .pending()
            .await
            .map_err(|e| {
                self.query_error(
                    "eth_getTransactionCount",
                    Some(format!("[\"{:?}\", \"pending\"]", address)),
                    e.to_string(),
                )
            })
            .attach_printable(format!("Getting pending nonce for address {}", address))
    }

    async fn suggest_gas_price(&self) -> BridgeResult<u128> {
        self.provider
            .get_gas_price()
            .await
            .map_err(|e| self.query_error("eth_gasPrice", None, e.to_string()))
    }

    async fn chain_id(&self) -> BridgeResult<u64> {
        self.provider
            .get_chain_id()
            .await
            .map_err(|e| self.query_error("eth_chainId", None, e.to_string()))
    }

    async fn submit_transaction(&self, signed_transaction: &[u8]) -> BridgeResult<TxHash> {
        let pending_tx = self
            .provider
            .send_raw_transaction(signed_transaction)
            .await
            .map_err(|e| Report::new(BridgeError::Submission(e.to_string())))
            .attach(RpcContext {
                endpoint: self.url.to_string(),
                method: "eth_sendRawTransaction".to_string(),
                params: Some(format!("[\"0x{}\"]", hex::encode(signed_transaction))),
            })?;
        Ok(*pending_tx.tx_hash())
    }
}
