use std::sync::Arc;

use alloy::primitives::{Address, TxHash};

use crate::codec::transaction::{TransactionContextBuilder, TransactionIntent, TransactionPayload};
use crate::codec::RawArgument;
use crate::constants::DEFAULT_GAS_LIMIT;
use crate::errors::BridgeResult;
use crate::rpc::ChainClient;
use crate::signers::TransactionSigner;
use crate::Context;

pub mod actions;
pub mod lanes;

pub use lanes::SenderLanes;

/// Outcome of an accepted submission. Deployments also carry the address the
/// contract will live at once mined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionResult {
    pub tx_hash: TxHash,
    pub contract_address: Option<Address>,
}

impl SubmissionResult {
    pub fn tx_hash_hex(&self) -> String {
        format!("{:#x}", self.tx_hash)
    }

    pub fn contract_address_hex(&self) -> Option<String> {
        self.contract_address.map(|address| address.to_checksum(None))
    }
}

/// Entry point for deploying and invoking contracts against one chain client.
///
/// Cloning is cheap and clones share sender lanes, so every clone observes
/// the same per-sender ordering.
pub struct ContractBridge<C: ChainClient + ?Sized> {
    client: Arc<C>,
    lanes: SenderLanes,
    gas_limit: u64,
    ctx: Context,
}

impl<C: ChainClient + ?Sized> Clone for ContractBridge<C> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            lanes: self.lanes.clone(),
            gas_limit: self.gas_limit,
            ctx: self.ctx.clone(),
        }
    }
}

impl<C: ChainClient + ?Sized> ContractBridge<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self {
            client,
            lanes: SenderLanes::new(),
            gas_limit: DEFAULT_GAS_LIMIT,
            ctx: Context::empty(),
        }
    }

    pub fn with_gas_limit(mut self, gas_limit: u64) -> Self {
        self.gas_limit = gas_limit;
        self
    }

    pub fn with_context(mut self, ctx: Context) -> Self {
        self.ctx = ctx;
        self
    }

    pub fn client(&self) -> &C {
        self.client.as_ref()
    }

    pub fn lanes(&self) -> &SenderLanes {
        &self.lanes
    }

    pub async fn deploy(
        &self,
        interface: &str,
        bytecode_hex: &str,
        raw_arguments: &[RawArgument],
        secret_key: &str,
    ) -> BridgeResult<SubmissionResult> {
        actions::deploy_contract(self, interface, bytecode_hex, raw_arguments, secret_key).await
    }

    pub async fn invoke(
        &self,
        interface: &str,
        target_hex: &str,
        method: &str,
        raw_arguments: &[RawArgument],
        secret_key: &str,
    ) -> BridgeResult<SubmissionResult> {
        actions::call_contract(self, interface, target_hex, method, raw_arguments, secret_key)
            .await
    }

    /// Builds a fresh signing context, signs and submits, all while holding
    /// the sender's lane.
    pub(crate) async fn submit_payload(
        &self,
        signer: &TransactionSigner,
        payload: TransactionPayload,
    ) -> BridgeResult<SubmissionResult> {
        let sender = signer.address();
        if self.lanes.is_busy(&sender) {
            self.ctx.try_log(|logger| {
                debug!(logger, "Waiting for pending submission from {}", sender)
            });
        }
        let _lane = self.lanes.acquire(sender).await;

        let context = TransactionContextBuilder::new(self.client())
            .gas_limit(self.gas_limit)
            .build(signer)
            .await?;
        let nonce = context.nonce();

        let mut intent = TransactionIntent::new(payload, context);
        let contract_address = intent.expected_contract_address();
        self.ctx.try_log(|logger| {
            info!(logger, "Signing transaction from {} with nonce {}", sender, nonce)
        });

        intent.sign(signer).await?;
        let tx_hash = intent.submit(self.client()).await?;

        self.ctx.try_log(|logger| match contract_address {
            Some(address) => info!(
                logger,
                "Deployment {:#x} submitted, contract address {}",
                tx_hash,
                address.to_checksum(None)
            ),
            None => info!(logger, "Transaction {:#x} submitted", tx_hash),
        });
        Ok(SubmissionResult { tx_hash, contract_address })
    }
}
