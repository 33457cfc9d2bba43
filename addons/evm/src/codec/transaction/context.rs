use alloy::primitives::Address;
use error_stack::ResultExt;

use crate::constants::DEFAULT_GAS_LIMIT;
use crate::errors::BridgeResult;
use crate::rpc::ChainClient;
use crate::signers::TransactionSigner;

/// Everything needed to sign exactly one transaction.
///
/// There is no `Clone`: a context is moved into the intent it was built for
/// and dropped with it, so the nonce it carries can never be signed twice.
#[derive(Debug, PartialEq, Eq)]
pub struct SigningContext {
    sender: Address,
    nonce: u64,
    gas_price: u128,
    gas_limit: u64,
    chain_id: u64,
}

impl SigningContext {
    pub fn sender(&self) -> Address {
        self.sender
    }

    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    pub fn gas_price(&self) -> u128 {
        self.gas_price
    }

    pub fn gas_limit(&self) -> u64 {
        self.gas_limit
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }
}

/// Queries the chain client for a fresh [`SigningContext`].
pub struct TransactionContextBuilder<'a, C: ChainClient + ?Sized> {
    client: &'a C,
    gas_limit: u64,
}

impl<'a, C: ChainClient + ?Sized> TransactionContextBuilder<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self { client, gas_limit: DEFAULT_GAS_LIMIT }
    }

    pub fn gas_limit(mut self, gas_limit: u64) -> Self {
        self.gas_limit = gas_limit;
        self
    }

    pub async fn build(&self, signer: &TransactionSigner) -> BridgeResult<SigningContext> {
        let sender = signer.address();

        let nonce = self
            .client
            .pending_nonce(&sender)
            .await
            .attach_printable(format!("Fetching pending nonce for sender {}", sender))?;

        let gas_price = self
            .client
            .suggest_gas_price()
            .await
            .attach_printable("Fetching suggested gas price from network")?;

        let chain_id =
            self.client.chain_id().await.attach_printable("Fetching chain id from network")?;

        Ok(SigningContext { sender, nonce, gas_price, gas_limit: self.gas_limit, chain_id })
    }

    /// Derives the signer from hex key material, then builds its context.
    pub async fn build_from_key(
        &self,
        secret_key: &str,
    ) -> BridgeResult<(TransactionSigner, SigningContext)> {
        let signer = TransactionSigner::from_hex(secret_key)?;
        let context = self.build(&signer).await?;
        Ok((signer, context))
    }
}

#[cfg(test)]
pub(crate) fn test_context(sender: Address, nonce: u64) -> SigningContext {
    SigningContext {
        sender,
        nonce,
        gas_price: 1_000_000_000,
        gas_limit: DEFAULT_GAS_LIMIT,
        chain_id: 31337,
    }
}
