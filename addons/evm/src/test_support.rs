// In-memory chain client for tests, shared with downstream crates through the
// `test-support` feature.

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use alloy::consensus::TxEnvelope;
use alloy::eips::eip2718::Decodable2718;
use alloy::primitives::{keccak256, Address, TxHash, TxKind};
use async_trait::async_trait;
use error_stack::Report;

use crate::errors::{BridgeError, BridgeResult};
use crate::rpc::ChainClient;

pub const MOCK_CHAIN_ID: u64 = 31337;
pub const MOCK_GAS_PRICE: u128 = 2_000_000_000;

/// A submitted transaction as the node would see it.
#[derive(Debug, Clone)]
pub struct SubmittedTransaction {
    pub sender: Address,
    pub nonce: u64,
    pub to: TxKind,
    pub input: Vec<u8>,
    pub gas_price: u128,
    pub gas_limit: u64,
    pub chain_id: Option<u64>,
    pub hash: TxHash,
}

#[derive(Default)]
struct MockState {
    pending: HashMap<Address, u64>,
    seen: HashSet<(Address, u64)>,
    submitted: Vec<SubmittedTransaction>,
    duplicate_nonces: Vec<(Address, u64)>,
    nonce_queries: usize,
}

/// In-memory chain that tracks pending nonces per sender and rejects a
/// transaction reusing a nonce, recording the collision.
///
/// Every query yields to the runtime once, so unserialized callers interleave.
#[derive(Default)]
pub struct MockChainClient {
    state: Mutex<MockState>,
    fail_queries: bool,
    reject_submissions: bool,
}

impl MockChainClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pending_nonce(self, sender: Address, nonce: u64) -> Self {
        self.state().pending.insert(sender, nonce);
        self
    }

    pub fn failing_queries() -> Self {
        Self { fail_queries: true, ..Self::default() }
    }

    pub fn rejecting_submissions() -> Self {
        Self { reject_submissions: true, ..Self::default() }
    }

    pub fn submitted(&self) -> Vec<SubmittedTransaction> {
        self.state().submitted.clone()
    }

    pub fn duplicate_nonces(&self) -> Vec<(Address, u64)> {
        self.state().duplicate_nonces.clone()
    }

    pub fn nonce_queries(&self) -> usize {
        self.state().nonce_queries
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn unavailable(method: &str) -> Report<BridgeError> {
        Report::new(BridgeError::ClientQuery {
            method: method.to_string(),
            reason: "connection refused".to_string(),
        })
    }
}

#[async_trait]
impl ChainClient for MockChainClient {
    async fn pending_nonce(&self, address: &Address) -> BridgeResult<u64> {
        if self.fail_queries {
            return Err(Self::unavailable("eth_getTransactionCount"));
        }
        let nonce = {
            let mut state = self.state();
            state.nonce_queries += 1;
            state.pending.get(address).copied().unwrap_or(0)
        };
        tokio::task::yield_now().await;
        Ok(nonce)
    }

    async fn suggest_gas_price(&self) -> BridgeResult<u128> {
        if self.fail_queries {
            return Err(Self::unavailable("eth_gasPrice"));
        }
        tokio::task::yield_now().await;
        Ok(MOCK_GAS_PRICE)
    }

    async fn chain_id(&self) -> BridgeResult<u64> {
        if self.fail_queries {
            return Err(Self::unavailable("eth_chainId"));
        }
        Ok(MOCK_CHAIN_ID)
    }

    async fn submit_transaction(&self, signed_transaction: &[u8]) -> BridgeResult<TxHash> {
        tokio::task::yield_now().await;
        if self.reject_submissions {
            return Err(Report::new(BridgeError::Submission("insufficient funds".to_string())));
        }

        let envelope = TxEnvelope::decode_2718(&mut &signed_transaction[..])
            .map_err(|e| Report::new(BridgeError::Submission(e.to_string())))?;
        let signed = envelope
            .as_legacy()
            .ok_or_else(|| Report::new(BridgeError::Submission("expected legacy tx".into())))?;
        let sender = signed
            .signature()
            .recover_address_from_prehash(&signed.signature_hash())
            .map_err(|e| Report::new(BridgeError::Submission(e.to_string())))?;
        let tx = signed.tx();

        let mut state = self.state();
        if !state.seen.insert((sender, tx.nonce)) {
            state.duplicate_nonces.push((sender, tx.nonce));
            return Err(Report::new(BridgeError::Submission("nonce too low".to_string())));
        }
        let pending = state.pending.entry(sender).or_insert(0);
        *pending = (*pending).max(tx.nonce + 1);

        let hash = keccak256(signed_transaction);
        state.submitted.push(SubmittedTransaction {
            sender,
            nonce: tx.nonce,
            to: tx.to,
            input: tx.input.to_vec(),
            gas_price: tx.gas_price,
            gas_limit: tx.gas_limit,
            chain_id: tx.chain_id,
            hash,
        });
        Ok(hash)
    }
}
