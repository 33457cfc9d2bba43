use std::fmt;

use alloy::eips::eip2718::Encodable2718;
use alloy::hex;
use alloy::network::{EthereumWallet, TransactionBuilder};
use alloy::primitives::{Address, TxHash};
use alloy::rpc::types::TransactionRequest;
use alloy::signers::k256::ecdsa::SigningKey;
use alloy_signer_local::LocalSigner;
use error_stack::{Report, ResultExt};

use crate::codec::conversion::strip_hex_prefix;
use crate::errors::{BridgeError, BridgeResult};

pub type SecretKeySigner = LocalSigner<SigningKey>;

/// A signed, RLP/EIP-2718 encoded transaction ready for submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransaction {
    pub raw: Vec<u8>,
    pub hash: TxHash,
}

/// Local secp256k1 key: the sender address and the signing function derived from it.
#[derive(Clone)]
pub struct TransactionSigner {
    address: Address,
    wallet: EthereumWallet,
}

impl TransactionSigner {
    /// Accepts a 32 byte secret key as hex, with or without a `0x` prefix.
    pub fn from_hex(secret_key: &str) -> BridgeResult<Self> {
        let body = secret_key.trim();
        let body = strip_hex_prefix(body).unwrap_or(body);
        let secret = hex::decode(body)
            .map_err(|e| Report::new(BridgeError::KeyFormat(format!("key is not valid hex: {e}"))))?;
        if secret.len() != 32 {
            return Err(Report::new(BridgeError::KeyFormat(format!(
                "expected a 32 byte secret key, got {} bytes",
                secret.len()
            ))));
        }
        Self::from_secret_key(&secret)
    }

    pub fn from_secret_key(secret_key: &[u8]) -> BridgeResult<Self> {
        let signing_key = SigningKey::from_slice(secret_key).map_err(|e| {
            Report::new(BridgeError::KeyFormat(format!(
                "failed to generate signing key from secret key: {e}"
            )))
        })?;
        let signer = SecretKeySigner::from_signing_key(signing_key);
        Ok(Self { address: signer.address(), wallet: EthereumWallet::from(signer) })
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Signs a fully populated request. Missing fields are a signing failure,
    /// nothing is filled in from the network here.
    pub async fn sign(&self, request: TransactionRequest) -> BridgeResult<SignedTransaction> {
        let envelope = request
            .build(&self.wallet)
            .await
            .map_err(|e| Report::new(BridgeError::Signing(e.to_string())))
            .attach_printable(format!("Signing transaction from {}", self.address))?;
        Ok(SignedTransaction { raw: envelope.encoded_2718(), hash: *envelope.tx_hash() })
    }
}

// never print key material
impl fmt::Debug for TransactionSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransactionSigner").field("address", &self.address).finish()
    }
}
