use std::fmt;

use alloy::primitives::{Address, Selector as FunctionSelector, TxHash};
use alloy::rpc::types::TransactionRequest;
use error_stack::Report;

use super::builder::build_legacy_request;
use super::context::SigningContext;
use crate::codec::abi::{encode_params, EncodedValue};
use crate::codec::contract_deployment::{create_init_code, generate_create_address};
use crate::errors::{BridgeError, BridgeResult};
use crate::rpc::ChainClient;
use crate::signers::{SignedTransaction, TransactionSigner};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentStage {
    Built,
    Signed,
    Submitted,
}

impl fmt::Display for IntentStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntentStage::Built => write!(f, "built"),
            IntentStage::Signed => write!(f, "signed"),
            IntentStage::Submitted => write!(f, "submitted"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionPayload {
    Deploy { bytecode: Vec<u8>, constructor_args: Vec<EncodedValue> },
    Invoke { target: Address, method: String, selector: FunctionSelector, args: Vec<EncodedValue> },
    /// A call without calldata, handled by the contract's receive or fallback function.
    Send { target: Address },
}

impl TransactionPayload {
    /// Init code for a deployment, selector-prefixed calldata for a call.
    pub fn input(&self) -> Vec<u8> {
        match self {
            TransactionPayload::Deploy { bytecode, constructor_args } => {
                create_init_code(bytecode, constructor_args)
            }
            TransactionPayload::Invoke { selector, args, .. } => {
                let mut calldata = selector.to_vec();
                calldata.append(&mut encode_params(args));
                calldata
            }
            TransactionPayload::Send { .. } => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntentState {
    Built,
    Signed(SignedTransaction),
    Submitted(TxHash),
    /// `stage` is the last stage reached before the failure.
    Failed { stage: IntentStage, reason: String },
}

/// A payload bound to the one signing context it will be sent with.
///
/// `Built -> Signed -> Submitted`, and any step may end in `Failed`.
/// Both `Submitted` and `Failed` are terminal.
#[derive(Debug)]
pub struct TransactionIntent {
    payload: TransactionPayload,
    context: SigningContext,
    state: IntentState,
}

impl TransactionIntent {
    pub fn new(payload: TransactionPayload, context: SigningContext) -> Self {
        Self { payload, context, state: IntentState::Built }
    }

    pub fn payload(&self) -> &TransactionPayload {
        &self.payload
    }

    pub fn context(&self) -> &SigningContext {
        &self.context
    }

    pub fn state(&self) -> &IntentState {
        &self.state
    }

    pub fn to_request(&self) -> TransactionRequest {
        build_legacy_request(&self.payload, &self.context)
    }

    /// CREATE address of a deployment, fixed by sender and nonce.
    pub fn expected_contract_address(&self) -> Option<Address> {
        match self.payload {
            TransactionPayload::Deploy { .. } => {
                Some(generate_create_address(&self.context.sender(), self.context.nonce()))
            }
            TransactionPayload::Invoke { .. } | TransactionPayload::Send { .. } => None,
        }
    }

    /// Returns the hash the transaction will have once submitted.
    pub async fn sign(&mut self, signer: &TransactionSigner) -> BridgeResult<TxHash> {
        if self.state != IntentState::Built {
            return Err(self.transition_error(IntentStage::Signed));
        }
        if signer.address() != self.context.sender() {
            let report = Report::new(BridgeError::Signing(format!(
                "signer {} does not match context sender {}",
                signer.address(),
                self.context.sender()
            )));
            return Err(self.fail(IntentStage::Built, report));
        }

        let signed = match signer.sign(self.to_request()).await {
            Ok(signed) => signed,
            Err(report) => return Err(self.fail(IntentStage::Built, report)),
        };
        let tx_hash = signed.hash;
        self.state = IntentState::Signed(signed);
        Ok(tx_hash)
    }

    pub async fn submit<C: ChainClient + ?Sized>(&mut self, client: &C) -> BridgeResult<TxHash> {
        let raw = match &self.state {
            IntentState::Signed(signed) => signed.raw.clone(),
            _ => return Err(self.transition_error(IntentStage::Submitted)),
        };
        match client.submit_transaction(&raw).await {
            Ok(tx_hash) => {
                self.state = IntentState::Submitted(tx_hash);
                Ok(tx_hash)
            }
            Err(report) => Err(self.fail(IntentStage::Signed, report)),
        }
    }

    /// Moves the intent to `Failed` and returns the report with the stage attached.
    pub fn fail(&mut self, stage: IntentStage, report: Report<BridgeError>) -> Report<BridgeError> {
        self.state = IntentState::Failed { stage, reason: report.current_context().to_string() };
        report.attach(stage)
    }

    fn transition_error(&self, target: IntentStage) -> Report<BridgeError> {
        let reason = format!("cannot move a {} intent to {}", self.state_name(), target);
        let error = match target {
            IntentStage::Submitted => BridgeError::Submission(reason),
            _ => BridgeError::Signing(reason),
        };
        crate::bridge_error!(error, "Transaction nonce {}", self.context.nonce())
    }

    fn state_name(&self) -> &'static str {
        match self.state {
            IntentState::Built => "built",
            IntentState::Signed(_) => "signed",
            IntentState::Submitted(_) => "submitted",
            IntentState::Failed { .. } => "failed",
        }
    }
}
