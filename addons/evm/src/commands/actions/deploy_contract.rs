use error_stack::{Report, ResultExt};

use crate::codec::{convert_arguments, decode_hex, InterfaceDescription, RawArgument};
use crate::codec::transaction::TransactionPayload;
use crate::commands::{ContractBridge, SubmissionResult};
use crate::constants::CONTRACT_BIN;
use crate::errors::{BridgeError, BridgeErrorExt, BridgeResult};
use crate::rpc::ChainClient;
use crate::signers::TransactionSigner;

/// Deploys `bytecode_hex` with constructor arguments converted against the
/// interface's constructor. The CREATE address is known as soon as the
/// signing context is, and is returned alongside the transaction hash.
pub async fn deploy_contract<C: ChainClient + ?Sized>(
    bridge: &ContractBridge<C>,
    interface: &str,
    bytecode_hex: &str,
    raw_arguments: &[RawArgument],
    secret_key: &str,
) -> BridgeResult<SubmissionResult> {
    let interface = InterfaceDescription::parse(interface)?;
    let descriptors = interface.constructor_inputs()?;
    let constructor_args = convert_arguments(&descriptors, raw_arguments)
        .attach_printable("Converting constructor arguments")?;

    let bytecode = decode_hex(CONTRACT_BIN, bytecode_hex)?;
    if bytecode.is_empty() {
        return Err(Report::new(BridgeError::Encoding {
            field: CONTRACT_BIN.to_string(),
            reason: "bytecode is empty".to_string(),
        }));
    }

    let signer = TransactionSigner::from_hex(secret_key)?;
    bridge
        .submit_payload(&signer, TransactionPayload::Deploy { bytecode, constructor_args })
        .await
        .with_contract_info(None, None)
}
