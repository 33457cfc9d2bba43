use error_stack::{Report, ResultExt};

use crate::codec::transaction::TransactionPayload;
use crate::codec::{convert_arguments, string_to_address, InterfaceDescription, RawArgument};
use crate::commands::{ContractBridge, SubmissionResult};
use crate::constants::TRANSACTION_TO;
use crate::errors::{ArgPath, BridgeError, BridgeErrorExt, BridgeResult};
use crate::rpc::ChainClient;
use crate::signers::TransactionSigner;

/// Sends a state-changing call to `method` on the contract at `target_hex`.
/// Overloaded names are narrowed by the number of raw arguments. An empty
/// `method` sends the call without calldata.
pub async fn call_contract<C: ChainClient + ?Sized>(
    bridge: &ContractBridge<C>,
    interface: &str,
    target_hex: &str,
    method: &str,
    raw_arguments: &[RawArgument],
    secret_key: &str,
) -> BridgeResult<SubmissionResult> {
    let interface = InterfaceDescription::parse(interface)?;
    if method.is_empty() {
        return send_without_calldata(bridge, target_hex, raw_arguments, secret_key).await;
    }
    let resolved = interface.method(method, Some(raw_arguments.len())).map_err(|report| {
        match report.current_context() {
            BridgeError::SelectorNotFound { .. } => {
                report.change_context(BridgeError::MethodNotFound { name: method.to_string() })
            }
            _ => report,
        }
    })?;

    let target = string_to_address(target_hex, &ArgPath::named(TRANSACTION_TO))?;
    let args = convert_arguments(&resolved.inputs, raw_arguments)
        .attach_printable(format!("Converting arguments of '{}'", resolved.signature))?;

    let signer = TransactionSigner::from_hex(secret_key)?;
    let payload = TransactionPayload::Invoke {
        target,
        method: resolved.signature,
        selector: resolved.selector,
        args,
    };
    bridge
        .submit_payload(&signer, payload)
        .await
        .with_contract_info(Some(target.to_checksum(None)), Some(method.to_string()))
}

async fn send_without_calldata<C: ChainClient + ?Sized>(
    bridge: &ContractBridge<C>,
    target_hex: &str,
    raw_arguments: &[RawArgument],
    secret_key: &str,
) -> BridgeResult<SubmissionResult> {
    if !raw_arguments.is_empty() {
        return Err(Report::new(BridgeError::ArgumentCount {
            expected: 0,
            actual: raw_arguments.len(),
        }))
        .attach_printable("Arguments need a method to be encoded against");
    }
    let target = string_to_address(target_hex, &ArgPath::named(TRANSACTION_TO))?;
    let signer = TransactionSigner::from_hex(secret_key)?;
    bridge
        .submit_payload(&signer, TransactionPayload::Send { target })
        .await
        .with_contract_info(Some(target.to_checksum(None)), None)
}
