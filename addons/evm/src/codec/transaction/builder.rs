use alloy::network::TransactionBuilder;
use alloy::primitives::U256;
use alloy::rpc::types::TransactionRequest;

use super::context::SigningContext;
use super::intent::TransactionPayload;

/// Legacy EIP-155 request: gas price and chain id come from the context,
/// nothing is left for a provider filler to complete.
pub fn build_legacy_request(
    payload: &TransactionPayload,
    context: &SigningContext,
) -> TransactionRequest {
    let tx = TransactionRequest::default()
        .with_from(context.sender())
        .with_nonce(context.nonce())
        .with_chain_id(context.chain_id())
        .with_gas_price(context.gas_price())
        .with_gas_limit(context.gas_limit())
        .with_value(U256::ZERO);

    match payload {
        TransactionPayload::Deploy { .. } => tx.with_deploy_code(payload.input()),
        TransactionPayload::Invoke { target, .. } | TransactionPayload::Send { target } => {
            tx.with_to(*target).with_input(payload.input())
        }
    }
}
