use alloy::primitives::{TxKind, U256};

use super::mock_client::{MockChainClient, MOCK_CHAIN_ID, MOCK_GAS_PRICE};
use super::*;
use crate::codec::transaction::IntentStage;
use crate::codec::RawArgument;
use crate::constants::DEFAULT_GAS_LIMIT;
use crate::errors::BridgeError;

fn token_args(supply: &str, tag: &str) -> Vec<RawArgument> {
    vec![RawArgument::text(supply), RawArgument::text(tag)]
}

#[tokio::test]
async fn test_deploy_encodes_constructor_and_predicts_address() {
    let (bridge, client) = bridge_with(MockChainClient::new());

    let result = bridge
        .deploy(TOKEN_ABI, TOKEN_BYTECODE, &token_args("1000000000000000000", TAG_32), ALICE_KEY)
        .await
        .unwrap();

    assert_eq!(result.contract_address, Some(ALICE_CONTRACT_0));
    assert_eq!(
        result.contract_address_hex().as_deref(),
        Some("0x5FbDB2315678afecb367f032d93F642f64180aa3")
    );

    let submitted = client.submitted();
    assert_eq!(submitted.len(), 1);
    let tx = &submitted[0];
    assert_eq!(tx.hash, result.tx_hash);
    assert_eq!(tx.sender, ALICE);
    assert_eq!(tx.nonce, 0);
    assert_eq!(tx.to, TxKind::Create);
    assert_eq!(tx.gas_price, MOCK_GAS_PRICE);
    assert_eq!(tx.gas_limit, DEFAULT_GAS_LIMIT);
    assert_eq!(tx.chain_id, Some(MOCK_CHAIN_ID));

    let code = bytecode();
    assert_eq!(tx.input.len(), code.len() + 64);
    assert_eq!(&tx.input[..code.len()], &code[..]);
    let supply = U256::from_be_slice(&tx.input[code.len()..code.len() + 32]);
    assert_eq!(supply, U256::from(10u64).pow(U256::from(18u64)));
    assert_eq!(&tx.input[code.len() + 32..], TAG_32.as_bytes());
}

#[tokio::test]
async fn test_short_bytes32_is_rejected_before_any_query() {
    let (bridge, client) = bridge_with(MockChainClient::new());

    let err = bridge
        .deploy(TOKEN_ABI, TOKEN_BYTECODE, &token_args("1000000000000000000", "hello"), ALICE_KEY)
        .await
        .unwrap_err();

    match err.current_context() {
        BridgeError::ByteLength { path, expected, actual, .. } => {
            assert_eq!(path.as_str(), "args[1]");
            assert_eq!((*expected, *actual), (32, 5));
        }
        other => panic!("unexpected error {:?}", other),
    }
    assert_eq!(client.nonce_queries(), 0);
    assert!(client.submitted().is_empty());
}

#[tokio::test]
async fn test_deploy_without_constructor_sends_bare_bytecode() {
    let (bridge, client) = bridge_with(MockChainClient::new());

    bridge.deploy(STORE_ABI, TOKEN_BYTECODE, &[], ALICE_KEY).await.unwrap();
    assert_eq!(client.submitted()[0].input, bytecode());

    let err = bridge.deploy(STORE_ABI, TOKEN_BYTECODE, &["1".into()], ALICE_KEY).await.unwrap_err();
    assert_eq!(err.current_context(), &BridgeError::ArgumentCount { expected: 0, actual: 1 });
}

#[tokio::test]
async fn test_sequential_deploys_use_increasing_nonces() {
    let (bridge, client) = bridge_with(MockChainClient::new());
    let args = token_args("1", TAG_32);

    let first = bridge.deploy(TOKEN_ABI, TOKEN_BYTECODE, &args, ALICE_KEY).await.unwrap();
    let second = bridge.deploy(TOKEN_ABI, TOKEN_BYTECODE, &args, ALICE_KEY).await.unwrap();

    assert_eq!(first.contract_address, Some(ALICE_CONTRACT_0));
    assert_eq!(second.contract_address, Some(ALICE_CONTRACT_1));
    let nonces: Vec<u64> = client.submitted().iter().map(|tx| tx.nonce).collect();
    assert_eq!(nonces, vec![0, 1]);
    assert_eq!(client.nonce_queries(), 2);
}

#[tokio::test]
async fn test_invalid_bytecode_is_an_encoding_error() {
    let (bridge, client) = bridge_with(MockChainClient::new());
    let args = token_args("1", TAG_32);

    let err = bridge.deploy(TOKEN_ABI, "0x60zz", &args, ALICE_KEY).await.unwrap_err();
    assert!(matches!(err.current_context(), BridgeError::Encoding { .. }));

    let err = bridge.deploy(TOKEN_ABI, "0x", &args, ALICE_KEY).await.unwrap_err();
    assert!(matches!(err.current_context(), BridgeError::Encoding { .. }));
    assert!(client.submitted().is_empty());
}

#[tokio::test]
async fn test_key_and_client_failures_are_recoverable() {
    let (bridge, _) = bridge_with(MockChainClient::new());
    let args = token_args("1", TAG_32);

    let err = bridge.deploy(TOKEN_ABI, TOKEN_BYTECODE, &args, "0xnot-a-key").await.unwrap_err();
    assert!(matches!(err.current_context(), BridgeError::KeyFormat(_)));

    let (offline, _) = bridge_with(MockChainClient::failing_queries());
    let err = offline.deploy(TOKEN_ABI, TOKEN_BYTECODE, &args, ALICE_KEY).await.unwrap_err();
    assert!(matches!(err.current_context(), BridgeError::ClientQuery { .. }));

    // the same bridge keeps working after a failed resource
    assert!(bridge.deploy(TOKEN_ABI, TOKEN_BYTECODE, &args, ALICE_KEY).await.is_ok());
}

#[tokio::test]
async fn test_rejected_submission_reports_last_stage() {
    let (bridge, _) = bridge_with(MockChainClient::rejecting_submissions());

    let err = bridge
        .deploy(TOKEN_ABI, TOKEN_BYTECODE, &token_args("1", TAG_32), ALICE_KEY)
        .await
        .unwrap_err();

    assert!(matches!(err.current_context(), BridgeError::Submission(_)));
    assert_eq!(err.downcast_ref::<IntentStage>(), Some(&IntentStage::Signed));
}

#[tokio::test]
async fn test_custom_gas_limit() {
    let (bridge, client) = bridge_with(MockChainClient::new());
    let bridge = bridge.with_gas_limit(3_000_000);

    bridge.deploy(STORE_ABI, TOKEN_BYTECODE, &[], ALICE_KEY).await.unwrap();
    assert_eq!(client.submitted()[0].gas_limit, 3_000_000);
}
