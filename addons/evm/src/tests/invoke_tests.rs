use alloy::primitives::{keccak256, TxKind, U256};

use super::mock_client::MockChainClient;
use super::*;
use crate::codec::RawArgument;
use crate::errors::{BridgeError, ContractInfo};

const TOKEN: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";

fn selector_of(signature: &str) -> Vec<u8> {
    keccak256(signature.as_bytes())[..4].to_vec()
}

#[tokio::test]
async fn test_transfer_encodes_two_values_at_pending_nonce() {
    let (bridge, client) = bridge_with(MockChainClient::new().with_pending_nonce(ALICE, 7));
    let args: Vec<RawArgument> = vec![BOB.to_checksum(None).into(), "100".into()];

    let result = bridge.invoke(TOKEN_ABI, TOKEN, "transfer", &args, ALICE_KEY).await.unwrap();
    assert!(result.contract_address.is_none());
    assert_eq!(result.tx_hash_hex().len(), 66);

    let tx = &client.submitted()[0];
    assert_eq!(tx.nonce, 7);
    assert_eq!(tx.to, TxKind::Call(ALICE_CONTRACT_0));
    assert_eq!(&tx.input[..4], &[0xa9, 0x05, 0x9c, 0xbb]);
    assert_eq!(tx.input.len(), 4 + 2 * 32);
    assert_eq!(&tx.input[4..16], &[0u8; 12]);
    assert_eq!(&tx.input[16..36], BOB.as_slice());
    assert_eq!(U256::from_be_slice(&tx.input[36..68]), U256::from(100u64));
}

#[tokio::test]
async fn test_unknown_method_is_method_not_found() {
    let (bridge, client) = bridge_with(MockChainClient::new());

    let err = bridge.invoke(TOKEN_ABI, TOKEN, "burn", &["1".into()], ALICE_KEY).await.unwrap_err();
    assert_eq!(err.current_context(), &BridgeError::MethodNotFound { name: "burn".into() });
    assert!(client.submitted().is_empty());
}

#[tokio::test]
async fn test_overloads_are_selected_by_argument_count() {
    let (bridge, client) = bridge_with(MockChainClient::new());
    let bob = BOB.to_checksum(None);

    bridge.invoke(TOKEN_ABI, TOKEN, "mint", &[bob.clone().into()], ALICE_KEY).await.unwrap();
    bridge
        .invoke(TOKEN_ABI, TOKEN, "mint", &[bob.clone().into(), "5".into()], ALICE_KEY)
        .await
        .unwrap();
    bridge
        .invoke(TOKEN_ABI, TOKEN, "mint(address)", &[bob.into()], ALICE_KEY)
        .await
        .unwrap();

    let submitted = client.submitted();
    assert_eq!(submitted[0].input[..4], selector_of("mint(address)")[..]);
    assert_eq!(submitted[1].input[..4], selector_of("mint(address,uint256)")[..]);
    assert_eq!(submitted[2].input[..4], selector_of("mint(address)")[..]);
    assert_eq!(submitted.iter().map(|tx| tx.nonce).collect::<Vec<_>>(), vec![0, 1, 2]);

    let err = bridge.invoke(TOKEN_ABI, TOKEN, "mint", &[], ALICE_KEY).await.unwrap_err();
    assert!(matches!(err.current_context(), BridgeError::ArgumentCount { actual: 0, .. }));
}

#[tokio::test]
async fn test_integer_literal_is_not_an_address() {
    let (bridge, _) = bridge_with(MockChainClient::new());

    let err = bridge
        .invoke(TOKEN_ABI, TOKEN, "transfer", &["5".into(), "100".into()], ALICE_KEY)
        .await
        .unwrap_err();
    match err.current_context() {
        BridgeError::AddressFormat { path, value, .. } => {
            assert_eq!(path.as_str(), "args[0]");
            assert_eq!(value, "5");
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[tokio::test]
async fn test_target_address_is_validated() {
    let (bridge, _) = bridge_with(MockChainClient::new());

    let err = bridge.invoke(TOKEN_ABI, "0x1234", "pause", &[], ALICE_KEY).await.unwrap_err();
    assert!(matches!(err.current_context(), BridgeError::AddressFormat { .. }));

    let bad_checksum = "0x5FbDB2315678afecb367f032d93F642f64180AA3";
    let err = bridge.invoke(TOKEN_ABI, bad_checksum, "pause", &[], ALICE_KEY).await.unwrap_err();
    assert!(matches!(err.current_context(), BridgeError::Checksum { .. }));
}

#[tokio::test]
async fn test_structured_arguments_from_json_text() {
    let (bridge, client) = bridge_with(MockChainClient::new());
    let orders = format!(
        r#"[{{"owner":"{}","amounts":[1,2]}},{{"owner":"{}","amounts":["3","0x04"]}}]"#,
        ALICE.to_checksum(None),
        BOB.to_checksum(None)
    );

    bridge.invoke(TOKEN_ABI, TOKEN, "configure", &[orders.into()], ALICE_KEY).await.unwrap();

    let input = &client.submitted()[0].input;
    assert_eq!(input[..4], selector_of("configure((address,uint64[2])[])")[..]);
    // offset, length, then two static (address, uint64, uint64) tuples
    assert_eq!(input.len(), 4 + 32 + 32 + 2 * 3 * 32);
    assert_eq!(U256::from_be_slice(&input[36..68]), U256::from(2u8));
    assert_eq!(&input[80..100], ALICE.as_slice());
    assert_eq!(U256::from_be_slice(&input[228..260]), U256::from(4u8));
}

#[tokio::test]
async fn test_failure_carries_contract_info() {
    let (bridge, _) = bridge_with(MockChainClient::rejecting_submissions());

    let err = bridge.invoke(TOKEN_ABI, TOKEN, "pause", &[], ALICE_KEY).await.unwrap_err();
    assert!(matches!(err.current_context(), BridgeError::Submission(_)));
    let info = err.downcast_ref::<ContractInfo>().unwrap();
    assert_eq!(info.address.as_deref(), Some(TOKEN));
    assert_eq!(info.method.as_deref(), Some("pause"));
}

#[tokio::test]
async fn test_empty_method_sends_without_calldata() {
    let (bridge, client) = bridge_with(MockChainClient::new().with_pending_nonce(ALICE, 3));

    let result = bridge.invoke(TOKEN_ABI, TOKEN, "", &[], ALICE_KEY).await.unwrap();
    assert!(result.contract_address.is_none());

    let tx = &client.submitted()[0];
    assert_eq!(tx.nonce, 3);
    assert_eq!(tx.to, TxKind::Call(ALICE_CONTRACT_0));
    assert!(tx.input.is_empty());
}

#[tokio::test]
async fn test_empty_method_rejects_arguments() {
    let (bridge, client) = bridge_with(MockChainClient::new());

    let err = bridge.invoke(TOKEN_ABI, TOKEN, "", &["1".into()], ALICE_KEY).await.unwrap_err();
    assert_eq!(err.current_context(), &BridgeError::ArgumentCount { expected: 0, actual: 1 });
    assert_eq!(client.nonce_queries(), 0);
}
