use std::sync::Arc;

use alloy::primitives::{address, Address};

use crate::commands::ContractBridge;

mod deploy_tests;
mod invoke_tests;

pub use crate::test_support as mock_client;
use mock_client::MockChainClient;

pub const ALICE_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
pub const ALICE: Address = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
pub const BOB_KEY: &str = "0x59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d";
pub const BOB: Address = address!("70997970C51812dc3A010C7d01b50e0d17dc79C8");

/// CREATE addresses of ALICE at nonce 0 and 1.
pub const ALICE_CONTRACT_0: Address = address!("5FbDB2315678afecb367f032d93F642f64180aa3");
pub const ALICE_CONTRACT_1: Address = address!("e7f1725E7734CE288F8367e1Bb143E90bb3F0512");

pub const TOKEN_BYTECODE: &str = "0x6080604052348015600f57600080fd5b50603f80601d6000396000f3fe";

pub const TOKEN_ABI: &str = r#"[
    {"type":"constructor","inputs":[{"name":"supply","type":"uint256"},{"name":"tag","type":"bytes32"}],"stateMutability":"nonpayable"},
    {"type":"function","name":"transfer","inputs":[{"name":"to","type":"address"},{"name":"amount","type":"uint256"}],"outputs":[{"name":"","type":"bool"}],"stateMutability":"nonpayable"},
    {"type":"function","name":"mint","inputs":[{"name":"to","type":"address"}],"outputs":[],"stateMutability":"nonpayable"},
    {"type":"function","name":"mint","inputs":[{"name":"to","type":"address"},{"name":"amount","type":"uint256"}],"outputs":[],"stateMutability":"nonpayable"},
    {"type":"function","name":"configure","inputs":[{"name":"orders","type":"tuple[]","components":[{"name":"owner","type":"address"},{"name":"amounts","type":"uint64[2]"}]}],"outputs":[],"stateMutability":"nonpayable"},
    {"type":"function","name":"pause","inputs":[],"outputs":[],"stateMutability":"nonpayable"}
]"#;

pub const STORE_ABI: &str = r#"[
    {"type":"function","name":"set","inputs":[{"name":"value","type":"string"}],"outputs":[],"stateMutability":"nonpayable"}
]"#;

/// 32 ASCII bytes, a valid `bytes32` literal.
pub const TAG_32: &str = "token-tag-0123456789abcdefghijkl";

pub fn bridge_with(
    client: MockChainClient,
) -> (ContractBridge<MockChainClient>, Arc<MockChainClient>) {
    let client = Arc::new(client);
    (ContractBridge::new(client.clone()), client)
}

pub fn bytecode() -> Vec<u8> {
    crate::codec::decode_hex("bin", TOKEN_BYTECODE).unwrap()
}
