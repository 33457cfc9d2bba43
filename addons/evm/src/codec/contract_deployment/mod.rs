use alloy::primitives::{keccak256, Address};
use alloy::rlp::{encode_list, BufMut, Encodable};

use crate::codec::abi::{encode_params, EncodedValue};

/// Init code of a CREATE deployment: bytecode followed by the encoded constructor arguments.
pub fn create_init_code(bytecode: &[u8], constructor_args: &[EncodedValue]) -> Vec<u8> {
    let mut init_code = bytecode.to_vec();
    init_code.append(&mut encode_params(constructor_args));
    init_code
}

pub struct CreateAddress {
    pub sender_address: Address,
    pub nonce: u64,
}

impl Encodable for CreateAddress {
    fn encode(&self, out: &mut dyn BufMut) {
        let enc: [&dyn Encodable; 2] = [&self.sender_address, &self.nonce];
        encode_list::<&dyn Encodable, dyn Encodable>(&enc, out);
    }
}

/// `keccak256(rlp([sender, nonce]))[12..]`, known before the deployment is mined.
pub fn generate_create_address(sender_address: &Address, nonce: u64) -> Address {
    let create_address = CreateAddress { sender_address: *sender_address, nonce };
    let mut out = Vec::new();
    create_address.encode(&mut out);
    let hash = keccak256(&out);
    Address::from_slice(&hash[12..32])
}
