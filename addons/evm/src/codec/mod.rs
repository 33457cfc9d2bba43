pub mod abi;
pub mod contract_deployment;
pub mod conversion;
pub mod transaction;


pub use abi::{
    convert_arguments, encode_params, EncodedValue, InterfaceDescription, RawArgument,
    ResolvedMethod, Selector, TypeDescriptor,
};
pub use conversion::{decode_hex, string_to_address};
