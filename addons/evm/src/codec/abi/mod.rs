// ABI type resolution and argument conversion

pub mod encoding;
pub mod resolver;
pub mod types;

pub use encoding::{convert_argument, convert_arguments};
pub use resolver::{resolve, InterfaceDescription, ResolvedMethod, Selector};
pub use types::{encode_params, EncodedValue, RawArgument, TupleField, TypeDescriptor};
