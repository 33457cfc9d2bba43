use std::fmt;

use alloy::dyn_abi::DynSolValue;
use alloy::primitives::{Address, FixedBytes, I256, U256};
use indexmap::IndexMap;

/// ABI type of a single constructor or method input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDescriptor {
    Uint(usize),
    Int(usize),
    Bool,
    FixedBytes(usize),
    Address,
    String,
    Bytes,
    FixedArray(Box<TypeDescriptor>, usize),
    Array(Box<TypeDescriptor>),
    Tuple(Vec<TupleField>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TupleField {
    pub name: String,
    pub ty: TypeDescriptor,
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDescriptor::Uint(bits) => write!(f, "uint{}", bits),
            TypeDescriptor::Int(bits) => write!(f, "int{}", bits),
            TypeDescriptor::Bool => write!(f, "bool"),
            TypeDescriptor::FixedBytes(size) => write!(f, "bytes{}", size),
            TypeDescriptor::Address => write!(f, "address"),
            TypeDescriptor::String => write!(f, "string"),
            TypeDescriptor::Bytes => write!(f, "bytes"),
            TypeDescriptor::FixedArray(inner, size) => write!(f, "{}[{}]", inner, size),
            TypeDescriptor::Array(inner) => write!(f, "{}[]", inner),
            TypeDescriptor::Tuple(fields) => {
                write!(f, "(")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", field.ty)?;
                }
                write!(f, ")")
            }
        }
    }
}

/// A configuration-supplied argument. Scalars are always text; lists and
/// records give arrays and tuples an unambiguous structure.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "serde_json::Value")]
pub enum RawArgument {
    Text(String),
    List(Vec<RawArgument>),
    Record(IndexMap<String, RawArgument>),
}

impl RawArgument {
    pub fn text(value: impl Into<String>) -> Self {
        RawArgument::Text(value.into())
    }

    pub fn list<I, T>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<RawArgument>,
    {
        RawArgument::List(values.into_iter().map(Into::into).collect())
    }

    pub fn kind(&self) -> &'static str {
        match self {
            RawArgument::Text(_) => "text",
            RawArgument::List(_) => "list",
            RawArgument::Record(_) => "record",
        }
    }
}

impl From<&str> for RawArgument {
    fn from(value: &str) -> Self {
        RawArgument::Text(value.to_string())
    }
}

impl From<String> for RawArgument {
    fn from(value: String) -> Self {
        RawArgument::Text(value)
    }
}

impl TryFrom<serde_json::Value> for RawArgument {
    type Error = String;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        use serde_json::Value;
        match value {
            Value::String(text) => Ok(RawArgument::Text(text)),
            // arbitrary_precision keeps the literal digits intact
            Value::Number(number) => Ok(RawArgument::Text(number.to_string())),
            Value::Bool(flag) => Ok(RawArgument::Text(flag.to_string())),
            Value::Array(items) => Ok(RawArgument::List(
                items.into_iter().map(RawArgument::try_from).collect::<Result<Vec<_>, _>>()?,
            )),
            Value::Object(entries) => {
                let mut record = IndexMap::new();
                for (key, entry) in entries {
                    record.insert(key, RawArgument::try_from(entry)?);
                }
                Ok(RawArgument::Record(record))
            }
            Value::Null => Err("null is not a valid contract argument".to_string()),
        }
    }
}

/// Canonical typed result of converting a raw argument against its descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodedValue {
    Uint { value: U256, bits: usize },
    Int { value: I256, bits: usize },
    Bool(bool),
    /// Always exactly as long as the descriptor's declared size.
    FixedBytes(Vec<u8>),
    Address(Address),
    Bytes(Vec<u8>),
    String(String),
    Array(Vec<EncodedValue>),
    FixedArray(Vec<EncodedValue>),
    Tuple(Vec<(String, EncodedValue)>),
}

impl EncodedValue {
    pub fn as_uint(&self) -> Option<U256> {
        match self {
            EncodedValue::Uint { value, .. } => Some(*value),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<I256> {
        match self {
            EncodedValue::Int { value, .. } => Some(*value),
            _ => None,
        }
    }

    pub fn as_address(&self) -> Option<Address> {
        match self {
            EncodedValue::Address(address) => Some(*address),
            _ => None,
        }
    }

    pub fn field(&self, name: &str) -> Option<&EncodedValue> {
        match self {
            EncodedValue::Tuple(fields) => {
                fields.iter().find(|(field, _)| field == name).map(|(_, value)| value)
            }
            _ => None,
        }
    }

    pub fn to_sol_value(&self) -> DynSolValue {
        match self {
            EncodedValue::Uint { value, bits } => DynSolValue::Uint(*value, *bits),
            EncodedValue::Int { value, bits } => DynSolValue::Int(*value, *bits),
            EncodedValue::Bool(flag) => DynSolValue::Bool(*flag),
            // left-aligned in the 32 byte word, as the ABI lays out bytesN
            EncodedValue::FixedBytes(bytes) => {
                DynSolValue::FixedBytes(FixedBytes::<32>::right_padding_from(bytes), bytes.len())
            }
            EncodedValue::Address(address) => DynSolValue::Address(*address),
            EncodedValue::Bytes(bytes) => DynSolValue::Bytes(bytes.clone()),
            EncodedValue::String(text) => DynSolValue::String(text.clone()),
            EncodedValue::Array(items) => {
                DynSolValue::Array(items.iter().map(EncodedValue::to_sol_value).collect())
            }
            EncodedValue::FixedArray(items) => {
                DynSolValue::FixedArray(items.iter().map(EncodedValue::to_sol_value).collect())
            }
            EncodedValue::Tuple(fields) => {
                DynSolValue::Tuple(fields.iter().map(|(_, value)| value.to_sol_value()).collect())
            }
        }
    }
}

/// ABI head/tail encoding of an ordered argument list, without selector.
pub fn encode_params(values: &[EncodedValue]) -> Vec<u8> {
    if values.is_empty() {
        return vec![];
    }
    DynSolValue::Tuple(values.iter().map(EncodedValue::to_sol_value).collect()).abi_encode_params()
}
