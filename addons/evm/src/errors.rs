use error_stack::Report;
use std::fmt;

pub type BridgeResult<T> = Result<T, Report<BridgeError>>;

/// Location of a value inside the positional argument list, e.g. `args[1][0].owner`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArgPath(String);

impl ArgPath {
    pub fn argument(index: usize) -> Self {
        ArgPath(format!("args[{}]", index))
    }

    pub fn named(name: &str) -> Self {
        ArgPath(name.to_string())
    }

    pub fn index(&self, index: usize) -> Self {
        ArgPath(format!("{}[{}]", self.0, index))
    }

    pub fn field(&self, name: &str) -> Self {
        ArgPath(format!("{}.{}", self.0, name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArgPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Failure taxonomy of the bridge. Every variant is recoverable: the caller
/// decides whether a failed resource aborts the batch.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BridgeError {
    #[error("invalid interface description: {0}")]
    InterfaceParse(String),
    #[error("'{selector}' not found in interface description")]
    SelectorNotFound { selector: String },
    #[error("method '{name}' not found in interface description")]
    MethodNotFound { name: String },
    #[error("expected {expected} arguments, got {actual}")]
    ArgumentCount { expected: usize, actual: usize },
    #[error("{path}: '{value}' is not a valid {ty} literal")]
    NumericFormat { path: ArgPath, ty: String, value: String },
    #[error("{path}: {value} is out of range for {ty}")]
    NumericRange { path: ArgPath, ty: String, value: String },
    #[error("{path}: expected 'true' or 'false', got '{value}'")]
    BooleanFormat { path: ArgPath, value: String },
    #[error("{path}: {ty} requires exactly {expected} bytes, got {actual}")]
    ByteLength { path: ArgPath, ty: String, expected: usize, actual: usize },
    #[error("{path}: invalid address '{value}': {reason}")]
    AddressFormat { path: ArgPath, value: String, reason: String },
    #[error("{path}: address '{value}' has an invalid checksum")]
    Checksum { path: ArgPath, value: String },
    #[error("{path}: {ty} requires {expected} elements, got {actual}")]
    ArrayLength { path: ArgPath, ty: String, expected: usize, actual: usize },
    #[error("{path}: expected {expected} for {ty}, got {actual}")]
    ArgumentShape { path: ArgPath, ty: String, expected: String, actual: String },
    #[error("{path}: {reason}")]
    TupleField { path: ArgPath, reason: String },
    #[error("unsupported ABI type '{0}'")]
    UnsupportedType(String),
    #[error("invalid signing key: {0}")]
    KeyFormat(String),
    #[error("chain client query {method} failed: {reason}")]
    ClientQuery { method: String, reason: String },
    #[error("failed to sign transaction: {0}")]
    Signing(String),
    #[error("transaction rejected: {0}")]
    Submission(String),
    #[error("invalid hex in {field}: {reason}")]
    Encoding { field: String, reason: String },
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// RPC call details attached to client failures.
#[derive(Debug, Clone)]
pub struct RpcContext {
    pub endpoint: String,
    pub method: String,
    pub params: Option<String>,
}

impl fmt::Display for RpcContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RPC {} at {}", self.method, self.endpoint)?;
        if let Some(params) = &self.params {
            write!(f, " params: {}", params)?;
        }
        Ok(())
    }
}

/// Contract information for deployment/interaction errors
#[derive(Debug, Clone)]
pub struct ContractInfo {
    pub address: Option<String>,
    pub method: Option<String>,
}

impl fmt::Display for ContractInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.address, &self.method) {
            (Some(addr), Some(method)) => write!(f, "Contract at {} method: {}", addr, method),
            (Some(addr), None) => write!(f, "Contract at {}", addr),
            (None, Some(method)) => write!(f, "Contract method: {}", method),
            (None, None) => write!(f, "Contract deployment"),
        }
    }
}

pub trait BridgeErrorExt {
    fn with_contract_info(self, address: Option<String>, method: Option<String>) -> Self;
}

impl<T> BridgeErrorExt for BridgeResult<T> {
    fn with_contract_info(self, address: Option<String>, method: Option<String>) -> Self {
        self.map_err(|e| e.attach(ContractInfo { address, method }))
    }
}

/// Helper macro for creating bridge errors
#[macro_export]
macro_rules! bridge_error {
    ($error:expr, $($arg:tt)*) => {{
        error_stack::Report::new($error)
            .attach_printable(format!($($arg)*))
    }};
}
