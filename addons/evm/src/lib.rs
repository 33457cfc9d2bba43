#[macro_use]
extern crate serde_derive;

#[macro_use]
extern crate hiro_system_kit;

pub mod codec;
pub mod commands;
pub mod config;
pub mod constants;
pub mod errors;
pub mod resources;
pub mod rpc;
pub mod signers;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

#[cfg(test)]
mod tests;

use hiro_system_kit::Logger;

pub use codec::{RawArgument, TypeDescriptor};
pub use commands::{ContractBridge, SubmissionResult};
pub use config::ProviderConfig;
pub use errors::{BridgeError, BridgeResult};
pub use rpc::{ChainClient, EvmRpc};

/// Logging handle threaded through the bridge. Without a logger nothing is
/// emitted.
#[derive(Clone)]
pub struct Context {
    pub logger: Option<Logger>,
}

impl Context {
    pub fn empty() -> Context {
        Context { logger: None }
    }

    pub fn new(logger: Logger) -> Context {
        Context { logger: Some(logger) }
    }

    pub fn try_log<F>(&self, closure: F)
    where
        F: FnOnce(&Logger),
    {
        if let Some(ref logger) = self.logger {
            closure(logger)
        }
    }
}
