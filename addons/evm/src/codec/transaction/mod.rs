// Signing contexts and the transaction intent lifecycle

pub mod builder;
pub mod context;
pub mod intent;

pub use builder::build_legacy_request;
pub use context::{SigningContext, TransactionContextBuilder};
pub use intent::{IntentStage, IntentState, TransactionIntent, TransactionPayload};
