mod secret_key;

pub use secret_key::{SecretKeySigner, SignedTransaction, TransactionSigner};
