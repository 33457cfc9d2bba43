pub mod call_contract;
pub mod deploy_contract;

pub use call_contract::call_contract;
pub use deploy_contract::deploy_contract;
