use std::fs;
use std::sync::Arc;

use evm_contract_bridge::constants::{SMART_CONTRACT_RESOURCE, TX_SEND_RESOURCE};
use evm_contract_bridge::resources::ResourceFile;
use evm_contract_bridge::{BridgeResult, ChainClient, Context, ContractBridge, ProviderConfig};
use serde_json::json;

use super::ApplyResources;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ApplySummary {
    pub applied: usize,
    pub failed: usize,
}

pub async fn handle_apply_command(cmd: &ApplyResources, ctx: &Context) -> Result<(), String> {
    let document = fs::read_to_string(&cmd.resources_path)
        .map_err(|e| format!("unable to read {}: {}", cmd.resources_path, e))?;
    let resources = ResourceFile::from_toml_str(&document).map_err(|e| format!("{:?}", e))?;
    if resources.is_empty() {
        ctx.try_log(|logger| info!(logger, "no resources declared in {}", cmd.resources_path));
        return Ok(());
    }

    let config = match &cmd.config_path {
        Some(path) => {
            let document = fs::read_to_string(path)
                .map_err(|e| format!("unable to read {}: {}", path, e))?;
            ProviderConfig::from_toml_str(&document)
        }
        None => ProviderConfig::from_env(),
    }
    .map_err(|e| format!("{:?}", e))?;

    let client = config.client().map_err(|e| format!("{:?}", e))?;
    let bridge = ContractBridge::new(Arc::new(client))
        .with_gas_limit(config.gas_limit)
        .with_context(ctx.clone());

    apply_resources(&bridge, &config, &resources, ctx).await.into_result()
}

impl ApplySummary {
    /// Any failed resource fails the whole run.
    pub fn into_result(self) -> Result<(), String> {
        if self.failed > 0 {
            return Err(format!(
                "{} of {} resources failed",
                self.failed,
                self.applied + self.failed
            ));
        }
        Ok(())
    }
}

/// Applies contracts first, then transactions, each in file order. A failed
/// resource is reported and the batch moves on.
pub async fn apply_resources<C: ChainClient + ?Sized>(
    bridge: &ContractBridge<C>,
    config: &ProviderConfig,
    resources: &ResourceFile,
    ctx: &Context,
) -> ApplySummary {
    let mut summary = ApplySummary::default();

    for (index, contract) in resources.smart_contracts.iter().enumerate() {
        let result = contract.create(bridge, config).await;
        record(&mut summary, ctx, SMART_CONTRACT_RESOURCE, index, result);
    }
    for (index, transaction) in resources.transactions.iter().enumerate() {
        let result = transaction.create(bridge, config).await;
        record(&mut summary, ctx, TX_SEND_RESOURCE, index, result);
    }
    summary
}

fn record<S: serde::Serialize>(
    summary: &mut ApplySummary,
    ctx: &Context,
    resource_type: &str,
    index: usize,
    result: BridgeResult<S>,
) {
    match result {
        Ok(state) => {
            summary.applied += 1;
            println!("{}", json!({ "type": resource_type, "index": index, "state": state }));
        }
        Err(report) => {
            summary.failed += 1;
            ctx.try_log(|logger| {
                error!(logger, "{}[{}] failed: {:?}", resource_type, index, report)
            });
        }
    }
}
