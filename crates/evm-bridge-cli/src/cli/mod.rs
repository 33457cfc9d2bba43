use clap::{Parser, Subcommand};
use evm_contract_bridge::Context;
use std::process;

mod apply;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Opts {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, PartialEq, Clone, Debug)]
enum Command {
    /// Deploy the contracts and send the transactions declared in a resource file
    #[clap(name = "apply", bin_name = "apply")]
    Apply(ApplyResources),
}

#[derive(Parser, PartialEq, Clone, Debug)]
pub struct ApplyResources {
    /// Path to the resource file ([[ethereum_smart_contract]] and [[ethereum_tx_send]] tables)
    pub resources_path: String,
    /// Path to the provider configuration. Falls back to ETHEREUM_CLIENT_ADDRESS
    /// and ETHEREUM_ACCOUNT_KEY when omitted
    #[arg(long = "config", short = 'c')]
    pub config_path: Option<String>,
}

pub fn main() {
    let logger = hiro_system_kit::log::setup_logger();
    let _guard = hiro_system_kit::log::setup_global_logger(logger.clone());
    let ctx = Context::new(logger);

    let opts: Opts = match Opts::try_parse() {
        Ok(opts) => opts,
        Err(e) => {
            println!("{}", e);
            process::exit(1);
        }
    };

    match hiro_system_kit::nestable_block_on(handle_command(opts, &ctx)) {
        Err(e) => {
            ctx.try_log(|logger| error!(logger, "{e}"));
            std::thread::sleep(std::time::Duration::from_millis(500));
            process::exit(1);
        }
        Ok(_) => {}
    }
}

async fn handle_command(opts: Opts, ctx: &Context) -> Result<(), String> {
    match opts.command {
        Command::Apply(cmd) => {
            apply::handle_apply_command(&cmd, ctx).await?;
        }
    }
    Ok(())
}
