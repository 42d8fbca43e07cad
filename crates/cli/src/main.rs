use anyhow::Result;
use clap::Parser;

use siteledger_cli::{Args, run};
use siteledger_infra::EngineConfig;

fn main() -> Result<()> {
    let config = EngineConfig::from_env()?;
    siteledger_observability::init_with(config.log_format);

    let args = Args::parse();
    let compact = args.compact;
    let report = run(args)?;

    let out = if compact {
        serde_json::to_string(&report)?
    } else {
        serde_json::to_string_pretty(&report)?
    };
    println!("{out}");
    Ok(())
}
