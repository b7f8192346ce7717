use std::fs::File;

use anyhow::{Context, Result, bail};
use tiny_bank::{
    account::TransferPolicy,
    bank::BankConfig,
    bin_utils::Service,
    processor::ProcessError,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "Usage: tiny-bank [--history] [--allow-full-balance-transfers] <script.csv>";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut filename = None;
    let mut show_history = false;
    let mut config = BankConfig::default();
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--history" => show_history = true,
            "--allow-full-balance-transfers" => {
                config.transfer_policy = TransferPolicy::AllowFullBalance
            }
            flag if flag.starts_with("--") => bail!("Unknown flag `{flag}`\n{USAGE}"),
            _ if filename.is_some() => bail!("Expected a single script file\n{USAGE}"),
            _ => filename = Some(arg),
        }
    }
    let filename = filename.context(USAGE)?;
    let file = File::open(&filename).with_context(|| format!("Failed to open `{filename}`"))?;

    let service = Service {
        input: file,
        output: &mut std::io::stdout(),
        config,
        show_history,
        error_printer: Box::new(|line, err| match err {
            ProcessError::CommandErr(err) => warn!(line, "{err}"),
            // business rule rejections, not technical errors
            ProcessError::AccountErr(err) => info!(line, "{err}"),
        }),
    };
    service.run()
}
