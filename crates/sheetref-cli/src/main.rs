use anyhow::Context;
use clap::Parser;

use sheetref_cli::config::Config;
use sheetref_cli::{init_tracing, run, Args};

fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let config = Config::from_env()?.merge_args(&args)?;

    init_tracing(&config.log_filter);
    tracing::debug!(?config, "starting sheetref");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run(&args, &config, &mut out)
        .with_context(|| format!("failed to query {}", args.file.display()))?;

    Ok(())
}
