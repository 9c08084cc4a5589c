mod cli;
mod frontend;
mod persistence;

use anyhow::Context;
use clap::Parser;

fn main() -> anyhow::Result<()> {
    let args = cli::CliArgs::parse();
    quickopen_logging::initialize(args.log.into(), args.log_level());

    let settings_path = match &args.settings {
        Some(path) => path.clone(),
        None => persistence::default_settings_path()
            .context("no config directory available; pass --settings")?,
    };
    let stored = persistence::load_settings(&settings_path);

    // All coordination runs on this one thread.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("building tokio runtime")?;
    runtime.block_on(frontend::run(args, stored, settings_path))
}
