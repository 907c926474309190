use anyhow::Context;
use clap::Parser;
use forma::domain::config::FormaConfig;
use forma::kernel::config::load_config;
use forma::logger::Logger;
use forma_cli::args::Cli;
use std::io;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut cfg: FormaConfig =
        load_config(cli.config.as_deref()).context("Critical: Configuration is malformed")?;
    cli.apply_overrides(&mut cfg);

    let _log = Logger::from_settings(env!("CARGO_PKG_NAME"), &cfg.log)?.stderr(true).init()?;

    forma_cli::run(cli.command, &cfg, &mut io::stdout().lock()).await
}
