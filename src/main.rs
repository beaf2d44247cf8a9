use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use wls_log_inspect::cli::Cli;
use wls_log_inspect::{console, html, inspect};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        error!("{e:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let settings = cli.into_settings()?;
    let domain = inspect(&settings).await?;

    print!("{}", console::render(&domain));
    html::write_report(&domain, &settings.output)?;
    Ok(())
}
