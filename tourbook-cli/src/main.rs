use std::sync::Arc;

use clap::Parser;
use tourbook_cli::{App, Cli};
use tourbook_core::ScheduleResolver;
use tourbook_store::{app_config::Config, FileTourSource};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tourbook_cli=info,tourbook_core=warn,tourbook_store=warn".into()),
        )
        // stdout carries the JSON output
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    let tours_path = cli
        .file
        .clone()
        .unwrap_or_else(|| config.content.tours_path.clone().into());
    tracing::info!("Reading tours from {}", tours_path.display());

    let source = Arc::new(FileTourSource::new(tours_path));
    let app = App::new(source, ScheduleResolver::new(config.resolver));

    let output = app.execute(cli.command).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
