mod commands;

use anyhow::Context;
use bookstand_kernel::settings::{Environment, Settings};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = commands::Cli::parse();

    let settings = Settings::load().with_context(|| "failed to load bookstand settings")?;
    bookstand_telemetry::init(&settings.telemetry)?;

    if settings.environment != Environment::Production {
        tracing::debug!(api_url = %settings.api.url, "resolved API base URL");
    }

    commands::run(cli, &settings).await
}
