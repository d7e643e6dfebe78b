#![deny(unused)]
//! Content Guard - content-safety validation for AI-generated text.

use clap::Parser;

use content_guard::{read_input, Cli};
use content_guard_core::config::GuardrailsConfig;
use content_guard_governance::ContentGuard;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(dir) => GuardrailsConfig::load_from(dir)?,
        None => GuardrailsConfig::load()?,
    };

    content_guard_governance::configure_tracing(cli.json_logs || config.telemetry.json_logs)?;
    tracing::debug!("Starting content-guard v{}", env!("CARGO_PKG_VERSION"));

    let metrics = if config.telemetry.enable_metrics {
        match content_guard_governance::setup_metrics_recorder() {
            Ok(handle) => Some(handle),
            Err(e) => {
                tracing::warn!(error = %e, "Metrics disabled");
                None
            }
        }
    } else {
        None
    };

    let classifier = content_guard_classifier::create_classifier(&config.classifier, cli.offline)?;
    let guard = ContentGuard::builder()
        .with_config(config)
        .with_classifier(classifier)
        .build()?;

    let text = read_input(cli.command.input())?;
    let output = cli.command.execute(&guard, &text).await?;
    println!("{}", output);

    if cli.print_metrics {
        if let Some(handle) = metrics {
            eprintln!("{}", handle.render());
        }
    }

    Ok(())
}
