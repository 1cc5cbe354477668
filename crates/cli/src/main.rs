use anyhow::Context;
use clap::{Parser, Subcommand};
use shelf_kernel::settings::Settings;

/// Personal library tracker
#[derive(Debug, Parser)]
#[command(name = "shelf", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP API
    Serve {
        /// Start with the bundled sample books
        #[arg(long)]
        seed: bool,
        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },
    /// Print the merged OpenAPI document
    Openapi {
        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut settings = Settings::load().with_context(|| "failed to load shelf settings")?;

    match cli.command {
        Command::Serve { seed, port } => {
            shelf_telemetry::init(&settings.telemetry)?;
            settings.library.seed_sample_data |= seed;
            if let Some(port) = port {
                settings.server.port = port;
            }
            tracing::info!(
                env = ?settings.environment,
                port = settings.server.port,
                "shelf serve starting"
            );
            shelf_app::app::run(settings).await
        }
        Command::Openapi { pretty } => {
            let registry = shelf_app::app::build_registry(&settings);
            let document = shelf_http::router::openapi_document(&registry);
            let rendered = if pretty {
                serde_json::to_string_pretty(&document)?
            } else {
                serde_json::to_string(&document)?
            };
            println!("{}", rendered);
            Ok(())
        }
    }
}
