use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use travelchat::{build_router, build_system_prompt, Commands, Container, ContainerConfig, Language};

#[derive(Parser)]
#[command(name = "travelchat")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Serve {
            port,
            public,
            base_url,
            mock_llm,
        } => {
            let fallback_api_key = ContainerConfig::fallback_api_key_from_env();
            if fallback_api_key.is_some() {
                info!("Using {} as the credential fallback", travelchat::API_KEY_ENV);
            } else {
                warn!(
                    "{} is not set; each session must enter its own API key",
                    travelchat::API_KEY_ENV
                );
            }

            let container = Arc::new(Container::new(ContainerConfig {
                base_url,
                mock_llm,
                fallback_api_key,
            }));
            let app = build_router(container);

            let host = if public { [0, 0, 0, 0] } else { [127, 0, 0, 1] };
            let addr = SocketAddr::from((host, port));

            info!("Starting HTTP server on http://{}", addr);

            let listener = tokio::net::TcpListener::bind(addr).await?;
            axum::serve(listener, app).await?;
        }

        Commands::Prompt { language } => {
            let languages = language
                .iter()
                .map(|name| {
                    Language::from_name(name)
                        .ok_or_else(|| anyhow::anyhow!("Unsupported language: {}", name))
                })
                .collect::<Result<Vec<_>>>()?;

            println!("{}", build_system_prompt(&languages));
        }
    }

    Ok(())
}
