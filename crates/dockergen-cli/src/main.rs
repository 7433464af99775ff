mod commands;

use clap::{Parser, Subcommand};
use commands::GenerateArgs;

#[derive(Parser)]
#[command(
    name = "dockergen",
    about = "Generate Dockerfiles and image mappings for Go entry points"
)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the entry points selected by the filters
    Discover {
        #[command(flatten)]
        args: GenerateArgs,
    },
    /// Generate one Dockerfile per entry point and the image mapping
    Dockerfile {
        #[command(flatten)]
        args: GenerateArgs,
    },
    /// Generate the must-gather Dockerfile
    MustGather {
        #[command(flatten)]
        args: GenerateArgs,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Per-image overrides may be pinned in a local .env file.
    if let Err(e) = dotenvy::dotenv()
        && !e.not_found()
    {
        return Err(anyhow::Error::new(e).context("failed to load .env"));
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Discover { args } => commands::discover(args)?,
        Commands::Dockerfile { args } => commands::dockerfile(args).await?,
        Commands::MustGather { args } => commands::must_gather(args)?,
    }

    Ok(())
}
