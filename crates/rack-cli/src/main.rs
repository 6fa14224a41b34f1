//! Rack CLI - inspect effects and exercise effect slots from the terminal.

mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "rack")]
#[command(author, version, about = "Effect rack slot tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available effects and their parameters
    Effects(commands::effects::EffectsArgs),

    /// Convert a decay time to an auto-quit buffer count
    Timeout(commands::timeout::TimeoutArgs),

    /// Run a test signal through a rack and report auto-quit behaviour
    Render(commands::render::RenderArgs),
}

fn main() -> anyhow::Result<()> {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Effects(args) => commands::effects::run(args),
        Commands::Timeout(args) => commands::timeout::run(args),
        Commands::Render(args) => commands::render::run(args),
    }
}
