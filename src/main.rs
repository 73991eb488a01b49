use clap::Parser;
use tracing_subscriber::EnvFilter;

use commit_etl::cli::{
    Commands, GlobalArgs, load_config, run_etl_command, run_heatmap_command, run_interactive,
};

#[derive(Parser)]
#[command(name = "commit-etl")]
#[command(about = "Load repository commit history into a warehouse and chart it", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    /// Omit to choose a mode interactively
    #[command(subcommand)]
    command: Option<Commands>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("commit_etl=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli.global)?;

    match cli.command {
        Some(Commands::Run {
            target,
            since,
            non_interactive,
        }) => run_etl_command(config, target, since, non_interactive)?,
        Some(Commands::Heatmap {
            target,
            non_interactive,
        }) => run_heatmap_command(config, target, non_interactive)?,
        None => run_interactive(config)?,
    }

    Ok(())
}
