use clap::{Args, Subcommand};

#[derive(Subcommand)]
pub enum Commands {
    /// Extract commits from the API and load them into the warehouse
    Run {
        #[command(flatten)]
        target: TargetArgs,

        /// Only fetch commits at or after this ISO-8601 timestamp
        #[arg(long)]
        since: Option<String>,

        /// Skip interactive prompts and use configured defaults
        #[arg(long)]
        non_interactive: bool,
    },

    /// Print the weekday by time-of-day commit heatmap
    Heatmap {
        #[command(flatten)]
        target: TargetArgs,

        /// Skip interactive prompts and use configured defaults
        #[arg(long)]
        non_interactive: bool,
    },
}

#[derive(Args)]
pub struct TargetArgs {
    /// Organisation (repository owner)
    #[arg(long, short)]
    pub organisation: Option<String>,

    /// Repository name
    #[arg(long, short)]
    pub repository: Option<String>,
}

/// Flags shared by every command. Each overrides the config file.
#[derive(Args)]
pub struct GlobalArgs {
    /// TOML config file
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Directory holding the warehouse and staging databases
    #[arg(long, global = true)]
    pub data_dir: Option<String>,

    /// Base URL of the REST API
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// API token used for bearer authentication
    #[arg(long, global = true, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,
}
