use tracing::info;

use super::commands::TargetArgs;
use super::pickers::{Mode, pick_mode, prompt_since, prompt_with_default};
use crate::config::PipelineConfig;
use crate::pipeline::{RunOutcome, make_heatmap, open_warehouse, run_etl};
use crate::remote::GithubClient;

/// Fill organisation and repository from flags, prompts, or the config.
fn resolve_target(
    config: &mut PipelineConfig,
    target: TargetArgs,
    non_interactive: bool,
) -> anyhow::Result<()> {
    config.organisation = match target.organisation {
        Some(o) => o,
        None if non_interactive => config.organisation.clone(),
        None => prompt_with_default("Organisation:", &config.organisation)?,
    };
    config.repository = match target.repository {
        Some(r) => r,
        None if non_interactive => config.repository.clone(),
        None => prompt_with_default("Repository:", &config.repository)?,
    };
    Ok(())
}

pub fn run_etl_command(
    mut config: PipelineConfig,
    target: TargetArgs,
    since: Option<String>,
    non_interactive: bool,
) -> anyhow::Result<()> {
    resolve_target(&mut config, target, non_interactive)?;
    config.since = match since {
        Some(s) => s,
        None if non_interactive => config.since.clone(),
        None => prompt_since(&config.since)?,
    };
    config.validate()?;

    let warehouse = open_warehouse(&config.warehouse)?;
    let client = GithubClient::new(&config.api)?;

    match run_etl(&config, client, &warehouse)? {
        RunOutcome::NoCommits { repository } => {
            println!(
                "No commits found for {}/{} since {}.",
                repository.organisation, repository.repository, config.since
            );
        }
        RunOutcome::Loaded {
            repository,
            commits,
            authors,
        } => {
            info!(repo_id = repository.repo_id, commits, authors, "load complete");
            println!();
            println!(
                "Loaded {commits} commits ({authors} author rows) for {}/{}",
                repository.organisation, repository.repository
            );
            println!("Warehouse: {}", config.warehouse.db_path().display());
            println!();
        }
    }

    Ok(())
}

pub fn run_heatmap_command(
    mut config: PipelineConfig,
    target: TargetArgs,
    non_interactive: bool,
) -> anyhow::Result<()> {
    resolve_target(&mut config, target, non_interactive)?;

    let warehouse = open_warehouse(&config.warehouse)?;
    let heatmap = make_heatmap(&warehouse, &config.organisation, &config.repository)?;

    println!("{}", heatmap.to_markdown());
    Ok(())
}

/// The bare `commit-etl` menu: pick a mode, then answer its prompts.
pub fn run_interactive(config: PipelineConfig) -> anyhow::Result<()> {
    let Some(mode) = pick_mode()? else {
        return Ok(());
    };

    let target = TargetArgs {
        organisation: None,
        repository: None,
    };
    match mode {
        Mode::RunEtl => run_etl_command(config, target, None, false),
        Mode::Heatmap => run_heatmap_command(config, target, false),
    }
}
