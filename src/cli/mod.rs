mod commands;
pub mod pickers;
mod run;

pub use commands::{Commands, GlobalArgs, TargetArgs};
pub use run::{run_etl_command, run_heatmap_command, run_interactive};

use std::path::Path;

use crate::config::PipelineConfig;

/// Load the config file (if any) and apply command-line overrides
pub fn load_config(global: &GlobalArgs) -> anyhow::Result<PipelineConfig> {
    let mut config = PipelineConfig::load(global.config.as_deref().map(Path::new))?;

    if let Some(data_dir) = &global.data_dir {
        config.warehouse.data_dir = data_dir.into();
    }
    if let Some(api_url) = &global.api_url {
        config.api.base_url = api_url.clone();
    }
    if let Some(token) = &global.token {
        config.api.token = Some(token.clone());
    }

    Ok(config)
}
