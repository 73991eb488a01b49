//! # commit-etl
//!
//! Pulls a repository's commit history from the GitHub REST API into a SQLite
//! warehouse, and renders a weekday by time-of-day commit heatmap from it.
//!
//! ## Library Usage
//!
//! ```toml
//! [dependencies]
//! commit-etl = { version = "0.0.1", default-features = false }
//! ```
//!
//! ```rust,ignore
//! use commit_etl::config::PipelineConfig;
//! use commit_etl::pipeline::{open_warehouse, run_etl, make_heatmap};
//! use commit_etl::remote::GithubClient;
//!
//! let config = PipelineConfig::default();
//! let warehouse = open_warehouse(&config.warehouse)?;
//! let client = GithubClient::new(&config.api)?;
//! run_etl(&config, client, &warehouse)?;
//!
//! let heatmap = make_heatmap(&warehouse, &config.organisation, &config.repository)?;
//! println!("{heatmap}");
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` (default): Includes CLI module. Disable with `default-features = false`.

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod heatmap;
pub mod pipeline;
pub mod remote;
pub mod types;
pub mod warehouse;
