use std::fmt;

use inquire::validator::Validation;
use inquire::{InquireError, Select, Text};

use crate::types::parse_timestamp;

/// Top-level menu choices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    RunEtl,
    Heatmap,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::RunEtl => write!(f, "1) Run ETL"),
            Mode::Heatmap => write!(f, "2) Make heatmap"),
        }
    }
}

/// Pick a mode, defaulting to running the ETL
pub fn pick_mode() -> anyhow::Result<Option<Mode>> {
    let selection = Select::new("Choose a mode:", vec![Mode::RunEtl, Mode::Heatmap])
        .with_starting_cursor(0)
        .with_help_message("Enter to select")
        .with_vim_mode(true)
        .prompt();

    match selection {
        Ok(mode) => Ok(Some(mode)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Prompt for a non-empty value, falling back to `default` on Enter
pub fn prompt_with_default(label: &str, default: &str) -> anyhow::Result<String> {
    let value = Text::new(label)
        .with_default(default)
        .with_validator(|input: &str| {
            if input.trim().is_empty() {
                Ok(Validation::Invalid("Value cannot be empty".into()))
            } else {
                Ok(Validation::Valid)
            }
        })
        .prompt()?;
    Ok(value.trim().to_string())
}

/// Prompt for the start date, which must parse as ISO-8601
pub fn prompt_since(default: &str) -> anyhow::Result<String> {
    let value = Text::new("Start date:")
        .with_default(default)
        .with_help_message("ISO-8601, e.g. 2021-01-01T00:00:00Z")
        .with_validator(|input: &str| {
            if parse_timestamp(input).is_ok() {
                Ok(Validation::Valid)
            } else {
                Ok(Validation::Invalid(
                    "Expected an ISO-8601 timestamp such as 2021-01-01T00:00:00Z".into(),
                ))
            }
        })
        .prompt()?;
    Ok(value.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_labels() {
        assert_eq!(Mode::RunEtl.to_string(), "1) Run ETL");
        assert_eq!(Mode::Heatmap.to_string(), "2) Make heatmap");
    }
}
