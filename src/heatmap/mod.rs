use std::fmt;

use crate::error::{Error, Result};
use crate::types::CommitCount;

/// Row labels, indexed by `interval_of_day`.
pub const INTERVAL_LABELS: [&str; 8] = [
    "12am-3am", "3am-6am", "6am-9am", "9am-12pm", "12pm-3pm", "3pm-6pm", "6pm-9pm", "9pm-12am",
];

/// Column labels, indexed by `day_of_week - 1`.
pub const DAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thurs", "Fri", "Sat", "Sun"];

const INDEX_HEADER: &str = "interval_of_day";

/// Commit counts laid out as interval rows by weekday columns. Cells with no
/// observed commits stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Heatmap {
    cells: [[Option<i64>; 7]; 8],
}

impl Heatmap {
    /// Relabels and pivots grouped counts. Repeated cells are summed.
    pub fn from_counts(counts: &[CommitCount]) -> Result<Self> {
        let mut heatmap = Heatmap::default();
        for count in counts {
            let row = interval_index(count.interval_of_day)?;
            let col = day_index(count.day_of_week)?;
            let cell = &mut heatmap.cells[row][col];
            *cell = Some(cell.unwrap_or(0) + count.commit_counts);
        }
        Ok(heatmap)
    }

    #[must_use]
    pub fn get(&self, interval_label: &str, day_label: &str) -> Option<i64> {
        let row = INTERVAL_LABELS.iter().position(|l| *l == interval_label)?;
        let col = DAY_LABELS.iter().position(|l| *l == day_label)?;
        self.cells[row][col]
    }

    pub fn rows(&self) -> impl Iterator<Item = (&'static str, &[Option<i64>; 7])> {
        INTERVAL_LABELS.iter().copied().zip(self.cells.iter())
    }

    #[must_use]
    pub fn total(&self) -> i64 {
        self.cells.iter().flatten().flatten().sum()
    }

    /// Renders the grid as a markdown table.
    #[must_use]
    pub fn to_markdown(&self) -> String {
        self.to_string()
    }
}

fn interval_index(code: i64) -> Result<usize> {
    usize::try_from(code)
        .ok()
        .filter(|&i| i < INTERVAL_LABELS.len())
        .ok_or_else(|| Error::InvalidBucket(format!("interval_of_day {code}")))
}

fn day_index(code: i64) -> Result<usize> {
    usize::try_from(code)
        .ok()
        .and_then(|d| d.checked_sub(1))
        .filter(|&i| i < DAY_LABELS.len())
        .ok_or_else(|| Error::InvalidBucket(format!("day_of_week {code}")))
}

impl fmt::Display for Heatmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label_width = INTERVAL_LABELS
            .iter()
            .chain(std::iter::once(&INDEX_HEADER))
            .map(|l| l.len())
            .max()
            .unwrap_or(0);
        let cell_width = self
            .cells
            .iter()
            .flatten()
            .flatten()
            .map(|v| v.to_string().len())
            .chain(DAY_LABELS.iter().map(|l| l.len()))
            .max()
            .unwrap_or(0);

        write!(f, "| {INDEX_HEADER:<label_width$} |")?;
        for day in DAY_LABELS {
            write!(f, " {day:>cell_width$} |")?;
        }
        writeln!(f)?;

        write!(f, "|{}|", "-".repeat(label_width + 2))?;
        for _ in DAY_LABELS {
            write!(f, "{}:|", "-".repeat(cell_width + 1))?;
        }
        writeln!(f)?;

        for (label, row) in self.rows() {
            write!(f, "| {label:<label_width$} |")?;
            for cell in row {
                match cell {
                    Some(v) => write!(f, " {v:>cell_width$} |")?,
                    None => write!(f, " {:>cell_width$} |", "")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
