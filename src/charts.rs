//! Preflop chart lookup from JSON.
//!
//! Charts are keyed by position and action:
//!
//! ```json
//! {"ranges": {"BTN": {"open": {"hands": ["AA", "AKs"], "notation": "AA, AKs"}}}}
//! ```
//!
//! Positions are matched case-insensitively; action names are exact.

use crate::range::{HandClass, Range, RangeError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum ChartError {
    #[error("failed to read chart file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed chart data: {0}")]
    Json(#[from] serde_json::Error),
    #[error("no chart for position '{position}' and action '{action}'")]
    Unknown { position: String, action: String },
    #[error(transparent)]
    Range(#[from] RangeError),
}

/// One chart entry: the hand classes in range plus its notation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartRange {
    pub hands: Vec<HandClass>,
    #[serde(default)]
    pub notation: String,
    #[serde(default)]
    pub total_combos: Option<usize>,
    #[serde(default)]
    pub percentage: Option<f64>,
}

impl ChartRange {
    pub fn contains(&self, class: &HandClass) -> bool {
        self.hands.contains(class)
    }

    pub fn combo_count(&self) -> usize {
        self.hands.iter().map(HandClass::combo_count).sum()
    }

    /// 13x13 grid with aces in row/column 0, suited above the diagonal.
    pub fn to_matrix(&self) -> [[bool; 13]; 13] {
        let mut grid = [[false; 13]; 13];
        for class in &self.hands {
            let (row, col) = class.matrix_position();
            grid[row][col] = true;
        }
        grid
    }
}

#[derive(Debug, Deserialize)]
struct ChartFile {
    ranges: BTreeMap<String, BTreeMap<String, ChartRange>>,
}

/// Loaded preflop charts.
///
/// ```
/// use poker_calc::charts::ChartBook;
///
/// let json = r#"{"ranges": {"UTG": {"open": {"hands": ["AA", "KK", "AKs"], "notation": "KK+, AKs"}}}}"#;
/// let book = ChartBook::from_json_str(json).unwrap();
/// assert_eq!(book.positions(), ["UTG"]);
/// assert!(book.contains("KAs", "utg", "open").unwrap());
/// assert!(!book.contains("AKo", "UTG", "open").unwrap());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartBook {
    ranges: BTreeMap<String, BTreeMap<String, ChartRange>>,
}

impl ChartBook {
    pub fn from_json_str(json: &str) -> Result<Self, ChartError> {
        let file: ChartFile = serde_json::from_str(json)?;
        let ranges: BTreeMap<_, _> = file.ranges.into_iter().map(|(pos, actions)| (pos.to_uppercase(), actions)).collect();
        debug!(positions = ranges.len(), "loaded preflop charts");
        Ok(Self { ranges })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ChartError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ChartError::Io { path: path.to_path_buf(), source })?;
        Self::from_json_str(&json)
    }

    pub fn positions(&self) -> Vec<&str> {
        self.ranges.keys().map(String::as_str).collect()
    }

    /// Actions charted for `position`; empty when the position is unknown.
    pub fn actions(&self, position: &str) -> Vec<&str> {
        self.ranges
            .get(&position.to_uppercase())
            .map(|actions| actions.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn get(&self, position: &str, action: &str) -> Option<&ChartRange> {
        self.ranges.get(&position.to_uppercase())?.get(action)
    }

    /// Whether a hand class such as `"AKs"` or `"QQ"` is in the chart.
    /// Unknown charts contain nothing.
    pub fn contains(&self, hand: &str, position: &str, action: &str) -> Result<bool, ChartError> {
        let class: HandClass = hand.parse()?;
        Ok(self.get(position, action).is_some_and(|chart| chart.contains(&class)))
    }

    pub fn matrix(&self, position: &str, action: &str) -> Option<[[bool; 13]; 13]> {
        self.get(position, action).map(ChartRange::to_matrix)
    }

    /// The chart as a combo-level [`Range`].
    pub fn range(&self, position: &str, action: &str) -> Result<Range, ChartError> {
        let chart = self.get(position, action).ok_or_else(|| ChartError::Unknown {
            position: position.to_string(),
            action: action.to_string(),
        })?;
        let notation = if chart.notation.trim().is_empty() {
            chart.hands.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
        } else {
            chart.notation.clone()
        };
        Ok(Range::parse(&notation)?)
    }
}
