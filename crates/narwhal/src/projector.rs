//! Coordinate projection for the graph discipline.
//!
//! Turns a node-position mapping plus the caller's rows into one [`CoordinateBundle`] per row.
//! Mirroring and weight rules live here so that the cache can store whole bundles and serve any
//! dimension from them.

use std::fmt;
use std::str::FromStr;

use narwhal_graphlib::Graph;
use narwhal_layout::LayoutResult;
use serde::{Deserialize, Serialize};

use crate::edges::EdgeRow;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CoordinateBundle {
    pub x: f64,
    pub y: f64,
    pub weight: f64,
}

impl CoordinateBundle {
    /// Fallback for rows whose endpoints were not placed.
    pub const ZERO: CoordinateBundle = CoordinateBundle {
        x: 0.0,
        y: 0.0,
        weight: 0.0,
    };
}

/// Scalar requested from a graph-discipline bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    X,
    Y,
    Weight,
}

impl Dimension {
    /// Case-insensitive; surrounding whitespace is ignored.
    pub fn parse(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "x" => Ok(Self::X),
            "y" => Ok(Self::Y),
            "weight" => Ok(Self::Weight),
            _ => Err(Error::UnknownDimension {
                dimension: raw.to_string(),
            }),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::X => "x",
            Self::Y => "y",
            Self::Weight => "weight",
        }
    }

    pub fn select(self, bundle: &CoordinateBundle) -> f64 {
        match self {
            Self::X => bundle.x,
            Self::Y => bundle.y,
            Self::Weight => bundle.weight,
        }
    }
}

impl FromStr for Dimension {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the `weight` scalar is populated.
///
/// Two variants of the host scripts disagree here, so both are kept selectable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightPolicy {
    /// Degree of the node whose position is read, for every row.
    #[default]
    Degree,
    /// Degree on `mirrored` rows, zero on all others.
    MirroredOnly,
}

impl WeightPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Degree => "degree",
            Self::MirroredOnly => "mirrored_only",
        }
    }
}

impl FromStr for WeightPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "degree" => Ok(Self::Degree),
            "mirrored_only" | "mirrored-only" => Ok(Self::MirroredOnly),
            other => Err(Error::Config {
                message: format!("unknown weight policy {other:?}"),
            }),
        }
    }
}

/// Projects every row onto the layout.
///
/// A `mirrored` row reads the position of its `to` endpoint instead of its `from` endpoint.
/// Rows with a missing or unplaced endpoint get [`CoordinateBundle::ZERO`].
pub fn project(
    layout: &LayoutResult,
    graph: &Graph,
    rows: &[EdgeRow],
    policy: WeightPolicy,
) -> Vec<CoordinateBundle> {
    rows.iter()
        .map(|row| project_row(layout, graph, row, policy))
        .collect()
}

fn project_row(
    layout: &LayoutResult,
    graph: &Graph,
    row: &EdgeRow,
    policy: WeightPolicy,
) -> CoordinateBundle {
    let Some((from, to)) = row.endpoints() else {
        return CoordinateBundle::ZERO;
    };
    let (Some(from_pos), Some(to_pos)) = (layout.get(from), layout.get(to)) else {
        return CoordinateBundle::ZERO;
    };

    let mirrored = row.role.is_mirrored();
    let (read, pos) = if mirrored {
        (to, to_pos)
    } else {
        (from, from_pos)
    };

    let weight = match policy {
        WeightPolicy::MirroredOnly if !mirrored => 0.0,
        _ => graph.degree(read).unwrap_or(0) as f64,
    };

    CoordinateBundle {
        x: pos.x,
        y: pos.y,
        weight,
    }
}
