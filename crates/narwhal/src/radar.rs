//! Radar (polar) coordinates.
//!
//! Two stages: [`aggregate`] reduces the rows to per-label statistics (count, normalised
//! amplitude, angle, jitter), then [`project`] broadcasts them back to one [`RadarPoint`] per
//! row and applies mirroring.

use std::f64::consts::TAU;
use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use narwhal_layout::rng::XorShift64Star;
use serde::{Deserialize, Serialize};

use crate::edges::Role;
use crate::error::{Error, Result, ensure_same_length};

pub const DEFAULT_RADAR_SEED: u64 = 0;
pub const DEFAULT_NOISE_STD_DEV: f64 = 0.1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RadarRow {
    /// Category label; rows sharing a label share a point.
    pub data: String,
    pub amplitude: String,
    pub thread: String,
    pub node_type: Role,
}

impl RadarRow {
    pub fn new(data: impl Into<String>, node_type: impl Into<Role>) -> Self {
        Self {
            data: data.into(),
            amplitude: String::new(),
            thread: String::new(),
            node_type: node_type.into(),
        }
    }
}

pub fn rows_from_columns(
    data: &[String],
    amplitude: &[String],
    thread: &[String],
    node_type: &[String],
) -> Result<Vec<RadarRow>> {
    ensure_same_length(&[
        ("data", data.len()),
        ("amplitude", amplitude.len()),
        ("thread", thread.len()),
        ("node_type", node_type.len()),
    ])?;

    Ok(data
        .iter()
        .zip(amplitude)
        .zip(thread)
        .zip(node_type)
        .map(|(((data, amplitude), thread), node_type)| RadarRow {
            data: data.clone(),
            amplitude: amplitude.clone(),
            thread: thread.clone(),
            node_type: Role::parse(node_type),
        })
        .collect())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RadarDimension {
    X,
    Y,
    /// Raw occurrence count of the row's label.
    Size,
}

impl RadarDimension {
    pub fn parse(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "x" => Ok(Self::X),
            "y" => Ok(Self::Y),
            "size" => Ok(Self::Size),
            _ => Err(Error::InvalidDimension {
                dimension: raw.to_string(),
            }),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::X => "x",
            Self::Y => "y",
            Self::Size => "size",
        }
    }

    pub fn select(self, point: &RadarPoint) -> f64 {
        match self {
            Self::X => point.x,
            Self::Y => point.y,
            Self::Size => point.size as f64,
        }
    }
}

impl FromStr for RadarDimension {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for RadarDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadarOptions {
    pub seed: u64,
    pub noise_std_dev: f64,
}

impl Default for RadarOptions {
    fn default() -> Self {
        Self {
            seed: DEFAULT_RADAR_SEED,
            noise_std_dev: DEFAULT_NOISE_STD_DEV,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelStats {
    pub count: u64,
    /// Min-max scaled count in `[0, 1]`; `0` for every label when all counts are equal.
    pub normalized: f64,
    pub angle: f64,
    pub noise: f64,
}

impl LabelStats {
    /// Unmirrored position.
    pub fn position(&self) -> (f64, f64) {
        (
            self.normalized * self.angle.cos() + self.noise,
            self.normalized * self.angle.sin() + self.noise,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RadarPoint {
    pub x: f64,
    pub y: f64,
    pub size: u64,
}

/// Per-label statistics, keyed in first-seen order.
///
/// Angles and jitter follow that order, so reordering rows can move labels around the circle.
pub fn aggregate(rows: &[RadarRow], opts: &RadarOptions) -> IndexMap<String, LabelStats> {
    let mut counts: IndexMap<&str, u64> = IndexMap::new();
    for row in rows {
        *counts.entry(row.data.as_str()).or_insert(0) += 1;
    }

    let min = counts.values().copied().min().unwrap_or(0);
    let max = counts.values().copied().max().unwrap_or(0);
    let range = (max - min) as f64;
    let label_count = counts.len();

    let mut rng = XorShift64Star::new(opts.seed);
    counts
        .into_iter()
        .enumerate()
        .map(|(i, (label, count))| {
            let normalized = if range > 0.0 {
                (count - min) as f64 / range
            } else {
                0.0
            };
            let stats = LabelStats {
                count,
                normalized,
                angle: (i as f64) * TAU / (label_count as f64),
                noise: rng.next_normal(0.0, opts.noise_std_dev),
            };
            (label.to_string(), stats)
        })
        .collect()
}

/// Broadcasts label statistics back to the rows; `mirrored` rows are reflected through the
/// origin.
pub fn project(rows: &[RadarRow], stats: &IndexMap<String, LabelStats>) -> Vec<RadarPoint> {
    rows.iter()
        .map(|row| {
            let Some(label) = stats.get(row.data.as_str()) else {
                debug_assert!(false, "row label missing from aggregate: {}", row.data);
                return RadarPoint {
                    x: 0.0,
                    y: 0.0,
                    size: 0,
                };
            };
            let (mut x, mut y) = label.position();
            if row.node_type.is_mirrored() {
                x = -x;
                y = -y;
            }
            RadarPoint {
                x,
                y,
                size: label.count,
            }
        })
        .collect()
}

pub fn compute(rows: &[RadarRow], opts: &RadarOptions) -> Vec<RadarPoint> {
    let stats = aggregate(rows, opts);
    project(rows, &stats)
}
