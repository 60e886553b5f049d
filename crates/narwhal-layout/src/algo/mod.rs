pub mod circular;
pub mod kamada_kawai;
pub mod random;
pub mod spectral;
pub mod spiral;
pub mod spring;

use indexmap::IndexMap;
use narwhal_graphlib::Graph;

use crate::error::{Error, Result};
use crate::result::{LayoutResult, Point};

/// Seed used by the randomized algorithms unless the caller overrides it.
pub const DEFAULT_SEED: u64 = 42;

#[derive(Debug, Clone)]
pub enum Algorithm {
    /// Fruchterman-Reingold force-directed placement.
    Spring(SpringOptions),
    /// Nodes evenly spaced on a circle.
    Circular,
    /// Uniform random placement in the unit square.
    Random(RandomOptions),
    /// Nodes on concentric circles.
    Shell(ShellOptions),
    /// Stress minimisation over graph-theoretic distances.
    KamadaKawai(KamadaKawaiOptions),
    /// Eigenvectors of the graph Laplacian.
    Spectral,
    /// Nodes along an Archimedean spiral.
    Spiral(SpiralOptions),
}

impl Algorithm {
    pub const NAMES: [&'static str; 7] = [
        "spring",
        "circular",
        "random",
        "shell",
        "kamada_kawai",
        "spectral",
        "spiral",
    ];

    /// Resolves an algorithm by its exact name.
    ///
    /// `k` only affects `spring`; `seed` only affects `spring` and `random`.
    pub fn from_name(name: &str, k: Option<f64>, seed: u64) -> Result<Self> {
        let algorithm = match name {
            "spring" => Self::Spring(SpringOptions {
                k,
                random_seed: seed,
                ..Default::default()
            }),
            "circular" => Self::Circular,
            "random" => Self::Random(RandomOptions { random_seed: seed }),
            "shell" => Self::Shell(ShellOptions::default()),
            "kamada_kawai" => Self::KamadaKawai(KamadaKawaiOptions::default()),
            "spectral" => Self::Spectral,
            "spiral" => Self::Spiral(SpiralOptions::default()),
            _ => {
                return Err(Error::UnknownAlgorithm {
                    name: name.to_string(),
                    expected: Self::NAMES.join(", "),
                });
            }
        };
        Ok(algorithm)
    }

    /// The spring constant this algorithm was configured with; `None` for every algorithm that
    /// ignores it.
    pub fn spring_constant(&self) -> Option<f64> {
        match self {
            Self::Spring(opts) => opts.k,
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Spring(_) => "spring",
            Self::Circular => "circular",
            Self::Random(_) => "random",
            Self::Shell(_) => "shell",
            Self::KamadaKawai(_) => "kamada_kawai",
            Self::Spectral => "spectral",
            Self::Spiral(_) => "spiral",
        }
    }
}

#[derive(Debug, Clone)]
pub struct SpringOptions {
    /// Optimal node distance. `None` (or a non-positive value) means `sqrt(1 / n)`.
    pub k: Option<f64>,
    pub iterations: usize,
    /// Stop early once the mean displacement per node drops below this value.
    pub threshold: f64,
    pub random_seed: u64,
}

impl Default for SpringOptions {
    fn default() -> Self {
        Self {
            k: None,
            iterations: 50,
            threshold: 1e-4,
            random_seed: DEFAULT_SEED,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RandomOptions {
    pub random_seed: u64,
}

impl Default for RandomOptions {
    fn default() -> Self {
        Self {
            random_seed: DEFAULT_SEED,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ShellOptions {
    /// Node ids per shell, innermost first. `None` puts every node on a single shell.
    /// Graph nodes not listed in any shell are left unplaced.
    pub shells: Option<Vec<Vec<String>>>,
    /// Angular offset added per shell. Defaults to `pi / shell_count`.
    pub rotate: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct KamadaKawaiOptions {
    pub max_iterations: usize,
    /// Convergence threshold on the gradient norm.
    pub tolerance: f64,
}

impl Default for KamadaKawaiOptions {
    fn default() -> Self {
        Self {
            max_iterations: 1000,
            tolerance: 1e-6,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SpiralOptions {
    /// Angle increment between consecutive nodes (non-equidistant mode).
    pub resolution: f64,
    /// Place nodes at (roughly) equal arc length instead of equal angle.
    pub equidistant: bool,
}

impl Default for SpiralOptions {
    fn default() -> Self {
        Self {
            resolution: 0.35,
            equidistant: false,
        }
    }
}

/// Centers `pos` on its mean and scales it so the largest absolute coordinate equals `scale`.
pub fn rescale_layout(pos: &mut [(f64, f64)], scale: f64) {
    if pos.is_empty() {
        return;
    }
    let n = pos.len() as f64;
    let mean_x = pos.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = pos.iter().map(|p| p.1).sum::<f64>() / n;

    let mut lim: f64 = 0.0;
    for p in pos.iter_mut() {
        p.0 -= mean_x;
        p.1 -= mean_y;
        lim = lim.max(p.0.abs()).max(p.1.abs());
    }
    if lim > 0.0 {
        let factor = scale / lim;
        for p in pos.iter_mut() {
            p.0 *= factor;
            p.1 *= factor;
        }
    }
}

/// Pairs index-ordered coordinates back up with node ids.
pub(crate) fn collect_positions(graph: &Graph, coords: &[(f64, f64)]) -> LayoutResult {
    debug_assert_eq!(graph.node_count(), coords.len());
    let mut positions: IndexMap<String, Point> = IndexMap::with_capacity(coords.len());
    for (id, &(x, y)) in graph.nodes().zip(coords) {
        positions.insert(id.to_string(), Point::new(x, y));
    }
    LayoutResult { positions }
}
