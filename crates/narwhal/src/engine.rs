//! Entry point: validates a request, consults the cache, runs the right discipline and
//! extracts the requested dimension.

use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};

use narwhal_layout::Algorithm;

use crate::cache::{CacheEntry, CacheKey, DiskCache, NoCache, ResultCache};
use crate::config::EngineConfig;
use crate::edges::{self, EdgeRow};
use crate::error::Result;
use crate::projector::{self, CoordinateBundle, Dimension};
use crate::radar::{self, RadarDimension, RadarOptions, RadarPoint};
use crate::request::{GraphRequest, RadarRequest};

pub struct Engine {
    config: EngineConfig,
    cache: Box<dyn ResultCache>,
    computations: AtomicUsize,
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("config", &self.config)
            .field("computations", &self.computations())
            .finish_non_exhaustive()
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Engine {
    /// Uses a [`DiskCache`] under `config.cache_dir`, or no cache when caching is disabled.
    pub fn new(config: EngineConfig) -> Self {
        let cache: Box<dyn ResultCache> = if config.cache_enabled {
            Box::new(DiskCache::new(config.cache_dir.clone()))
        } else {
            Box::new(NoCache)
        };
        Self {
            config,
            cache,
            computations: AtomicUsize::new(0),
        }
    }

    pub fn with_cache(config: EngineConfig, cache: impl ResultCache + 'static) -> Self {
        Self {
            config,
            cache: Box::new(cache),
            computations: AtomicUsize::new(0),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Number of layout or radar computations actually run (cache hits excluded).
    pub fn computations(&self) -> usize {
        self.computations.load(Ordering::Relaxed)
    }

    /// Graph discipline: one value per input row, `None` throughout for degenerate input.
    pub fn graph_coordinates(&self, request: &GraphRequest) -> Result<Vec<Option<f64>>> {
        let rows = edges::rows_from_columns(
            &request.from_nodes,
            &request.to_nodes,
            &request.roles,
        )?;
        let dimension = Dimension::parse(request.dimension.as_scalar("dimension")?)?;
        let layout = match &request.layout {
            Some(layout) => layout.as_scalar("layout")?.clone(),
            None => self.config.default_layout.clone(),
        };
        let k = match &request.k {
            Some(k) => *k.as_scalar("k")?,
            None => self.config.default_k,
        };

        let bundles = self.graph_bundles(&rows, &layout, k)?;
        Ok(match bundles {
            Some(bundles) => bundles.iter().map(|b| Some(dimension.select(b))).collect(),
            None => vec![None; rows.len()],
        })
    }

    /// Full coordinate bundles for `rows`, or `None` when the input cannot be laid out.
    pub fn graph_bundles(
        &self,
        rows: &[EdgeRow],
        layout: &str,
        k: f64,
    ) -> Result<Option<Vec<CoordinateBundle>>> {
        let algorithm = Algorithm::from_name(layout, Some(k), self.config.layout_seed)?;

        if self.config.dump_input {
            self.dump_input(rows);
        }

        let graph = match edges::build_graph(rows) {
            Ok(graph) => graph,
            Err(reason) => {
                tracing::debug!(rows = rows.len(), %reason, "degenerate graph input");
                return Ok(None);
            }
        };

        let key = CacheKey::for_layout(
            rows,
            layout,
            algorithm.spring_constant(),
            self.config.layout_seed,
            self.config.weight_policy,
        );
        match self.cache.get(&key) {
            Some(CacheEntry::Layout(bundles)) if bundles.len() == rows.len() => {
                tracing::debug!(%key, "layout cache hit");
                return Ok(Some(bundles));
            }
            Some(_) => tracing::warn!(%key, "cache entry does not match request; recomputing"),
            None => tracing::debug!(%key, "layout cache miss"),
        }

        self.computations.fetch_add(1, Ordering::Relaxed);
        let positions = narwhal_layout::layout(&graph, &algorithm)?;
        let bundles = projector::project(&positions, &graph, rows, self.config.weight_policy);
        tracing::debug!(
            algorithm = algorithm.name(),
            nodes = graph.node_count(),
            placed = positions.len(),
            rows = rows.len(),
            "layout computed"
        );

        self.store(&key, CacheEntry::Layout(bundles.clone()));
        Ok(Some(bundles))
    }

    /// Radar discipline: one value per input row.
    pub fn radar_coordinates(&self, request: &RadarRequest) -> Result<Vec<f64>> {
        let rows = radar::rows_from_columns(
            &request.data,
            &request.amplitude,
            &request.thread,
            &request.node_type,
        )?;
        let dimension = RadarDimension::parse(request.dimension.as_scalar("dimension")?)?;

        let points = self.radar_points(&rows, dimension);
        Ok(points.iter().map(|p| dimension.select(p)).collect())
    }

    /// Full radar points for `rows`.
    pub fn radar_points(
        &self,
        rows: &[radar::RadarRow],
        dimension: RadarDimension,
    ) -> Vec<RadarPoint> {
        let opts = RadarOptions {
            seed: self.config.radar_seed,
            noise_std_dev: self.config.radar_noise_std_dev,
        };
        let key = CacheKey::for_radar(rows, dimension, opts.seed, opts.noise_std_dev);
        match self.cache.get(&key) {
            Some(CacheEntry::Radar(points)) if points.len() == rows.len() => {
                tracing::debug!(%key, "radar cache hit");
                return points;
            }
            Some(_) => tracing::warn!(%key, "cache entry does not match request; recomputing"),
            None => tracing::debug!(%key, "radar cache miss"),
        }

        self.computations.fetch_add(1, Ordering::Relaxed);
        let points = radar::compute(rows, &opts);
        tracing::debug!(rows = rows.len(), "radar computed");

        self.store(&key, CacheEntry::Radar(points.clone()));
        points
    }

    fn store(&self, key: &CacheKey, entry: CacheEntry) {
        if let Err(err) = self.cache.put(key, &entry) {
            tracing::warn!(%key, %err, "failed to write cache entry");
        }
    }

    fn dump_input(&self, rows: &[EdgeRow]) {
        let triples: Vec<(Option<&str>, Option<&str>, &str)> = rows
            .iter()
            .map(|r| (r.from.as_deref(), r.to.as_deref(), r.role.as_str()))
            .collect();
        let path = self.config.cache_dir.join("input.json");
        let written = serde_json::to_vec_pretty(&triples)
            .map_err(std::io::Error::other)
            .and_then(|bytes| {
                fs::create_dir_all(&self.config.cache_dir)?;
                fs::write(&path, bytes)
            });
        if let Err(err) = written {
            tracing::warn!(path = %path.display(), %err, "failed to dump graph input");
        }
    }
}
