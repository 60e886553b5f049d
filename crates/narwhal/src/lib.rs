#![forbid(unsafe_code)]

//! `narwhal` computes 2-D coordinates for the rows of a relationship table, one scalar per row,
//! for a visualization layer that asks for one dimension at a time.
//!
//! Two disciplines are supported:
//! - graph: nodes are placed by a named layout algorithm over the `original` edges; `mirrored`
//!   rows read the opposite endpoint
//! - radar: each category label gets an angle and an amplitude from its frequency; `mirrored`
//!   rows are reflected through the origin
//!
//! Results are deterministic for identical ordered input and are memoised in a
//! content-addressed cache (see [`cache`]).

pub mod cache;
pub mod config;
pub mod edges;
pub mod engine;
pub mod error;
pub mod projector;
pub mod radar;
pub mod request;

pub use cache::{CacheEntry, CacheKey, DiskCache, MemoryCache, NoCache, ResultCache};
pub use config::EngineConfig;
pub use edges::{EdgeRow, EmptyOrInvalidInput, Role};
pub use engine::Engine;
pub use error::{Error, Result};
pub use projector::{CoordinateBundle, Dimension, WeightPolicy};
pub use radar::{RadarDimension, RadarOptions, RadarPoint, RadarRow};
pub use request::{GraphRequest, Param, RadarRequest};
