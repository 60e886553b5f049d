//! Content-addressed result cache.
//!
//! Keys are SHA-256 digests over a canonical, versioned encoding of every input that affects a
//! result. Entries are never mutated: once a key has an entry, later writes for that key are
//! dropped, which is safe because equal keys imply equal values.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::edges::EdgeRow;
use crate::error::Result;
use crate::projector::{CoordinateBundle, WeightPolicy};
use crate::radar::{RadarDimension, RadarRow};

/// Bumped whenever the key encoding or the entry format changes; old entries then simply stop
/// being addressed.
const KEY_VERSION: &str = "narwhal-cache-v1";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Lowercase hex digest.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Key for a graph-discipline computation.
    ///
    /// The requested dimension is deliberately absent: the entry holds whole bundles, so every
    /// dimension is served from the same entry. `k` is `None` for algorithms it does not affect.
    pub fn for_layout(
        rows: &[EdgeRow],
        layout: &str,
        k: Option<f64>,
        seed: u64,
        policy: WeightPolicy,
    ) -> Self {
        let mut enc = KeyEncoder::new("layout");
        enc.usize(rows.len());
        for row in rows {
            enc.opt_str(row.from.as_deref());
            enc.opt_str(row.to.as_deref());
            enc.str(row.role.as_str());
        }
        enc.str(layout);
        enc.opt_f64(k);
        enc.u64(seed);
        enc.str(policy.as_str());
        enc.finish()
    }

    /// Key for a radar computation.
    pub fn for_radar(
        rows: &[RadarRow],
        dimension: RadarDimension,
        seed: u64,
        noise_std_dev: f64,
    ) -> Self {
        let mut enc = KeyEncoder::new("radar");
        enc.usize(rows.len());
        for row in rows {
            enc.str(&row.data);
            enc.str(&row.amplitude);
            enc.str(&row.thread);
            enc.str(row.node_type.as_str());
        }
        enc.str(dimension.as_str());
        enc.u64(seed);
        enc.f64(noise_std_dev);
        enc.finish()
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Length-prefixed field encoding, so that no two distinct inputs share a byte stream
/// (`["ab", "c"]` and `["a", "bc"]` differ).
struct KeyEncoder {
    hasher: Sha256,
}

impl KeyEncoder {
    fn new(discipline: &str) -> Self {
        let mut enc = Self {
            hasher: Sha256::new(),
        };
        enc.str(KEY_VERSION);
        enc.str(discipline);
        enc
    }

    fn usize(&mut self, v: usize) {
        self.u64(v as u64);
    }

    fn u64(&mut self, v: u64) {
        self.hasher.update(v.to_le_bytes());
    }

    fn f64(&mut self, v: f64) {
        self.u64(v.to_bits());
    }

    fn opt_f64(&mut self, v: Option<f64>) {
        match v {
            Some(v) => {
                self.hasher.update([1u8]);
                self.f64(v);
            }
            None => self.hasher.update([0u8]),
        }
    }

    fn str(&mut self, s: &str) {
        self.hasher.update([1u8]);
        self.usize(s.len());
        self.hasher.update(s.as_bytes());
    }

    fn opt_str(&mut self, s: Option<&str>) {
        match s {
            Some(s) => self.str(s),
            None => self.hasher.update([0u8]),
        }
    }

    fn finish(self) -> CacheKey {
        CacheKey(hex_lower(&self.hasher.finalize()))
    }
}

fn hex_lower(bytes: &[u8]) -> String {
    const HEX: &[u8; 16] = b"0123456789abcdef";
    let mut out = String::with_capacity(bytes.len() * 2);
    for &b in bytes {
        out.push(HEX[(b >> 4) as usize] as char);
        out.push(HEX[(b & 0x0f) as usize] as char);
    }
    out
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "rows", rename_all = "snake_case")]
pub enum CacheEntry {
    Layout(Vec<CoordinateBundle>),
    Radar(Vec<crate::radar::RadarPoint>),
}

pub trait ResultCache: Send + Sync {
    fn get(&self, key: &CacheKey) -> Option<CacheEntry>;

    /// Stores `entry` unless `key` already has one.
    fn put(&self, key: &CacheKey, entry: &CacheEntry) -> Result<()>;
}

/// Disables caching.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCache;

impl ResultCache for NoCache {
    fn get(&self, _key: &CacheKey) -> Option<CacheEntry> {
        None
    }

    fn put(&self, _key: &CacheKey, _entry: &CacheEntry) -> Result<()> {
        Ok(())
    }
}

/// Process-local cache.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<CacheKey, CacheEntry>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ResultCache for MemoryCache {
    fn get(&self, key: &CacheKey) -> Option<CacheEntry> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn put(&self, key: &CacheKey, entry: &CacheEntry) -> Result<()> {
        if let Ok(mut entries) = self.entries.lock() {
            entries.entry(key.clone()).or_insert_with(|| entry.clone());
        }
        Ok(())
    }
}

/// One JSON file per entry under `root`, surviving process restarts.
#[derive(Debug, Clone)]
pub struct DiskCache {
    root: PathBuf,
}

static TMP_COUNTER: AtomicU64 = AtomicU64::new(0);

impl DiskCache {
    /// The directory is created lazily on the first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn entry_path(&self, key: &CacheKey) -> PathBuf {
        self.root.join(format!("{}.json", key.as_str()))
    }

    fn read_entry(path: &Path) -> std::result::Result<CacheEntry, String> {
        let bytes = fs::read(path).map_err(|err| err.to_string())?;
        serde_json::from_slice(&bytes).map_err(|err| err.to_string())
    }
}

impl ResultCache for DiskCache {
    fn get(&self, key: &CacheKey) -> Option<CacheEntry> {
        let path = self.entry_path(key);
        if !path.exists() {
            return None;
        }
        match Self::read_entry(&path) {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "ignoring unreadable cache entry");
                None
            }
        }
    }

    fn put(&self, key: &CacheKey, entry: &CacheEntry) -> Result<()> {
        let path = self.entry_path(key);
        if Self::read_entry(&path).is_ok() {
            return Ok(());
        }
        fs::create_dir_all(&self.root)?;

        let bytes = serde_json::to_vec_pretty(entry).map_err(std::io::Error::other)?;
        // Unique per process and call, so concurrent writers never share a temp file.
        let tmp_path = self.root.join(format!(
            "{}.{}.{}.tmp",
            key.as_str(),
            std::process::id(),
            TMP_COUNTER.fetch_add(1, Ordering::Relaxed)
        ));
        fs::write(&tmp_path, bytes)?;
        if let Err(err) = fs::rename(&tmp_path, &path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(err.into());
        }
        Ok(())
    }
}
