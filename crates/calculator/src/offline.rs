//! Offline asset cache
//!
//! Versioned precache for the app shell. `install` fetches every asset into
//! the current cache, `respond` serves cache-first with a network fallback,
//! and `activate` drops caches left over from older versions.

use crate::core::{CalcError, CalcResult};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, info, warn};

/// Name of the current cache version
pub const CACHE_NAME: &str = "calculator-v1";

/// App shell assets stored on install
pub const PRECACHE_ASSETS: &[&str] = &[
    "./",
    "./index.html",
    "./main.js",
    "./js/calculator.js",
    "./js/ui.js",
    "./styles/index.css",
    "./manifest.json",
    "./icon.svg",
];

/// A fetched asset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    /// Request path
    pub path: String,
    /// MIME type
    pub content_type: String,
    /// Body bytes
    pub body: Vec<u8>,
}

impl Asset {
    /// Creates an asset with a content type guessed from the path
    #[must_use]
    pub fn new(path: &str, body: Vec<u8>) -> Self {
        Self {
            path: path.to_string(),
            content_type: content_type_for(path).to_string(),
            body,
        }
    }

    /// Body as UTF-8 (lossy)
    #[must_use]
    pub fn body_string(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

fn content_type_for(path: &str) -> &'static str {
    match path.rsplit_once('.').map(|(_, ext)| ext) {
        Some("html") => "text/html",
        Some("js") => "application/javascript",
        Some("css") => "text/css",
        Some("json") => "application/json",
        Some("svg") => "image/svg+xml",
        _ if path.ends_with('/') => "text/html",
        _ => "application/octet-stream",
    }
}

/// Network access for the cache
pub trait AssetFetcher {
    /// Fetches an asset from the network
    fn fetch(&mut self, path: &str) -> CalcResult<Asset>;
}

/// Named caches of path -> asset
#[derive(Debug, Default, Clone)]
pub struct CacheStorage {
    caches: BTreeMap<String, HashMap<String, Asset>>,
}

impl CacheStorage {
    /// Creates empty storage
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens (creating if needed) a named cache
    pub fn open(&mut self, name: &str) -> &mut HashMap<String, Asset> {
        self.caches.entry(name.to_string()).or_default()
    }

    /// Looks up a path across every cache
    #[must_use]
    pub fn match_path(&self, path: &str) -> Option<&Asset> {
        self.caches.values().find_map(|cache| cache.get(path))
    }

    /// Cache names in sorted order
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.caches.keys().cloned().collect()
    }

    /// Whether a named cache exists
    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.caches.contains_key(name)
    }

    /// Deletes a named cache. Returns whether it existed.
    pub fn delete(&mut self, name: &str) -> bool {
        self.caches.remove(name).is_some()
    }

    /// Number of entries in a named cache
    #[must_use]
    pub fn entry_count(&self, name: &str) -> usize {
        self.caches.get(name).map_or(0, HashMap::len)
    }
}

/// Offline cache lifecycle over a storage and a fetcher
#[derive(Debug)]
pub struct OfflineCache<F> {
    name: String,
    assets: Vec<String>,
    storage: CacheStorage,
    fetcher: F,
}

impl<F: AssetFetcher> OfflineCache<F> {
    /// Creates a cache for the current version and the default asset list
    #[must_use]
    pub fn new(fetcher: F) -> Self {
        Self::with_storage(fetcher, CacheStorage::new())
    }

    /// Creates a cache over existing storage (e.g. left by an older version)
    #[must_use]
    pub fn with_storage(fetcher: F, storage: CacheStorage) -> Self {
        Self {
            name: CACHE_NAME.to_string(),
            assets: PRECACHE_ASSETS.iter().map(|s| (*s).to_string()).collect(),
            storage,
            fetcher,
        }
    }

    /// Overrides the cache name
    #[must_use]
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// Overrides the precache list
    #[must_use]
    pub fn with_assets(mut self, assets: &[&str]) -> Self {
        self.assets = assets.iter().map(|s| (*s).to_string()).collect();
        self
    }

    /// Current cache name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Underlying storage
    #[must_use]
    pub const fn storage(&self) -> &CacheStorage {
        &self.storage
    }

    /// The fetcher
    #[must_use]
    pub const fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Fetches every precache asset into the current cache.
    ///
    /// All or nothing: if any fetch fails, nothing is stored.
    pub fn install(&mut self) -> CalcResult<usize> {
        let mut fetched = Vec::with_capacity(self.assets.len());
        for path in &self.assets {
            match self.fetcher.fetch(path) {
                Ok(asset) => fetched.push(asset),
                Err(e) => {
                    warn!(cache = %self.name, path = %path, error = %e, "install failed");
                    return Err(e);
                }
            }
        }

        let count = fetched.len();
        let cache = self.storage.open(&self.name);
        for asset in fetched {
            cache.insert(asset.path.clone(), asset);
        }
        info!(cache = %self.name, assets = count, "cache installed");
        Ok(count)
    }

    /// Serves a request from any cache, falling back to the network.
    ///
    /// Network responses are not written back into the cache.
    pub fn respond(&mut self, path: &str) -> CalcResult<Asset> {
        if let Some(asset) = self.storage.match_path(path) {
            debug!(path, "cache hit");
            return Ok(asset.clone());
        }
        debug!(path, "cache miss, fetching");
        self.fetcher.fetch(path)
    }

    /// Deletes every cache not named after the current version.
    /// Returns the deleted names.
    pub fn activate(&mut self) -> Vec<String> {
        let stale: Vec<String> = self
            .storage
            .keys()
            .into_iter()
            .filter(|key| *key != self.name)
            .collect();
        for key in &stale {
            self.storage.delete(key);
            info!(cache = %key, "deleted stale cache");
        }
        stale
    }
}

/// Fetcher over an in-memory map of path -> body
#[derive(Debug, Default, Clone)]
pub struct StaticFetcher {
    files: HashMap<String, Vec<u8>>,
    requests: Vec<String>,
}

impl StaticFetcher {
    /// Creates an empty fetcher
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file
    #[must_use]
    pub fn with_file(mut self, path: &str, body: &str) -> Self {
        self.files.insert(path.to_string(), body.as_bytes().to_vec());
        self
    }

    /// Adds every precache asset with placeholder content
    #[must_use]
    pub fn with_app_shell(mut self) -> Self {
        for path in PRECACHE_ASSETS {
            self.files
                .insert((*path).to_string(), format!("/* {path} */").into_bytes());
        }
        self
    }

    /// Removes a file, simulating it going missing on the server
    pub fn remove(&mut self, path: &str) {
        self.files.remove(path);
    }

    /// Paths requested so far
    #[must_use]
    pub fn requests(&self) -> &[String] {
        &self.requests
    }
}

impl AssetFetcher for StaticFetcher {
    fn fetch(&mut self, path: &str) -> CalcResult<Asset> {
        self.requests.push(path.to_string());
        self.files
            .get(path)
            .map(|body| Asset::new(path, body.clone()))
            .ok_or_else(|| CalcError::AssetNotFound {
                path: path.to_string(),
            })
    }
}
