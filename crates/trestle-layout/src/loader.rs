//! Per-class layout probing
//!
//! One optional layout file per domain class, named after its simple
//! name: `Customer.layout.xml` is preferred, `Customer.layout.json` is
//! the fallback. Absence is expected, not an error. In production mode
//! every probe result (including "not found") is cached so the
//! filesystem is touched at most once per class; in dynamic-reload mode
//! every lookup re-probes so edited layouts take effect immediately.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use dashmap::DashMap;
use tracing::{debug, trace};

use crate::error::GridError;
use crate::model::Grid;

/// Probing loader of per-class layout descriptors.
pub struct GridLoader {
    resources_root: PathBuf,
    production_mode: bool,
    cache: DashMap<String, Option<Arc<Grid>>>,
}

impl GridLoader {
    /// Probe for layout files under `resources_root`.
    pub fn new(resources_root: impl Into<PathBuf>, production_mode: bool) -> Self {
        Self {
            resources_root: resources_root.into(),
            production_mode,
            cache: DashMap::new(),
        }
    }

    /// The configured resources root.
    pub fn resources_root(&self) -> &Path {
        &self.resources_root
    }

    /// Load the layout of the class with this simple name, if a layout
    /// file exists. A missing file yields `Ok(None)`; a present but
    /// malformed file is an error.
    pub fn load(&self, simple_name: &str) -> Result<Option<Arc<Grid>>, GridError> {
        if self.production_mode {
            if let Some(cached) = self.cache.get(simple_name) {
                return Ok(cached.clone());
            }
        }
        let loaded = self.probe(simple_name)?;
        if self.production_mode {
            self.cache
                .insert(simple_name.to_string(), loaded.clone());
        }
        Ok(loaded)
    }

    /// Drop all cached probe results.
    pub fn invalidate(&self) {
        self.cache.clear();
    }

    fn probe(&self, simple_name: &str) -> Result<Option<Arc<Grid>>, GridError> {
        let xml_path = self
            .resources_root
            .join(format!("{simple_name}.layout.xml"));
        if let Some(content) = read_if_present(&xml_path)? {
            debug!(class = simple_name, path = %xml_path.display(), "layout loaded (xml)");
            return Ok(Some(Arc::new(crate::xml::read_xml(&content)?)));
        }

        let json_path = self
            .resources_root
            .join(format!("{simple_name}.layout.json"));
        if let Some(content) = read_if_present(&json_path)? {
            debug!(class = simple_name, path = %json_path.display(), "layout loaded (json)");
            let grid: Grid = serde_json::from_str(&content)?;
            return Ok(Some(Arc::new(grid)));
        }

        trace!(class = simple_name, "no layout file");
        Ok(None)
    }
}

fn read_if_present(path: &Path) -> Result<Option<String>, GridError> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(GridError::Io {
            path: path.display().to_string(),
            source: e,
        }),
    }
}
