//! Last-entered placeholder values
//!
//! Values typed in for a template are remembered per template name and
//! offered again the next time that template is generated. The store is a
//! small JSON file; a missing file is an empty store.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::StoreError;
use crate::io::write_atomic;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValueStore {
    #[serde(skip)]
    path: PathBuf,
    #[serde(default)]
    templates: BTreeMap<String, BTreeMap<String, String>>,
}

impl ValueStore {
    /// Load the store at `path`, or start an empty one if it does not exist
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        if !path.exists() {
            debug!("No value store at {}, starting empty", path.display());
            return Ok(Self {
                path,
                templates: BTreeMap::new(),
            });
        }

        let content = std::fs::read_to_string(&path).map_err(|source| StoreError::Read {
            path: path.clone(),
            source,
        })?;
        let mut store: Self =
            serde_json::from_str(&content).map_err(|source| StoreError::Corrupt {
                path: path.clone(),
                source,
            })?;
        store.path = path;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Remembered values for a template, empty if none
    pub fn values_for(&self, template: &str) -> HashMap<String, String> {
        self.templates
            .get(template)
            .map(|values| values.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
            .unwrap_or_default()
    }

    /// Merge `values` into what is remembered for `template`. Blank values
    /// are skipped.
    pub fn remember<'v>(
        &mut self,
        template: &str,
        values: impl IntoIterator<Item = (&'v String, &'v String)>,
    ) {
        let entry = self.templates.entry(template.to_string()).or_default();
        for (name, value) in values {
            if !value.trim().is_empty() {
                entry.insert(name.clone(), value.clone());
            }
        }
    }

    pub fn save(&self) -> Result<(), StoreError> {
        let write_err = |source| StoreError::Write {
            path: self.path.clone(),
            source,
        };
        let bytes = serde_json::to_vec_pretty(self)
            .map_err(|e| write_err(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))?;
        write_atomic(&self.path, &bytes).map_err(write_err)?;
        info!(
            templates = self.templates.len(),
            "Saved value store to {}",
            self.path.display()
        );
        Ok(())
    }
}
