//! Configuration store
//!
//! Loads every `.yml`/`.yaml` file under the configuration root, keyed by its
//! logical path (`production/vpc` for `production/vpc.yml`), and merges
//! inherited defaults into each declared stack.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError};

use stacker_fs::constants::CONFIG_EXTENSIONS;
use stacker_fs::{NormalizedPath, document, key_ancestors};
use walkdir::WalkDir;

use super::{ConfigDocument, StackConfig};
use crate::{Error, Result};

/// Logical key to parsed document.
pub type ConfigMap = BTreeMap<String, ConfigDocument>;

/// A source of merged stack configuration.
pub trait StackConfigSource: Send + Sync {
    /// Every declared stack.
    fn fetch_all(&self) -> Result<Vec<StackConfig>>;

    /// Stacks declared with `name`; there may be several across environments.
    fn fetch(&self, name: &str) -> Result<Vec<StackConfig>>;
}

/// Lazily loaded configuration tree.
///
/// The tree is read on first use and kept for the life of the store.
#[derive(Debug)]
pub struct ConfigStore {
    root: NormalizedPath,
    documents: Mutex<Option<Arc<ConfigMap>>>,
}

impl ConfigStore {
    pub fn new(root: NormalizedPath) -> Self {
        Self {
            root,
            documents: Mutex::new(None),
        }
    }

    pub fn root(&self) -> &NormalizedPath {
        &self.root
    }

    /// The loaded documents, reading the tree on first call.
    pub fn documents(&self) -> Result<Arc<ConfigMap>> {
        let mut guard = self.documents.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(documents) = guard.as_ref() {
            return Ok(Arc::clone(documents));
        }
        let documents = Arc::new(load(&self.root)?);
        *guard = Some(Arc::clone(&documents));
        Ok(documents)
    }

    fn collect<F>(&self, mut filter: F) -> Result<Vec<StackConfig>>
    where
        F: FnMut(&StackConfig) -> bool,
    {
        let documents = self.documents()?;
        let mut stacks: Vec<StackConfig> = documents
            .iter()
            .flat_map(|(key, document)| document.stacks.iter().map(move |stack| (key, stack)))
            .filter(|(_, stack)| filter(stack))
            .map(|(key, stack)| merge(stack.clone(), key, &documents))
            .collect();
        stacks.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(stacks)
    }
}

impl StackConfigSource for ConfigStore {
    fn fetch_all(&self) -> Result<Vec<StackConfig>> {
        self.collect(|_| true)
    }

    fn fetch(&self, name: &str) -> Result<Vec<StackConfig>> {
        self.collect(|stack| stack.name == name)
    }
}

/// Read every configuration document under `root`.
///
/// Stops at the first document that fails to parse.
pub fn load(root: &NormalizedPath) -> Result<ConfigMap> {
    if !root.is_dir() {
        return Err(Error::ConfigRootNotFound {
            path: root.to_native(),
        });
    }

    let native_root = root.to_native();
    let mut documents = ConfigMap::new();
    for entry in WalkDir::new(&native_root).sort_by_file_name() {
        let entry = entry.map_err(|e| Error::ConfigIo {
            path: e
                .path()
                .map(|p| p.to_path_buf())
                .unwrap_or_else(|| native_root.clone()),
            message: e.to_string(),
        })?;
        let path = NormalizedPath::new(entry.path());
        let is_config = path
            .extension()
            .is_some_and(|ext| CONFIG_EXTENSIONS.contains(&ext));
        // Symlinked documents count; the walk itself does not follow links.
        if !is_config || !path.is_file() {
            continue;
        }
        let Some(key) = NormalizedPath::logical_key(&native_root, entry.path()) else {
            continue;
        };

        let mut document: ConfigDocument = document::load(&path).map_err(Error::config)?;
        for stack in &mut document.stacks {
            stack.source = key.clone();
        }
        tracing::debug!(key = %key, path = %path, stacks = document.stacks.len(), "Loaded config document");

        if documents.insert(key.clone(), document).is_some() {
            tracing::warn!(key = %key, "Config document shadows another with the same key");
        }
    }

    tracing::debug!(root = %root, documents = documents.len(), "Loaded config tree");
    Ok(documents)
}

/// Merge inherited defaults into a stack declared at `key`.
///
/// Walks `key` and its ancestors nearest first. A region or parameter is only
/// filled in when still unset, so the stack's own values win, then the
/// nearest ancestor's.
pub fn merge(mut stack: StackConfig, key: &str, documents: &ConfigMap) -> StackConfig {
    if stack.template_name.is_empty() {
        stack.template_name = stack.name.clone();
    }
    let parameters = stack.parameters.get_or_insert_with(BTreeMap::new);

    for ancestor in key_ancestors(key) {
        let Some(document) = documents.get(ancestor) else {
            continue;
        };
        let defaults = &document.defaults;
        if stack.region.is_empty() && !defaults.region.is_empty() {
            stack.region = defaults.region.clone();
        }
        for (name, value) in &defaults.parameters {
            parameters
                .entry(name.clone())
                .or_insert_with(|| value.clone());
        }
    }

    tracing::trace!(stack = %stack.name, key, region = %stack.region, "Merged stack config");
    stack
}
