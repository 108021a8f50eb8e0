/*!
 * Directory-scoped stack of configuration layers
 *
 * The stack holds the layers in force at the current point of a walk:
 * the home and root layers at the bottom, then one layer per entered
 * directory that carries a `.clip4llm` file. Every directory is probed at
 * most once per run; the result, found or not, is cached.
 */

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::{EffectiveConfig, Settings};
use crate::error::Result;
use crate::parser::{load_settings, CONFIG_FILE_NAME};

/// Where configuration for a directory comes from
pub trait LayerSource {
    /// Load the configuration that belongs to `dir`, if any
    fn load(&self, dir: &Path) -> Result<Option<Settings>>;
}

/// Reads `<dir>/.clip4llm` from disk
#[derive(Debug, Clone, Copy, Default)]
pub struct FsLayerSource;

impl LayerSource for FsLayerSource {
    fn load(&self, dir: &Path) -> Result<Option<Settings>> {
        load_settings(&dir.join(CONFIG_FILE_NAME))
    }
}

/// One active layer and the directory it was loaded from
#[derive(Debug, Clone)]
struct ConfigLayer {
    directory: PathBuf,
    settings: Arc<Settings>,
}

/// What the stack knows about a directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeState {
    /// Never looked at during this run
    Unprobed,
    /// Looked at, nothing usable found
    Absent,
    /// Parsed and cached
    Present,
}

/// Stack of configuration layers for one walk
pub struct ConfigStack<S: LayerSource = FsLayerSource> {
    source: S,
    layers: Vec<ConfigLayer>,
    /// Number of layers loaded at construction; never popped
    base_len: usize,
    cache: HashMap<PathBuf, Option<Arc<Settings>>>,
    root_dir: PathBuf,
    home_dir: Option<PathBuf>,
}

impl ConfigStack<FsLayerSource> {
    /// Create a stack for `root_dir` with the invoking user's home layer.
    ///
    /// Failing to resolve the home directory only drops the home layer.
    pub fn for_current_user(root_dir: impl Into<PathBuf>) -> Self {
        let home_dir = match dirs::home_dir() {
            Some(home) => Some(home.canonicalize().unwrap_or(home)),
            None => {
                log::debug!("Could not determine home directory; skipping home config");
                None
            }
        };
        Self::new(root_dir, home_dir)
    }

    /// Create a stack reading configuration files from disk
    pub fn new(root_dir: impl Into<PathBuf>, home_dir: Option<PathBuf>) -> Self {
        Self::with_source(root_dir, home_dir, FsLayerSource)
    }
}

impl<S: LayerSource> ConfigStack<S> {
    /// Create a stack and load its base layers from `source`.
    ///
    /// The home layer goes first; the root layer follows unless the root
    /// is the home directory itself.
    pub fn with_source(root_dir: impl Into<PathBuf>, home_dir: Option<PathBuf>, source: S) -> Self {
        let mut stack = Self {
            source,
            layers: Vec::new(),
            base_len: 0,
            cache: HashMap::new(),
            root_dir: root_dir.into(),
            home_dir,
        };

        if let Some(home) = stack.home_dir.clone() {
            stack.load_base_layer(home);
        }
        if stack.home_dir.as_deref() != Some(stack.root_dir.as_path()) {
            let root = stack.root_dir.clone();
            stack.load_base_layer(root);
        }
        stack.base_len = stack.layers.len();

        stack
    }

    fn load_base_layer(&mut self, dir: PathBuf) {
        if let Some(settings) = self.probe(&dir) {
            log::debug!(
                "Loading config from: {}",
                dir.join(CONFIG_FILE_NAME).display()
            );
            self.layers.push(ConfigLayer {
                directory: dir,
                settings,
            });
        }
    }

    /// Load a directory's settings through the cache
    fn probe(&mut self, dir: &Path) -> Option<Arc<Settings>> {
        if let Some(cached) = self.cache.get(dir) {
            return cached.clone();
        }

        let loaded = match self.source.load(dir) {
            Ok(settings) => settings.map(Arc::new),
            Err(e) => {
                log::info!("Ignoring unreadable config in {}: {}", dir.display(), e);
                None
            }
        };
        self.cache.insert(dir.to_path_buf(), loaded.clone());
        loaded
    }

    /// Push the layer of `dir` if it has one. Returns true if pushed.
    ///
    /// The root and home directories are never pushed here; their layers
    /// were loaded when the stack was built.
    pub fn push_if_exists(&mut self, dir: &Path) -> bool {
        if self.is_base_dir(dir) {
            return false;
        }

        let cached = self.cache.contains_key(dir);
        match self.probe(dir) {
            Some(settings) => {
                log::debug!(
                    "Loading scoped config from{}: {}",
                    if cached { " (cached)" } else { "" },
                    dir.join(CONFIG_FILE_NAME).display()
                );
                self.layers.push(ConfigLayer {
                    directory: dir.to_path_buf(),
                    settings,
                });
                true
            }
            None => false,
        }
    }

    /// Pop the top layer if it belongs to `dir`.
    ///
    /// Anything else is a no-op: the stack neither searches nor reorders,
    /// and base layers stay put.
    pub fn pop(&mut self, dir: &Path) {
        if self.layers.len() <= self.base_len {
            return;
        }
        if self.layers.last().is_some_and(|top| top.directory == dir) {
            self.layers.pop();
            log::debug!("Leaving scoped config from: {}", dir.display());
        }
    }

    /// Fold all active layers, outermost first, onto the defaults
    pub fn effective_config(&self) -> EffectiveConfig {
        let mut effective = EffectiveConfig::default();
        for layer in &self.layers {
            effective.merge(&layer.settings);
        }
        effective
    }

    /// Number of active layers
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Cached knowledge about `dir`
    pub fn probe_state(&self, dir: &Path) -> ProbeState {
        match self.cache.get(dir) {
            None => ProbeState::Unprobed,
            Some(None) => ProbeState::Absent,
            Some(Some(_)) => ProbeState::Present,
        }
    }

    /// Cached settings for `dir`, whether or not the layer is active
    pub fn cached_settings(&self, dir: &Path) -> Option<&Settings> {
        self.cache.get(dir).and_then(|s| s.as_deref())
    }

    fn is_base_dir(&self, dir: &Path) -> bool {
        dir == self.root_dir || self.home_dir.as_deref() == Some(dir)
    }
}
