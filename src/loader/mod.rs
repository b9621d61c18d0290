//! Rule list loaders.
//!
//! A [`RuleLoader`] produces compiled lists; [`LazyRuleStore`] wraps one and
//! builds each list exactly once, on first use.

#[cfg(feature = "download")]
mod auto;
mod format;

#[cfg(feature = "download")]
pub use auto::{AutoRuleLoader, DEFAULT_UPDATE_INTERVAL};
pub use format::ListFormat;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::error::{LoadErrorKind, Result, TldError};
use crate::store::{RuleStore, TopLevelDomains};

/// Trait for loading suffix lists
pub trait RuleLoader: Send + Sync {
    /// Load and compile the public suffix rules
    fn load_rules(&self) -> Result<RuleStore>;

    /// Load the IANA root zone TLD list
    fn load_tlds(&self) -> Result<TopLevelDomains>;
}

/// File-based RuleLoader
#[derive(Debug, Clone, Default)]
pub struct FileRuleLoader {
    rules_path: Option<PathBuf>,
    tlds_path: Option<PathBuf>,
}

impl FileRuleLoader {
    /// Create a new FileRuleLoader
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the public suffix list path
    pub fn with_rules_path(mut self, path: impl AsRef<Path>) -> Self {
        self.rules_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the TLD list path
    pub fn with_tlds_path(mut self, path: impl AsRef<Path>) -> Self {
        self.tlds_path = Some(path.as_ref().to_path_buf());
        self
    }
}

impl RuleLoader for FileRuleLoader {
    fn load_rules(&self) -> Result<RuleStore> {
        let path = self.rules_path.as_ref().ok_or_else(|| {
            TldError::load(LoadErrorKind::NotConfigured, "rules path not configured")
        })?;
        log::info!("loading public suffix rules from {}", path.display());
        RuleStore::from_text(&read_list(path)?)
    }

    fn load_tlds(&self) -> Result<TopLevelDomains> {
        let path = self.tlds_path.as_ref().ok_or_else(|| {
            TldError::load(LoadErrorKind::NotConfigured, "TLD list path not configured")
        })?;
        log::info!("loading top level domains from {}", path.display());
        TopLevelDomains::from_text(&read_list(path)?)
    }
}

/// Nil RuleLoader: every load fails
pub struct NilRuleLoader;

impl RuleLoader for NilRuleLoader {
    fn load_rules(&self) -> Result<RuleStore> {
        Err(TldError::load(
            LoadErrorKind::NotConfigured,
            "public suffix rules not available",
        ))
    }

    fn load_tlds(&self) -> Result<TopLevelDomains> {
        Err(TldError::load(
            LoadErrorKind::NotConfigured,
            "top level domains not available",
        ))
    }
}

/// In-memory RuleLoader for testing and embedded lists
#[derive(Debug, Clone, Default)]
pub struct MemoryRuleLoader {
    rules: String,
    tlds: String,
}

impl MemoryRuleLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rules(mut self, text: impl Into<String>) -> Self {
        self.rules = text.into();
        self
    }

    pub fn with_tlds(mut self, text: impl Into<String>) -> Self {
        self.tlds = text.into();
        self
    }
}

impl RuleLoader for MemoryRuleLoader {
    fn load_rules(&self) -> Result<RuleStore> {
        RuleStore::from_text(&self.rules)
    }

    fn load_tlds(&self) -> Result<TopLevelDomains> {
        TopLevelDomains::from_text(&self.tlds)
    }
}

/// Lists built once on first use and shared by reference afterwards.
///
/// A failed load is returned to the caller and retried on the next call.
pub struct LazyRuleStore {
    loader: Box<dyn RuleLoader>,
    rules: OnceCell<Arc<RuleStore>>,
    tlds: OnceCell<Arc<TopLevelDomains>>,
}

impl LazyRuleStore {
    pub fn new(loader: impl RuleLoader + 'static) -> Self {
        Self {
            loader: Box::new(loader),
            rules: OnceCell::new(),
            tlds: OnceCell::new(),
        }
    }

    /// The compiled public suffix rules
    pub fn rules(&self) -> Result<Arc<RuleStore>> {
        self.rules
            .get_or_try_init(|| {
                let store = self.loader.load_rules()?;
                log::info!("public suffix rules ready ({} rules)", store.len());
                Ok(Arc::new(store))
            })
            .cloned()
    }

    /// The IANA root zone TLD list
    pub fn tlds(&self) -> Result<Arc<TopLevelDomains>> {
        self.tlds
            .get_or_try_init(|| {
                let tlds = self.loader.load_tlds()?;
                log::info!(
                    "top level domains ready ({} entries, version {})",
                    tlds.len(),
                    tlds.version().unwrap_or("unknown")
                );
                Ok(Arc::new(tlds))
            })
            .cloned()
    }

    /// Whether the rule store has been built
    pub fn is_loaded(&self) -> bool {
        self.rules.get().is_some()
    }
}

fn read_list(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        TldError::load(
            LoadErrorKind::FileError,
            format!("Failed to read '{}': {}", path.display(), e),
        )
    })
}
