//! Resolution facade.
//!
//! [`Resolver`] is the capability handed to consumers. Implementations:
//! - [`SuffixResolver`]: public suffix list rules, with an LRU result cache
//! - [`TldResolver`]: IANA root zone list
//! - [`NilResolver`]: validates input, never resolves

use std::num::NonZeroUsize;
use std::sync::Arc;

use lru::LruCache;
use parking_lot::Mutex;

use crate::error::{Result, TldError};
use crate::loader::LazyRuleStore;
use crate::matcher::find_suffix;
use crate::store::{RuleStore, TopLevelDomains};
use crate::tokenizer::tokenize;
use crate::types::{ResolvedDomain, Section};

/// Default LRU cache size
pub const DEFAULT_CACHE_SIZE: usize = 1024;

/// Domain resolver interface.
pub trait Resolver: Send + Sync {
    /// Resolve `host` into its public suffix, registrable domain and sub domain.
    ///
    /// Fails only for malformed input. A host without a resolvable suffix
    /// yields a result with absent fields.
    fn resolve(&self, host: &str) -> Result<ResolvedDomain>;
}

/// Resolver builder options.
#[derive(Debug, Clone)]
pub struct ResolverOptions {
    /// LRU cache size for resolution results (0 disables caching)
    pub cache_size: usize,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            cache_size: DEFAULT_CACHE_SIZE,
        }
    }
}

impl ResolverOptions {
    /// Create new resolver options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set cache size.
    pub fn with_cache_size(mut self, size: usize) -> Self {
        self.cache_size = size;
        self
    }
}

/// Where a resolver gets its compiled list from.
enum Source<T> {
    Ready(Arc<T>),
    Lazy(Arc<LazyRuleStore>),
}

/// Public suffix list resolver.
///
/// Holds a shared handle to an immutable [`RuleStore`]; any number of
/// resolvers can share one store.
pub struct SuffixResolver {
    rules: Source<RuleStore>,
    cache: Option<Mutex<LruCache<String, ResolvedDomain>>>,
}

impl SuffixResolver {
    /// Create a resolver over a compiled rule store.
    pub fn new(store: Arc<RuleStore>) -> Self {
        Self::with_options(store, ResolverOptions::default())
    }

    /// Create a resolver over a compiled rule store with options.
    pub fn with_options(store: Arc<RuleStore>, options: ResolverOptions) -> Self {
        Self {
            rules: Source::Ready(store),
            cache: new_cache(options.cache_size),
        }
    }

    /// Create a resolver that builds its rule store on first use.
    pub fn lazy(rules: Arc<LazyRuleStore>, options: ResolverOptions) -> Self {
        Self {
            rules: Source::Lazy(rules),
            cache: new_cache(options.cache_size),
        }
    }

    /// The rule store, loading it first if needed.
    pub fn rules(&self) -> Result<Arc<RuleStore>> {
        match &self.rules {
            Source::Ready(store) => Ok(store.clone()),
            Source::Lazy(lazy) => lazy.rules(),
        }
    }

    /// Resolve against ICANN rules only.
    ///
    /// Fails with `UnresolvableDomain` when no ICANN rule matches or when the
    /// host is itself a public suffix.
    pub fn resolve_icann(&self, host: &str) -> Result<ResolvedDomain> {
        self.resolve_section(host, Section::Icann)
    }

    /// Resolve against PRIVATE rules only.
    ///
    /// Fails with `UnresolvableDomain` when no PRIVATE rule matches or when
    /// the host is itself a public suffix.
    pub fn resolve_private(&self, host: &str) -> Result<ResolvedDomain> {
        self.resolve_section(host, Section::Private)
    }

    fn resolve_section(&self, host: &str, section: Section) -> Result<ResolvedDomain> {
        let labels = tokenize(host)?;
        let unresolvable = |message: String| TldError::UnresolvableDomain {
            host: host.to_string(),
            message,
        };

        if labels.len() < 2 {
            return Err(unresolvable("host has a single label".to_string()));
        }

        let store = self.rules()?;
        let m = find_suffix(&labels, &store, Some(section))
            .ok_or_else(|| unresolvable(format!("no {section} rule matches")))?;

        if m.len >= labels.len() {
            return Err(unresolvable("host is a public suffix".to_string()));
        }

        Ok(ResolvedDomain::from_labels(
            host,
            &labels,
            m.len,
            m.section,
            m.is_known,
        ))
    }

    fn resolve_uncached(&self, host: &str) -> Result<ResolvedDomain> {
        let labels = tokenize(host)?;
        if labels.len() < 2 {
            return Ok(ResolvedDomain::unresolved(host, labels.join(".")));
        }

        let store = self.rules()?;
        Ok(match find_suffix(&labels, &store, None) {
            Some(m) => ResolvedDomain::from_labels(host, &labels, m.len, m.section, m.is_known),
            None => ResolvedDomain::unresolved(host, labels.join(".")),
        })
    }
}

impl Resolver for SuffixResolver {
    fn resolve(&self, host: &str) -> Result<ResolvedDomain> {
        let Some(cache) = &self.cache else {
            return self.resolve_uncached(host);
        };

        if let Some(hit) = cache.lock().get(host) {
            return Ok(hit.clone());
        }

        let resolved = self.resolve_uncached(host)?;
        cache.lock().put(host.to_string(), resolved.clone());
        Ok(resolved)
    }
}

fn new_cache(size: usize) -> Option<Mutex<LruCache<String, ResolvedDomain>>> {
    NonZeroUsize::new(size).map(|size| Mutex::new(LruCache::new(size)))
}

/// IANA root zone resolver.
///
/// The public suffix is the last label when it is a listed TLD.
pub struct TldResolver {
    tlds: Source<TopLevelDomains>,
}

impl TldResolver {
    /// Create a resolver over a parsed TLD list.
    pub fn new(tlds: Arc<TopLevelDomains>) -> Self {
        Self {
            tlds: Source::Ready(tlds),
        }
    }

    /// Create a resolver that loads its TLD list on first use.
    pub fn lazy(rules: Arc<LazyRuleStore>) -> Self {
        Self {
            tlds: Source::Lazy(rules),
        }
    }

    /// The TLD list, loading it first if needed.
    pub fn tlds(&self) -> Result<Arc<TopLevelDomains>> {
        match &self.tlds {
            Source::Ready(tlds) => Ok(tlds.clone()),
            Source::Lazy(lazy) => lazy.tlds(),
        }
    }
}

impl Resolver for TldResolver {
    fn resolve(&self, host: &str) -> Result<ResolvedDomain> {
        let labels = tokenize(host)?;
        let known = match labels.last() {
            Some(tld) if labels.len() >= 2 => self.tlds()?.contains(tld),
            _ => false,
        };

        if known {
            Ok(ResolvedDomain::from_labels(
                host,
                &labels,
                1,
                Some(Section::Icann),
                true,
            ))
        } else {
            Ok(ResolvedDomain::unresolved(host, labels.join(".")))
        }
    }
}

/// Nil resolver that validates the host and never finds a suffix.
pub struct NilResolver;

impl NilResolver {
    /// Create a new nil resolver.
    pub fn new() -> Self {
        Self
    }
}

impl Default for NilResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Resolver for NilResolver {
    fn resolve(&self, host: &str) -> Result<ResolvedDomain> {
        let labels = tokenize(host)?;
        Ok(ResolvedDomain::unresolved(host, labels.join(".")))
    }
}
