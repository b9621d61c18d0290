//! TLD Engine - A fast public suffix and top-level domain resolution engine for Rust
//!
//! This library resolves host names into their parts using:
//! - Public Suffix List rules (normal, wildcard and exception rules)
//! - ICANN / PRIVATE section awareness
//! - The IANA root zone TLD list
//! - Internationalized labels (UTS-46 / punycode)
//! - LRU caching of resolution results
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use tld_engine_r::{Resolver, RuleStore, SuffixResolver};
//!
//! let rules = "
//! // ===BEGIN ICANN DOMAINS===
//! com
//! co.uk
//! *.ck
//! !www.ck
//! // ===END ICANN DOMAINS===
//! ";
//!
//! // Compile rules once, share the store between resolvers
//! let store = Arc::new(RuleStore::from_text(rules).unwrap());
//! let resolver = SuffixResolver::new(store);
//!
//! let domain = resolver.resolve("www.example.co.uk").unwrap();
//! assert_eq!(domain.public_suffix.as_deref(), Some("co.uk"));
//! assert_eq!(domain.registrable_domain.as_deref(), Some("example.co.uk"));
//! assert_eq!(domain.sub_domain.as_deref(), Some("www"));
//! ```
//!
//! # Rule Syntax
//!
//! One rule per line, in the publicsuffix.org format:
//!
//! | Rule | Example | Meaning |
//! |------|---------|---------|
//! | Normal | `co.uk` | `co.uk` is a public suffix |
//! | Wildcard | `*.ck` | every `<label>.ck` is a public suffix |
//! | Exception | `!www.ck` | `www.ck` is registrable despite `*.ck` |
//! | Comment | `// text` | ignored, except section markers |
//!
//! When no rule matches, the last label is the public suffix.

pub mod error;
pub mod loader;
pub mod matcher;
pub mod parser;
pub mod resolver;
pub mod store;
pub mod tokenizer;
pub mod types;

// Re-export commonly used items
pub use error::{InvalidDomainKind, LoadErrorKind, Result, TldError};
#[cfg(feature = "download")]
pub use loader::{AutoRuleLoader, DEFAULT_UPDATE_INTERVAL};
pub use loader::{
    FileRuleLoader, LazyRuleStore, ListFormat, MemoryRuleLoader, NilRuleLoader, RuleLoader,
};
pub use matcher::{find_suffix, SuffixMatch};
pub use parser::{parse_rules, parse_rules_from_file, parse_tld_list, parse_tld_list_from_file};
pub use resolver::{
    NilResolver, Resolver, ResolverOptions, SuffixResolver, TldResolver, DEFAULT_CACHE_SIZE,
};
pub use store::{RuleStore, TopLevelDomains};
pub use tokenizer::tokenize;
pub use types::{ResolvedDomain, Rule, RuleKind, Section};
