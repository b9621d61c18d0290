//! Compiled suffix sources.
//!
//! - [`RuleStore`]: reverse-label trie over public suffix rules
//! - [`TopLevelDomains`]: IANA root zone TLD set
//!
//! Both are immutable once built and meant to be shared behind an `Arc`.
//!
//! ## Example
//!
//! ```
//! use tld_engine_r::store::RuleStore;
//!
//! let store = RuleStore::from_text("com\nco.uk\n*.ck\n!www.ck").unwrap();
//! assert_eq!(store.len(), 4);
//! ```

mod tld;
mod trie;

pub use tld::TopLevelDomains;
pub use trie::RuleStore;
