use std::collections::BTreeSet;
use std::path::Path;

use crate::error::Result;
use crate::parser::{parse_tld_list, parse_tld_list_from_file};

/// IANA root zone top level domains
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopLevelDomains {
    /// Normalized (lower-case, punycode) TLDs
    tlds: BTreeSet<String>,
    version: Option<String>,
    last_updated: Option<String>,
}

impl TopLevelDomains {
    /// Create from already normalized TLDs
    pub fn new(
        tlds: BTreeSet<String>,
        version: Option<String>,
        last_updated: Option<String>,
    ) -> Self {
        Self {
            tlds,
            version,
            last_updated,
        }
    }

    /// Parse the IANA `tlds-alpha-by-domain.txt` format
    pub fn from_text(text: &str) -> Result<Self> {
        parse_tld_list(text)
    }

    /// Parse the IANA `tlds-alpha-by-domain.txt` format from a file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        parse_tld_list_from_file(path)
    }

    /// Check whether `tld` is listed. Expects a normalized label.
    pub fn contains(&self, tld: &str) -> bool {
        self.tlds.contains(tld)
    }

    /// List version from the header line, e.g. "2024011200"
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Last update timestamp from the header line
    pub fn last_updated(&self) -> Option<&str> {
        self.last_updated.as_deref()
    }

    pub fn len(&self) -> usize {
        self.tlds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tlds.is_empty()
    }

    /// Iterate TLDs in sorted order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tlds.iter().map(String::as_str)
    }
}
