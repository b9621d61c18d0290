use std::path::Path;

use crate::error::Result;
use crate::parser::{parse_rules_from_file, parse_tld_list_from_file};

/// Suffix list file format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListFormat {
    /// publicsuffix.org rule list
    PublicSuffix,
    /// IANA root zone TLD list
    RootZone,
}

impl ListFormat {
    /// Get default filename for this format
    pub fn default_filename(&self) -> &'static str {
        match self {
            ListFormat::PublicSuffix => "public_suffix_list.dat",
            ListFormat::RootZone => "tlds-alpha-by-domain.txt",
        }
    }

    /// Get default download URL for this format
    pub fn default_url(&self) -> &'static str {
        match self {
            ListFormat::PublicSuffix => "https://publicsuffix.org/list/public_suffix_list.dat",
            ListFormat::RootZone => "https://data.iana.org/TLD/tlds-alpha-by-domain.txt",
        }
    }

    /// Check that the file at `path` parses in this format
    pub fn verify(&self, path: impl AsRef<Path>) -> Result<()> {
        match self {
            ListFormat::PublicSuffix => parse_rules_from_file(path).map(|_| ()),
            ListFormat::RootZone => parse_tld_list_from_file(path).map(|_| ()),
        }
    }
}
