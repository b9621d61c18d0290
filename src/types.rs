use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of a public suffix rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    /// Plain rule: "co.uk" makes "co.uk" a public suffix
    Normal,
    /// Wildcard rule: "*.ck" makes every "<label>.ck" a public suffix
    Wildcard,
    /// Exception rule: "!www.ck" makes "www.ck" registrable despite "*.ck"
    Exception,
}

/// Section of the public suffix list a rule belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    /// Suffixes delegated by registries (ICANN section)
    Icann,
    /// Suffixes submitted by private operators (PRIVATE section)
    Private,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Section::Icann => f.write_str("ICANN"),
            Section::Private => f.write_str("PRIVATE"),
        }
    }
}

/// Parsed public suffix rule before compilation into a [`RuleStore`](crate::RuleStore).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    /// Normalized labels, left to right, without the `*.` or `!` marker
    pub labels: Vec<String>,
    /// Rule kind
    pub kind: RuleKind,
    /// List section
    pub section: Section,
    /// Line number in the original text (for error reporting)
    pub line_num: usize,
}

impl Rule {
    /// Create a rule in the ICANN section
    pub fn new(labels: Vec<String>, kind: RuleKind) -> Self {
        Self {
            labels,
            kind,
            section: Section::Icann,
            line_num: 0,
        }
    }

    /// Labels joined back into a dotted suffix, without the marker
    pub fn suffix(&self) -> String {
        self.labels.join(".")
    }
}

/// Result of resolving a host against a suffix source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedDomain {
    /// Host as given by the caller
    pub input: String,
    /// Normalized ASCII host (empty when resolution never started)
    pub host: String,
    /// Public suffix, e.g. "co.uk"
    pub public_suffix: Option<String>,
    /// Public suffix plus one label, e.g. "example.co.uk"
    pub registrable_domain: Option<String>,
    /// Labels left of the registrable domain, e.g. "www"
    pub sub_domain: Option<String>,
    /// Section of the rule that decided the suffix
    pub section: Option<Section>,
    /// Whether an explicit rule (rather than the fallback) decided the suffix
    pub is_known: bool,
}

impl ResolvedDomain {
    /// A result with no suffix information.
    pub fn unresolved(input: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            host: host.into(),
            ..Self::default()
        }
    }

    /// Split `labels` at a suffix of `suffix_len` labels.
    pub(crate) fn from_labels(
        input: &str,
        labels: &[String],
        suffix_len: usize,
        section: Option<Section>,
        is_known: bool,
    ) -> Self {
        let host = labels.join(".");
        let total = labels.len();
        if suffix_len == 0 || suffix_len > total {
            return Self::unresolved(input, host);
        }

        let suffix_start = total - suffix_len;
        let public_suffix = Some(labels[suffix_start..].join("."));
        let (registrable_domain, sub_domain) = if suffix_start == 0 {
            (None, None)
        } else {
            let registrable = labels[suffix_start - 1..].join(".");
            let sub = (suffix_start > 1).then(|| labels[..suffix_start - 1].join("."));
            (Some(registrable), sub)
        };

        Self {
            input: input.to_string(),
            host,
            public_suffix,
            registrable_domain,
            sub_domain,
            section,
            is_known,
        }
    }

    /// Whether a public suffix was found
    pub fn is_resolved(&self) -> bool {
        self.public_suffix.is_some()
    }

    /// Whether the suffix came from the ICANN section
    pub fn is_icann(&self) -> bool {
        self.section == Some(Section::Icann)
    }

    /// Whether the suffix came from the PRIVATE section
    pub fn is_private(&self) -> bool {
        self.section == Some(Section::Private)
    }

    /// Convert host, suffix and domain fields to their Unicode form.
    ///
    /// Labels that fail to decode are kept in their ASCII form.
    pub fn to_unicode(&self) -> Self {
        fn decode(value: &str) -> String {
            let (unicode, result) = idna::domain_to_unicode(value);
            if result.is_ok() {
                unicode
            } else {
                value.to_string()
            }
        }

        Self {
            input: self.input.clone(),
            host: decode(&self.host),
            public_suffix: self.public_suffix.as_deref().map(decode),
            registrable_domain: self.registrable_domain.as_deref().map(decode),
            sub_domain: self.sub_domain.as_deref().map(decode),
            section: self.section,
            is_known: self.is_known,
        }
    }
}
