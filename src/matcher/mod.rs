//! Suffix matching against a [`RuleStore`].
//!
//! The trie is walked from the rightmost label inward. The longest matching
//! rule prevails; a wildcard extends the suffix by one label, and an
//! exception at that depth shortens it back by one label. When nothing
//! matches, the last label alone is the public suffix.

use crate::store::RuleStore;
use crate::types::Section;

/// Public suffix boundary found for a label sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuffixMatch {
    /// Number of rightmost labels forming the public suffix
    pub len: usize,
    /// Section of the prevailing rule (`None` for the fallback)
    pub section: Option<Section>,
    /// Whether an explicit rule prevailed
    pub is_known: bool,
}

impl SuffixMatch {
    fn known(len: usize, section: Section) -> Self {
        Self {
            len,
            section: Some(section),
            is_known: true,
        }
    }

    fn fallback() -> Self {
        Self {
            len: 1,
            section: None,
            is_known: false,
        }
    }

    /// Index of the first suffix label in a sequence of `total` labels.
    pub fn boundary(&self, total: usize) -> usize {
        total.saturating_sub(self.len)
    }
}

/// Find the public suffix of `labels` (left to right, already normalized).
///
/// With a `filter`, only rules from that section are considered and the
/// fallback is disabled, so `None` means no rule of the section matched.
pub fn find_suffix(
    labels: &[String],
    store: &RuleStore,
    filter: Option<Section>,
) -> Option<SuffixMatch> {
    if labels.is_empty() {
        return None;
    }

    let accept = |marker: Option<Section>| marker.filter(|s| filter.map_or(true, |f| f == *s));

    let mut best: Option<SuffixMatch> = None;
    let mut node = store.root();

    for (depth, label) in labels.iter().rev().enumerate() {
        let len = depth + 1;

        // "*.<node>" covers this label whatever it is
        if let Some(section) = accept(node.wildcard) {
            best = Some(SuffixMatch::known(len, section));
        }

        let Some(child) = node.child(label) else {
            break;
        };

        // Exception prevails over every other rule
        if let Some(section) = accept(child.exception) {
            return Some(SuffixMatch::known(len - 1, section));
        }

        if let Some(section) = accept(child.normal) {
            best = Some(SuffixMatch::known(len, section));
        }

        node = child;
    }

    best.or_else(|| filter.is_none().then(SuffixMatch::fallback))
}
