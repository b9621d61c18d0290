//! Reverse-label trie over public suffix rules.
//!
//! Each node is keyed by one label and reached from the TLD inward, so a
//! lookup costs one HashMap probe per host label.

use std::collections::HashMap;
use std::path::Path;

use crate::error::Result;
use crate::parser::{parse_rules, parse_rules_from_file};
use crate::types::{Rule, RuleKind, Section};

/// Trie node. Rule markers are stored with the section of the rule that set them.
#[derive(Debug, Default)]
pub(crate) struct Node {
    children: HashMap<Box<str>, Node>,
    /// A normal rule ends here
    pub(crate) normal: Option<Section>,
    /// A wildcard rule `*.<this node>` exists
    pub(crate) wildcard: Option<Section>,
    /// An exception rule ends here
    pub(crate) exception: Option<Section>,
}

impl Node {
    pub(crate) fn child(&self, label: &str) -> Option<&Node> {
        self.children.get(label)
    }

    fn child_mut(&mut self, label: &str) -> &mut Node {
        self.children.entry(label.into()).or_default()
    }

    fn count(&self) -> usize {
        1 + self.children.values().map(Node::count).sum::<usize>()
    }
}

/// Immutable public suffix rule store
#[derive(Debug, Default)]
pub struct RuleStore {
    root: Node,
    /// Number of distinct rules
    len: usize,
}

impl RuleStore {
    /// Build a store from parsed rules.
    ///
    /// Duplicate rules are ignored; the first occurrence decides the section.
    pub fn new(rules: &[Rule]) -> Self {
        let mut root = Node::default();
        let mut len = 0;

        for rule in rules {
            let mut node = &mut root;
            for label in rule.labels.iter().rev() {
                node = node.child_mut(label);
            }

            let marker = match rule.kind {
                RuleKind::Normal => &mut node.normal,
                RuleKind::Wildcard => &mut node.wildcard,
                RuleKind::Exception => &mut node.exception,
            };
            if marker.is_none() {
                *marker = Some(rule.section);
                len += 1;
            }
        }

        if log::log_enabled!(log::Level::Debug) {
            log::debug!(
                "compiled {} public suffix rules into {} trie nodes",
                len,
                root.count()
            );
        }

        Self { root, len }
    }

    /// Parse and compile rules from text in the publicsuffix.org format.
    pub fn from_text(text: &str) -> Result<Self> {
        Ok(Self::new(&parse_rules(text)?))
    }

    /// Parse and compile rules from a file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(&parse_rules_from_file(path)?))
    }

    pub(crate) fn root(&self) -> &Node {
        &self.root
    }

    /// Number of distinct rules
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the store has no rules
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
