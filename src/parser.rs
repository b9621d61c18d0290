use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Result, TldError};
use crate::store::TopLevelDomains;
use crate::tokenizer::normalize_label;
use crate::types::{Rule, RuleKind, Section};

/// Header line of the IANA root zone list.
/// Format: `# Version 2024011200, Last Updated Fri Jan 12 07:07:01 2024 UTC`
static TLD_HEADER_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^#\s*Version\s+(\d+),\s*Last\s+Updated\s+(.+?)\s*$")
        .expect("TLD_HEADER_PATTERN: hardcoded regex is invalid")
});

const ICANN_BEGIN: &str = "===BEGIN ICANN DOMAINS===";
const ICANN_END: &str = "===END ICANN DOMAINS===";
const PRIVATE_BEGIN: &str = "===BEGIN PRIVATE DOMAINS===";
const PRIVATE_END: &str = "===END PRIVATE DOMAINS===";

/// Parse public suffix rules from text in the publicsuffix.org format.
///
/// Rules outside the ICANN/PRIVATE section markers are treated as ICANN rules.
pub fn parse_rules(text: &str) -> Result<Vec<Rule>> {
    let mut rules = Vec::new();
    let mut section: Option<Section> = None;

    for (line_num, line) in text.lines().enumerate() {
        let line_num = line_num + 1; // 1-based line numbers
        let line = line.trim();

        if line.is_empty() {
            continue;
        }

        if let Some(comment) = line.strip_prefix("//") {
            section = track_section(comment.trim(), section, line_num)?;
            continue;
        }

        // A rule ends at the first whitespace
        let token = line.split_whitespace().next().unwrap_or(line);
        let rule = parse_single_rule(token, section.unwrap_or(Section::Icann), line_num)?;
        rules.push(rule);
    }

    if let Some(open) = section {
        return Err(TldError::ParseError(format!("unterminated {open} section")));
    }

    if rules.is_empty() {
        return Err(TldError::ParseError(
            "public suffix rule list is empty".to_string(),
        ));
    }

    check_exceptions(&rules)?;
    Ok(rules)
}

/// Parse public suffix rules from a file.
pub fn parse_rules_from_file(path: impl AsRef<Path>) -> Result<Vec<Rule>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| {
        TldError::ParseError(format!(
            "Failed to read rules file '{}': {}",
            path.display(),
            e
        ))
    })?;
    parse_rules(&text)
}

fn track_section(
    comment: &str,
    current: Option<Section>,
    line_num: usize,
) -> Result<Option<Section>> {
    let (opens, marker) = match comment {
        ICANN_BEGIN => (true, Section::Icann),
        ICANN_END => (false, Section::Icann),
        PRIVATE_BEGIN => (true, Section::Private),
        PRIVATE_END => (false, Section::Private),
        _ => return Ok(current),
    };

    match (opens, current) {
        (true, None) => Ok(Some(marker)),
        (false, Some(open)) if open == marker => Ok(None),
        (true, Some(open)) => Err(TldError::ParseErrorAtLine {
            line: line_num,
            message: format!("{marker} section opened inside {open} section"),
        }),
        (false, _) => Err(TldError::ParseErrorAtLine {
            line: line_num,
            message: format!("{marker} section closed but never opened"),
        }),
    }
}

/// Parse a single rule token
fn parse_single_rule(token: &str, section: Section, line_num: usize) -> Result<Rule> {
    let err = |message: String| TldError::ParseErrorAtLine {
        line: line_num,
        message,
    };

    let (kind, body) = if let Some(rest) = token.strip_prefix('!') {
        (RuleKind::Exception, rest)
    } else if token == "*" {
        return Err(err("bare wildcard rule".to_string()));
    } else if let Some(rest) = token.strip_prefix("*.") {
        (RuleKind::Wildcard, rest)
    } else {
        (RuleKind::Normal, token)
    };

    if body.contains('*') {
        return Err(err(format!(
            "wildcard is only allowed as the leftmost label: {token}"
        )));
    }

    let labels = body
        .split('.')
        .map(|label| {
            normalize_label(label).map_err(|(_, message)| err(format!("{message} in rule {token}")))
        })
        .collect::<Result<Vec<_>>>()?;

    if kind == RuleKind::Exception && labels.len() < 2 {
        return Err(err(format!(
            "exception rule needs at least two labels: {token}"
        )));
    }

    Ok(Rule {
        labels,
        kind,
        section,
        line_num,
    })
}

/// Every exception `!a.b.c` needs a wildcard `*.b.c` in the same list.
fn check_exceptions(rules: &[Rule]) -> Result<()> {
    let wildcards: HashSet<&[String]> = rules
        .iter()
        .filter(|r| r.kind == RuleKind::Wildcard)
        .map(|r| r.labels.as_slice())
        .collect();

    for rule in rules.iter().filter(|r| r.kind == RuleKind::Exception) {
        if !wildcards.contains(&rule.labels[1..]) {
            return Err(TldError::ParseErrorAtLine {
                line: rule.line_num,
                message: format!(
                    "exception rule !{} has no matching wildcard rule *.{}",
                    rule.suffix(),
                    rule.labels[1..].join(".")
                ),
            });
        }
    }
    Ok(())
}

/// Parse the IANA root zone TLD list (`tlds-alpha-by-domain.txt`).
pub fn parse_tld_list(text: &str) -> Result<TopLevelDomains> {
    let mut tlds = BTreeSet::new();
    let mut version = None;
    let mut last_updated = None;

    for (line_num, line) in text.lines().enumerate() {
        let line_num = line_num + 1;
        let line = line.trim();

        if line.is_empty() {
            continue;
        }

        if line.starts_with('#') {
            if let Some(captures) = TLD_HEADER_PATTERN.captures(line) {
                version = Some(captures[1].to_string());
                last_updated = Some(captures[2].to_string());
            } else if line.trim_start_matches('#').trim_start().starts_with("Version") {
                return Err(TldError::ParseErrorAtLine {
                    line: line_num,
                    message: format!("Invalid list header: {line}"),
                });
            }
            continue;
        }

        let tld = normalize_label(line).map_err(|(_, message)| TldError::ParseErrorAtLine {
            line: line_num,
            message: format!("Invalid top level domain '{line}': {message}"),
        })?;
        tlds.insert(tld);
    }

    if tlds.is_empty() {
        return Err(TldError::ParseError(
            "top level domain list is empty".to_string(),
        ));
    }

    Ok(TopLevelDomains::new(tlds, version, last_updated))
}

/// Parse the IANA root zone TLD list from a file.
pub fn parse_tld_list_from_file(path: impl AsRef<Path>) -> Result<TopLevelDomains> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| {
        TldError::ParseError(format!(
            "Failed to read TLD list '{}': {}",
            path.display(),
            e
        ))
    })?;
    parse_tld_list(&text)
}
