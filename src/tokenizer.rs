//! Host tokenizer.
//!
//! Splits a host into normalized ASCII labels: lower-cased, IDNA mapped to
//! punycode, checked against DNS length limits.

use std::net::{IpAddr, Ipv6Addr};

use crate::error::{InvalidDomainKind, Result, TldError};

/// Maximum length of a host in ASCII form, without the trailing dot
pub const MAX_HOST_LENGTH: usize = 253;

/// Maximum length of a single label in ASCII form
pub const MAX_LABEL_LENGTH: usize = 63;

/// Split `host` into normalized labels, left to right.
///
/// A single trailing dot is accepted and dropped. IP address literals are
/// rejected since they have no public suffix.
pub fn tokenize(host: &str) -> Result<Vec<String>> {
    if host.is_empty() {
        return Err(TldError::invalid_domain(
            InvalidDomainKind::Empty,
            host,
            "host is empty",
        ));
    }

    let mut ascii = to_ascii(host)
        .map_err(|(kind, message)| TldError::invalid_domain(kind, host, message))?;

    // IDNA maps full stops such as U+3002 to '.', so the root dot is
    // stripped after conversion
    if ascii.ends_with('.') {
        ascii.pop();
    }
    if ascii.is_empty() {
        return Err(TldError::invalid_domain(
            InvalidDomainKind::Empty,
            host,
            "host is the root domain",
        ));
    }

    if is_ip_literal(&ascii) {
        return Err(TldError::invalid_domain(
            InvalidDomainKind::IpAddress,
            host,
            "IP addresses have no public suffix",
        ));
    }

    if ascii.len() > MAX_HOST_LENGTH {
        return Err(TldError::invalid_domain(
            InvalidDomainKind::TooLong,
            host,
            format!("host exceeds {MAX_HOST_LENGTH} octets"),
        ));
    }

    ascii
        .split('.')
        .map(|label| {
            check_label(label)
                .map_err(|(kind, message)| TldError::invalid_domain(kind, host, message))?;
            Ok(label.to_string())
        })
        .collect()
}

/// Normalize a single label the same way [`tokenize`] does.
///
/// Used by the list parsers so that Unicode rules match punycode hosts.
pub(crate) fn normalize_label(
    label: &str,
) -> std::result::Result<String, (InvalidDomainKind, String)> {
    if label.is_empty() {
        return Err((InvalidDomainKind::EmptyLabel, "empty label".to_string()));
    }
    let ascii = to_ascii(label)?;
    if ascii.contains('.') {
        return Err((
            InvalidDomainKind::IllegalCharacter,
            format!("label '{label}' maps to more than one label"),
        ));
    }
    check_label(&ascii)?;
    Ok(ascii)
}

fn is_ip_literal(host: &str) -> bool {
    if host.parse::<IpAddr>().is_ok() {
        return true;
    }
    host.strip_prefix('[')
        .and_then(|h| h.strip_suffix(']'))
        .is_some_and(|inner| inner.parse::<Ipv6Addr>().is_ok())
}

fn to_ascii(value: &str) -> std::result::Result<String, (InvalidDomainKind, String)> {
    if value.is_ascii() {
        return Ok(value.to_ascii_lowercase());
    }
    idna::domain_to_ascii(value)
        .map_err(|e| (InvalidDomainKind::Idna, format!("IDNA conversion failed: {e}")))
}

fn check_label(label: &str) -> std::result::Result<(), (InvalidDomainKind, String)> {
    if label.is_empty() {
        return Err((InvalidDomainKind::EmptyLabel, "empty label".to_string()));
    }
    if label.len() > MAX_LABEL_LENGTH {
        return Err((
            InvalidDomainKind::LabelTooLong,
            format!("label exceeds {MAX_LABEL_LENGTH} octets"),
        ));
    }
    if let Some(c) = label
        .chars()
        .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-' || *c == '_'))
    {
        return Err((
            InvalidDomainKind::IllegalCharacter,
            format!("illegal character {c:?} in label '{label}'"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind_of(host: &str) -> InvalidDomainKind {
        tokenize(host)
            .unwrap_err()
            .invalid_domain_kind()
            .expect("expected InvalidDomain")
    }

    #[test]
    fn test_tokenize_simple() {
        assert_eq!(tokenize("www.example.com").unwrap(), vec!["www", "example", "com"]);
    }

    #[test]
    fn test_tokenize_lowercases() {
        assert_eq!(tokenize("WwW.Example.COM").unwrap(), vec!["www", "example", "com"]);
    }

    #[test]
    fn test_tokenize_trailing_dot() {
        assert_eq!(tokenize("example.com.").unwrap(), vec!["example", "com"]);
    }

    #[test]
    fn test_tokenize_ideographic_trailing_dot() {
        assert_eq!(
            tokenize("食狮.公司.cn。").unwrap(),
            vec!["xn--85x722f", "xn--55qx5d", "cn"]
        );
        assert_eq!(tokenize("食狮.公司.cn。").unwrap(), tokenize("食狮.公司.cn.").unwrap());
        assert_eq!(tokenize("example。com").unwrap(), vec!["example", "com"]);
    }

    #[test]
    fn test_tokenize_single_label() {
        assert_eq!(tokenize("localhost").unwrap(), vec!["localhost"]);
    }

    #[test]
    fn test_tokenize_idn() {
        assert_eq!(
            tokenize("食狮.公司.cn").unwrap(),
            vec!["xn--85x722f", "xn--55qx5d", "cn"]
        );
        // Already punycoded input passes through
        assert_eq!(tokenize("xn--55qx5d.cn").unwrap(), vec!["xn--55qx5d", "cn"]);
    }

    #[test]
    fn test_tokenize_idn_uppercase() {
        assert_eq!(tokenize("MÜNCHEN.de").unwrap(), vec!["xn--mnchen-3ya", "de"]);
    }

    #[test]
    fn test_tokenize_empty() {
        assert_eq!(kind_of(""), InvalidDomainKind::Empty);
        assert_eq!(kind_of("."), InvalidDomainKind::Empty);
    }

    #[test]
    fn test_tokenize_empty_label() {
        assert_eq!(kind_of("a..b"), InvalidDomainKind::EmptyLabel);
        assert_eq!(kind_of(".example.com"), InvalidDomainKind::EmptyLabel);
        assert_eq!(kind_of("example.com.."), InvalidDomainKind::EmptyLabel);
    }

    #[test]
    fn test_tokenize_label_too_long() {
        let label = "a".repeat(64);
        assert_eq!(kind_of(&format!("{label}.com")), InvalidDomainKind::LabelTooLong);

        let ok = "a".repeat(63);
        assert!(tokenize(&format!("{ok}.com")).is_ok());
    }

    #[test]
    fn test_tokenize_host_too_long() {
        // 4 labels of 63 + 3 dots + ".com" = 259 octets
        let label = "a".repeat(63);
        let host = format!("{label}.{label}.{label}.{label}.com");
        assert_eq!(kind_of(&host), InvalidDomainKind::TooLong);
    }

    #[test]
    fn test_tokenize_illegal_character() {
        assert_eq!(kind_of("exa mple.com"), InvalidDomainKind::IllegalCharacter);
        assert_eq!(kind_of("example.com/path"), InvalidDomainKind::IllegalCharacter);
        assert_eq!(kind_of("user@example.com"), InvalidDomainKind::IllegalCharacter);
    }

    #[test]
    fn test_tokenize_allows_underscore_and_hyphen() {
        assert_eq!(
            tokenize("_dmarc.my-site.com").unwrap(),
            vec!["_dmarc", "my-site", "com"]
        );
    }

    #[test]
    fn test_tokenize_ip_literals() {
        assert_eq!(kind_of("192.168.1.1"), InvalidDomainKind::IpAddress);
        assert_eq!(kind_of("::1"), InvalidDomainKind::IpAddress);
        assert_eq!(kind_of("[2001:db8::1]"), InvalidDomainKind::IpAddress);
    }

    #[test]
    fn test_normalize_label() {
        assert_eq!(normalize_label("COM").unwrap(), "com");
        assert_eq!(normalize_label("公司").unwrap(), "xn--55qx5d");
        assert_eq!(normalize_label("").unwrap_err().0, InvalidDomainKind::EmptyLabel);
        assert_eq!(normalize_label("a b").unwrap_err().0, InvalidDomainKind::IllegalCharacter);
    }
}
