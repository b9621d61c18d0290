//! Integration tests for SuffixResolver using the publicsuffix.org test cases
//! against the list excerpt in testdata/.

use std::path::PathBuf;
use std::sync::Arc;

use tld_engine_r::{
    InvalidDomainKind, Resolver, ResolverOptions, RuleStore, Section, SuffixResolver, TldError,
};

fn testdata_path(filename: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("testdata");
    path.push(filename);
    path
}

fn resolver() -> SuffixResolver {
    let store = RuleStore::from_file(testdata_path("public_suffix_list.dat"))
        .expect("testdata list should parse");
    SuffixResolver::new(Arc::new(store))
}

/// Registrable domain in Unicode form, as the upstream test cases expect it.
fn registrable(resolver: &SuffixResolver, host: &str) -> Option<String> {
    resolver
        .resolve(host)
        .unwrap_or_else(|e| panic!("{host} should resolve: {e}"))
        .to_unicode()
        .registrable_domain
}

fn check(resolver: &SuffixResolver, cases: &[(&str, Option<&str>)]) {
    for (host, expected) in cases {
        assert_eq!(
            registrable(resolver, host).as_deref(),
            *expected,
            "registrable domain of {host}"
        );
    }
}

#[test]
fn test_mixed_case() {
    check(
        &resolver(),
        &[
            ("COM", None),
            ("example.COM", Some("example.com")),
            ("WwW.example.COM", Some("example.com")),
        ],
    );
}

#[test]
fn test_unlisted_tld() {
    check(
        &resolver(),
        &[
            ("example", None),
            ("example.example", Some("example.example")),
            ("b.example.example", Some("example.example")),
            ("a.b.example.example", Some("example.example")),
        ],
    );
}

#[test]
fn test_tld_with_one_rule() {
    check(
        &resolver(),
        &[
            ("biz", None),
            ("domain.biz", Some("domain.biz")),
            ("b.domain.biz", Some("domain.biz")),
            ("a.b.domain.biz", Some("domain.biz")),
        ],
    );
}

#[test]
fn test_tld_with_two_level_rules() {
    check(
        &resolver(),
        &[
            ("com", None),
            ("example.com", Some("example.com")),
            ("b.example.com", Some("example.com")),
            ("a.b.example.com", Some("example.com")),
            ("uk.com", None),
            ("example.uk.com", Some("example.uk.com")),
            ("b.example.uk.com", Some("example.uk.com")),
            ("a.b.example.uk.com", Some("example.uk.com")),
            ("test.ac", Some("test.ac")),
        ],
    );
}

#[test]
fn test_tld_with_only_wildcard_rule() {
    check(
        &resolver(),
        &[
            ("mm", None),
            ("c.mm", None),
            ("b.c.mm", Some("b.c.mm")),
            ("a.b.c.mm", Some("b.c.mm")),
        ],
    );
}

#[test]
fn test_complex_tld() {
    check(
        &resolver(),
        &[
            ("jp", None),
            ("test.jp", Some("test.jp")),
            ("www.test.jp", Some("test.jp")),
            ("ac.jp", None),
            ("test.ac.jp", Some("test.ac.jp")),
            ("www.test.ac.jp", Some("test.ac.jp")),
            ("kyoto.jp", None),
            ("test.kyoto.jp", Some("test.kyoto.jp")),
            ("ide.kyoto.jp", None),
            ("b.ide.kyoto.jp", Some("b.ide.kyoto.jp")),
            ("a.b.ide.kyoto.jp", Some("b.ide.kyoto.jp")),
            ("c.kobe.jp", None),
            ("b.c.kobe.jp", Some("b.c.kobe.jp")),
            ("a.b.c.kobe.jp", Some("b.c.kobe.jp")),
            ("city.kobe.jp", Some("city.kobe.jp")),
            ("www.city.kobe.jp", Some("city.kobe.jp")),
        ],
    );
}

#[test]
fn test_wildcard_with_exceptions() {
    check(
        &resolver(),
        &[
            ("ck", None),
            ("test.ck", None),
            ("b.test.ck", Some("b.test.ck")),
            ("a.b.test.ck", Some("b.test.ck")),
            ("www.ck", Some("www.ck")),
            ("www.www.ck", Some("www.ck")),
        ],
    );
}

#[test]
fn test_us_k12() {
    check(
        &resolver(),
        &[
            ("us", None),
            ("test.us", Some("test.us")),
            ("www.test.us", Some("test.us")),
            ("ak.us", None),
            ("test.ak.us", Some("test.ak.us")),
            ("www.test.ak.us", Some("test.ak.us")),
            ("k12.ak.us", None),
            ("test.k12.ak.us", Some("test.k12.ak.us")),
            ("www.test.k12.ak.us", Some("test.k12.ak.us")),
        ],
    );
}

#[test]
fn test_idn_labels() {
    check(
        &resolver(),
        &[
            ("食狮.com.cn", Some("食狮.com.cn")),
            ("食狮.公司.cn", Some("食狮.公司.cn")),
            ("www.食狮.公司.cn", Some("食狮.公司.cn")),
            ("shishi.公司.cn", Some("shishi.公司.cn")),
            ("公司.cn", None),
            ("食狮.中国", Some("食狮.中国")),
            ("www.食狮.中国", Some("食狮.中国")),
            ("shishi.中国", Some("shishi.中国")),
            ("中国", None),
        ],
    );
}

#[test]
fn test_punycoded_idn_labels() {
    let r = resolver();
    let cases = [
        ("xn--85x722f.com.cn", Some("xn--85x722f.com.cn")),
        ("xn--85x722f.xn--55qx5d.cn", Some("xn--85x722f.xn--55qx5d.cn")),
        ("www.xn--85x722f.xn--55qx5d.cn", Some("xn--85x722f.xn--55qx5d.cn")),
        ("shishi.xn--55qx5d.cn", Some("shishi.xn--55qx5d.cn")),
        ("xn--55qx5d.cn", None),
        ("xn--85x722f.xn--fiqs8s", Some("xn--85x722f.xn--fiqs8s")),
        ("www.xn--85x722f.xn--fiqs8s", Some("xn--85x722f.xn--fiqs8s")),
        ("shishi.xn--fiqs8s", Some("shishi.xn--fiqs8s")),
        ("xn--fiqs8s", None),
    ];
    for (host, expected) in cases {
        let d = r.resolve(host).unwrap();
        assert_eq!(d.registrable_domain.as_deref(), expected, "{host}");
    }
}

#[test]
fn test_invalid_hosts_are_errors() {
    let r = resolver();
    let long_label = format!("{}.com", "a".repeat(64));
    let cases = [
        ("", InvalidDomainKind::Empty),
        (".com", InvalidDomainKind::EmptyLabel),
        (".example.com", InvalidDomainKind::EmptyLabel),
        ("a..example.com", InvalidDomainKind::EmptyLabel),
        (long_label.as_str(), InvalidDomainKind::LabelTooLong),
        ("127.0.0.1", InvalidDomainKind::IpAddress),
        ("exa mple.com", InvalidDomainKind::IllegalCharacter),
    ];
    for (host, kind) in cases {
        match r.resolve(host) {
            Err(err) => assert_eq!(err.invalid_domain_kind(), Some(kind), "{host:?}"),
            Ok(d) => panic!("{host:?} should be rejected, got {d:?}"),
        }
    }
}

#[test]
fn test_registrable_domain_ends_with_public_suffix() {
    let r = resolver();
    let hosts = [
        "www.example.co.uk",
        "a.b.c.kobe.jp",
        "www.city.kobe.jp",
        "me.blogspot.com",
        "www.食狮.公司.cn",
        "deep.sub.domain.example.invalidtld",
        "www.www.ck",
        "co.uk",
    ];
    for host in hosts {
        let d = r.resolve(host).unwrap();
        if let Some(registrable) = &d.registrable_domain {
            let suffix = d.public_suffix.as_deref().expect("suffix present");
            assert!(
                registrable.ends_with(&format!(".{suffix}")),
                "{registrable} should end with .{suffix}"
            );
            // exactly one extra label
            assert_eq!(
                registrable.matches('.').count(),
                suffix.matches('.').count() + 1
            );
        }
    }
}

#[test]
fn test_registrable_domain_is_idempotent() {
    let r = resolver();
    for host in [
        "www.example.co.uk",
        "a.b.test.ck",
        "www.www.ck",
        "www.test.k12.ak.us",
        "b.example.example",
        "me.blogspot.co.uk",
    ] {
        let first = r.resolve(host).unwrap().registrable_domain.unwrap();
        let second = r.resolve(&first).unwrap().registrable_domain.unwrap();
        assert_eq!(first, second, "{host}");
    }
}

#[test]
fn test_sections() {
    let r = resolver();

    let d = r.resolve("me.blogspot.co.uk").unwrap();
    assert_eq!(d.section, Some(Section::Private));
    assert_eq!(d.public_suffix.as_deref(), Some("blogspot.co.uk"));

    let icann = r.resolve_icann("me.blogspot.co.uk").unwrap();
    assert_eq!(icann.public_suffix.as_deref(), Some("co.uk"));
    assert_eq!(icann.registrable_domain.as_deref(), Some("blogspot.co.uk"));
    assert_eq!(icann.sub_domain.as_deref(), Some("me"));

    let private = r.resolve_private("me.blogspot.co.uk").unwrap();
    assert_eq!(private.registrable_domain.as_deref(), Some("me.blogspot.co.uk"));

    assert!(matches!(
        r.resolve_private("www.example.co.uk"),
        Err(TldError::UnresolvableDomain { .. })
    ));
}

#[test]
fn test_shared_store_across_threads() {
    let store = Arc::new(RuleStore::from_file(testdata_path("public_suffix_list.dat")).unwrap());
    let resolvers: Vec<Arc<dyn Resolver>> = (0..4)
        .map(|_| {
            Arc::new(SuffixResolver::with_options(
                store.clone(),
                ResolverOptions::new().with_cache_size(16),
            )) as Arc<dyn Resolver>
        })
        .collect();

    std::thread::scope(|s| {
        for resolver in &resolvers {
            s.spawn(move || {
                for _ in 0..100 {
                    let d = resolver.resolve("www.example.co.uk").unwrap();
                    assert_eq!(d.registrable_domain.as_deref(), Some("example.co.uk"));
                }
            });
        }
    });

    // 4 resolvers + the local handle
    assert_eq!(Arc::strong_count(&store), 5);
}

#[test]
fn test_result_serializes() {
    let d = resolver().resolve("www.example.co.uk").unwrap();
    let json = serde_json::to_value(&d).unwrap();
    assert_eq!(json["public_suffix"], "co.uk");
    assert_eq!(json["registrable_domain"], "example.co.uk");
    assert_eq!(json["sub_domain"], "www");
    assert_eq!(json["section"], "icann");

    let back: tld_engine_r::ResolvedDomain = serde_json::from_value(json).unwrap();
    assert_eq!(back, d);
}
