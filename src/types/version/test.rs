use super::{EpochSeparators, Version};
use proptest::prelude::*;
use std::cmp::Ordering::{self, *};

fn check(table: &[(&str, Ordering, &str)]) {
    for (a, expected, b) in table {
        assert_eq!(crate::vercmp(a, b), *expected, "comparing {} vs {}", a, b);
        // and the mirror case just to be sure
        assert_eq!(
            crate::vercmp(b, a),
            expected.reverse(),
            "comparing {} vs {}",
            b,
            a
        );
    }
}

#[test]
fn similar_length() {
    check(&[("1.5.0", Equal, "1.5.0"), ("1.5.1", Greater, "1.5.0")]);
}

#[test]
fn mixed_length() {
    check(&[("1.5.1", Greater, "1.5")]);
}

#[test]
fn with_release() {
    check(&[
        ("1.5.0-1", Equal, "1.5.0-1"),
        ("1.5.0-1", Less, "1.5.0-2"),
        ("1.5.0-1", Less, "1.5.1-1"),
        ("1.5.0-2", Less, "1.5.1-1"),
        ("1.5-1", Less, "1.5.1-1"),
        ("1.5-2", Less, "1.5.1-1"),
        ("1.5-2", Less, "1.5.1-2"),
    ]);
}

#[test]
fn release_on_one_side() {
    check(&[
        ("1.5", Equal, "1.5-1"),
        ("1.5-1", Equal, "1.5"),
        ("1.1-1", Equal, "1.1"),
        ("1.0-1", Less, "1.1"),
        ("1.1-1", Greater, "1.0"),
    ]);
}

#[test]
fn alphanumeric() {
    check(&[
        ("1.5b-1", Less, "1.5-1"),
        ("1.5b", Less, "1.5"),
        ("1.5b-1", Less, "1.5"),
        ("1.5b", Less, "1.5.1"),
    ]);
}

#[test]
fn pre_releases() {
    check(&[
        ("1.0a", Less, "1.0alpha"),
        ("1.0alpha", Less, "1.0b"),
        ("1.0b", Less, "1.0beta"),
        ("1.0beta", Less, "1.0rc"),
        ("1.0rc", Less, "1.0"),
    ]);
}

#[test]
fn alpha_dotted() {
    check(&[
        ("1.5.a", Greater, "1.5"),
        ("1.5.b", Greater, "1.5.a"),
        ("1.5.1", Greater, "1.5.b"),
        ("1.5.b-1", Equal, "1.5.b"),
        ("1.5-1", Less, "1.5.b"),
    ]);
}

#[test]
fn differing_separators() {
    check(&[
        ("2.0", Equal, "2_0"),
        ("2.0_a", Equal, "2_0.a"),
        ("2.0a", Less, "2.0.a"),
        ("2___a", Greater, "2_a"),
    ]);
}

#[test]
fn leading_zeros_and_big_numbers() {
    check(&[
        ("1.05", Equal, "1.5"),
        ("1.010", Greater, "1.9"),
        ("99999999999999999999999999999999999999999", Greater, "1"),
    ]);
}

#[test]
fn epochs() {
    for sep in [':', '~'] {
        let v = |s: &str| s.replace('E', &sep.to_string());
        check(&[
            (v("0E1.0").as_str(), Equal, v("0E1.0").as_str()),
            (v("0E1.0").as_str(), Less, v("0E1.1").as_str()),
            (v("1E1.0").as_str(), Greater, v("0E1.0").as_str()),
            (v("1E1.0").as_str(), Greater, v("0E1.1").as_str()),
            (v("1E1.0").as_str(), Less, v("2E1.1").as_str()),
            // epoch wins over release
            (v("1E1.0").as_str(), Greater, v("0E1.0-1").as_str()),
            (v("1E1.0-1").as_str(), Greater, v("0E1.1-1").as_str()),
            // absent epoch is epoch 0
            (v("0E1.0").as_str(), Equal, "1.0"),
            (v("0E1.0").as_str(), Less, "1.1"),
            (v("0E1.1").as_str(), Greater, "1.0"),
            (v("1E1.0").as_str(), Greater, "1.0"),
            (v("1E1.0").as_str(), Greater, "1.1"),
            (v("1E1.1").as_str(), Greater, "1.1"),
        ]);
    }
}

#[test]
fn custom_separators() {
    let colon = EpochSeparators::new([':']);
    let a = Version::parse_with("1~1.0", &colon);
    let b = Version::parse_with("2.0", &colon);
    assert_eq!(a.epoch(), Some("0"));
    assert_eq!(a.upstream(), Some("1~1.0"));
    assert!(a.is_older_than(&b));
    // With '~' accepted the same string carries an epoch
    assert!(Version::parse("1~1.0").is_newer_than(&b));
}

#[test]
fn components() {
    let v = Version::parse("2:1.0.3-4");
    assert_eq!(v.epoch(), Some("2"));
    assert_eq!(v.upstream(), Some("1.0.3"));
    assert_eq!(v.release(), Some("4"));
    assert_eq!(v.as_str(), Some("2:1.0.3-4"));
    assert_eq!(v.to_string(), "2:1.0.3-4");

    let v = Version::parse("1.0");
    assert_eq!(v.epoch(), Some("0"));
    assert_eq!(v.release(), None);
}

#[test]
fn none_sentinel() {
    let none = Version::none();
    let from_none = Version::from(None);
    assert!(none.is_none());
    assert_eq!(none, from_none);
    assert_eq!(none.vercmp(&from_none), Equal);
    assert!(none < Version::parse("0"));
    assert!(Version::parse("0") > none);
    assert!(none != Version::parse("0"));
    assert_eq!(none.canonicalize(':'), None);
    assert_eq!(none.epoch(), None);
    assert_eq!(none.to_string(), "");
}

#[test]
fn release_is_not_transitive() {
    let bare = Version::parse("1.0");
    let one = Version::parse("1.0-1");
    let two = Version::parse("1.0-2");
    assert_eq!(bare, one);
    assert_eq!(bare, two);
    assert_ne!(one, two);
}

#[test]
fn canonicalize() {
    let table = [
        ("1.0", ':', "1.0"),
        ("0:1.0", ':', "1.0"),
        ("01:1.05_a-001", ':', "1:1.5.a-1"),
        ("2~1.0-1", '~', "2~1.0-1"),
        ("2~1.0-1", ':', "2:1.0-1"),
        ("1.0+git__20210101", ':', "1.0.git.20210101"),
        ("1.00-0", ':', "1.0-0"),
    ];
    for (src, sep, expected) in table {
        assert_eq!(
            Version::parse(src).canonicalize(sep).as_deref(),
            Some(expected),
            "canonicalizing {}",
            src
        );
    }
}

proptest! {
    #[test]
    fn reflexive_and_antisymmetric(a in "[0-9a-z._:~+-]{0,10}", b in "[0-9a-z._:~+-]{0,10}") {
        let va = Version::parse(&a);
        let vb = Version::parse(&b);
        prop_assert_eq!(va.vercmp(&va), Equal);
        prop_assert_eq!(va.vercmp(&vb), vb.vercmp(&va).reverse());
    }

    // Releases are left out, they break transitivity on purpose
    #[test]
    fn transitive(
        a in "([0-9]{1,2}:)?[0-9a-z._]{1,6}",
        b in "([0-9]{1,2}:)?[0-9a-z._]{1,6}",
        c in "([0-9]{1,2}:)?[0-9a-z._]{1,6}",
    ) {
        let mut vs = [Version::parse(&a), Version::parse(&b), Version::parse(&c)];
        vs.sort_by(|x, y| x.vercmp(y));
        prop_assert!(vs[0].vercmp(&vs[1]) != Greater);
        prop_assert!(vs[1].vercmp(&vs[2]) != Greater);
        prop_assert!(vs[0].vercmp(&vs[2]) != Greater);
    }

    #[test]
    fn canonicalize_idempotent(v in "[0-9a-z._:~+-]{0,12}") {
        let once = Version::parse(&v).canonicalize(':').unwrap();
        let twice = Version::parse(&once).canonicalize(':').unwrap();
        prop_assert_eq!(once, twice);
    }
}
