//! Dependency expressions such as `glibc>=2.35` or `python: for the bindings`.
use super::{EpochSeparators, Version};
use crate::error::{DbError, Result};

use lazy_static::lazy_static;
use regex::Regex;
use std::{
    cmp::Ordering,
    collections::{HashMap, HashSet},
    fmt,
    hash::{Hash, Hasher},
    sync::OnceLock,
};

/// Dependency expressions grouped by the name they refer to
pub type Depends = HashMap<String, HashSet<DependEntry>>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operator {
    Less,
    LessEqual,
    Equal,
    GreaterEqual,
    Greater,
}

impl Operator {
    fn from_token(s: &str) -> Option<Self> {
        match s {
            "<" => Some(Operator::Less),
            "<=" => Some(Operator::LessEqual),
            "=" => Some(Operator::Equal),
            ">=" => Some(Operator::GreaterEqual),
            ">" => Some(Operator::Greater),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Less => "<",
            Operator::LessEqual => "<=",
            Operator::Equal => "=",
            Operator::GreaterEqual => ">=",
            Operator::Greater => ">",
        }
    }

    /// Whether `candidate.vercmp(operand)` yielding `ord` satisfies this operator
    pub fn accepts(&self, ord: Ordering) -> bool {
        match self {
            Operator::Less => ord == Ordering::Less,
            Operator::LessEqual => ord != Ordering::Greater,
            Operator::Equal => ord == Ordering::Equal,
            Operator::GreaterEqual => ord != Ordering::Less,
            Operator::Greater => ord == Ordering::Greater,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One dependency line: `<name>[<op><version>][: <description>]`
#[derive(Clone, Debug)]
pub struct DependEntry {
    name: String,
    operator: Option<Operator>,
    operand: Option<String>,
    description: Option<String>,
    separators: EpochSeparators,
    version: OnceLock<Option<Version>>,
}

impl DependEntry {
    pub fn parse(line: &str) -> Result<Self> {
        Self::parse_with(line, &EpochSeparators::default())
    }

    pub fn parse_with(line: &str, separators: &EpochSeparators) -> Result<Self> {
        lazy_static! {
            static ref DEPEND_PARTITION: Regex =
                Regex::new(r"^(?P<name>[^<>=]+)(?:(?P<op><=|>=|<|>|=)(?P<ver>.*))?$").unwrap();
        }
        let (expr, description) = match line.rsplit_once(": ") {
            Some((expr, desc)) => (expr, Some(desc.to_owned())),
            None => (line, None),
        };
        let malformed = || DbError::MalformedDependency {
            package: None,
            field: None,
            line: line.to_owned(),
        };
        let segments = DEPEND_PARTITION.captures(expr).ok_or_else(malformed)?;
        // The regex ensures name always exists
        let name = segments
            .name("name")
            .map(|m| m.as_str().to_owned())
            .ok_or_else(malformed)?;

        Ok(DependEntry {
            name,
            operator: segments
                .name("op")
                .and_then(|m| Operator::from_token(m.as_str())),
            operand: segments.name("ver").map(|m| m.as_str().to_owned()),
            description,
            separators: separators.clone(),
            version: OnceLock::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn operator(&self) -> Option<Operator> {
        self.operator
    }

    /// The raw version operand, present iff an operator is
    pub fn operand(&self) -> Option<&str> {
        self.operand.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// The operand as a [`Version`], parsed on first access
    pub fn version(&self) -> Option<&Version> {
        self.version
            .get_or_init(|| {
                self.operand
                    .as_deref()
                    .map(|v| Version::parse_with(v, &self.separators))
            })
            .as_ref()
    }

    /// Check a candidate version against this expression. Expressions
    /// without an operator accept anything.
    pub fn satisfied_by(&self, candidate: &Version) -> bool {
        match (self.operator, self.version()) {
            (Some(op), Some(operand)) => op.accepts(candidate.vercmp(operand)),
            _ => true,
        }
    }

    fn key(&self) -> (&str, Option<Operator>, Option<&str>, Option<&str>) {
        (
            &self.name,
            self.operator,
            self.operand.as_deref(),
            self.description.as_deref(),
        )
    }
}

impl PartialEq for DependEntry {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for DependEntry {}

impl Hash for DependEntry {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state)
    }
}

impl fmt::Display for DependEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.name)?;
        if let (Some(op), Some(operand)) = (self.operator, &self.operand) {
            write!(f, "{}{}", op, operand)?;
        }
        if let Some(desc) = &self.description {
            write!(f, ": {}", desc)?;
        }
        Ok(())
    }
}

/// Parse dependency lines and group them by name
pub fn parse_depends<'a, I>(lines: I, separators: &EpochSeparators) -> Result<Depends>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut res = Depends::new();
    for line in lines {
        let entry = DependEntry::parse_with(line, separators)?;
        res.entry(entry.name.clone()).or_default().insert(entry);
    }
    Ok(res)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_with_description() {
        let entry = DependEntry::parse("foo>=1.2: optional thing").unwrap();
        assert_eq!(entry.name(), "foo");
        assert_eq!(entry.operator(), Some(Operator::GreaterEqual));
        assert_eq!(entry.operand(), Some("1.2"));
        assert_eq!(entry.description(), Some("optional thing"));
        assert_eq!(entry.to_string(), "foo>=1.2: optional thing");
    }

    #[test]
    fn parse_lines() {
        let entry = DependEntry::parse("glibc").unwrap();
        assert_eq!(entry.name(), "glibc");
        assert_eq!(entry.operator(), None);
        assert_eq!(entry.operand(), None);
        assert!(entry.version().is_none());

        for (line, op, operand) in [
            ("sh<1", Operator::Less, "1"),
            ("sh<=1", Operator::LessEqual, "1"),
            ("sh=1:2.0-3", Operator::Equal, "1:2.0-3"),
            ("sh>=1", Operator::GreaterEqual, "1"),
            ("sh>1", Operator::Greater, "1"),
        ] {
            let entry = DependEntry::parse(line).unwrap();
            assert_eq!(entry.name(), "sh");
            assert_eq!(entry.operator(), Some(op));
            assert_eq!(entry.operand(), Some(operand));
        }

        // Only the last ": " starts a description
        let entry = DependEntry::parse("python: a: b").unwrap();
        assert_eq!(entry.name(), "python: a");
        assert_eq!(entry.description(), Some("b"));

        let entry = DependEntry::parse("libfoo.so=1-64").unwrap();
        assert_eq!(entry.name(), "libfoo.so");
        assert_eq!(entry.version().and_then(Version::release), Some("64"));
    }

    #[test]
    fn reject_empty_name() {
        for line in ["", ">=1.0", "=1", ": just a description"] {
            assert!(
                matches!(
                    DependEntry::parse(line),
                    Err(DbError::MalformedDependency {
                        package: None,
                        field: None,
                        ..
                    })
                ),
                "{} should not parse",
                line
            );
        }
    }

    #[test]
    fn group_by_name() {
        let deps = parse_depends(
            ["foo>=1", "foo<2", "foo>=1", "bar"],
            &EpochSeparators::default(),
        )
        .unwrap();
        assert_eq!(deps.len(), 2);
        // Identical lines collapse
        assert_eq!(deps["foo"].len(), 2);
        assert_eq!(deps["bar"].len(), 1);
    }

    #[test]
    fn satisfied_by() {
        let v = |s| Version::parse(s);
        assert!(DependEntry::parse("foo").unwrap().satisfied_by(&v("0.1")));
        assert!(DependEntry::parse("foo>=1.2").unwrap().satisfied_by(&v("1.2")));
        assert!(DependEntry::parse("foo>=1.2").unwrap().satisfied_by(&v("1:0.1")));
        assert!(!DependEntry::parse("foo>1.2").unwrap().satisfied_by(&v("1.2-3")));
        assert!(DependEntry::parse("foo<1.2").unwrap().satisfied_by(&v("1.2rc1")));
        assert!(DependEntry::parse("foo=1.2-1").unwrap().satisfied_by(&v("1.2")));
        assert!(!DependEntry::parse("foo<=1.2").unwrap().satisfied_by(&v("1.3")));
    }
}
