//! rpm style package versions.
//!
//! A version string is split into `(epoch, upstream, release)`. Each part is
//! compared segment by segment with [`rpmvercmp`](ord::rpmvercmp). The release
//! is only compared when both sides carry one, so `1.0` equals both `1.0-1`
//! and `1.0-2` while those two differ. That makes the relation non-transitive,
//! which is why `Version` implements `PartialEq`/`PartialOrd` only.
mod ord;
mod parse;
#[cfg(test)]
mod test;

pub use parse::EpochSeparators;

use ord::rpmvercmp;
use parse::{segments, split_evr, SegmentKind};
use std::{cmp::Ordering, fmt};

#[derive(Clone, Debug, PartialEq, Eq)]
struct Evr {
    epoch: String,
    upstream: String,
    release: Option<String>,
}

#[derive(Clone, Debug)]
pub struct Version {
    src: Option<String>,
    evr: Option<Evr>,
}

impl Version {
    /// Parse with the default epoch separators
    pub fn parse(s: &str) -> Self {
        Self::parse_with(s, &EpochSeparators::default())
    }

    /// Parsing never fails, characters that are neither digits nor letters
    /// end up in separator segments.
    pub fn parse_with(s: &str, separators: &EpochSeparators) -> Self {
        let (epoch, upstream, release) = split_evr(s, separators);
        Version {
            src: Some(s.to_owned()),
            evr: Some(Evr {
                epoch: epoch.to_owned(),
                upstream: upstream.to_owned(),
                release: release.map(str::to_owned),
            }),
        }
    }

    /// The "no version" sentinel. It is older than every concrete version.
    pub fn none() -> Self {
        Version {
            src: None,
            evr: None,
        }
    }

    pub fn is_none(&self) -> bool {
        self.evr.is_none()
    }

    /// The source string this version was parsed from
    pub fn as_str(&self) -> Option<&str> {
        self.src.as_deref()
    }

    pub fn epoch(&self) -> Option<&str> {
        self.evr.as_ref().map(|evr| evr.epoch.as_str())
    }

    pub fn upstream(&self) -> Option<&str> {
        self.evr.as_ref().map(|evr| evr.upstream.as_str())
    }

    pub fn release(&self) -> Option<&str> {
        self.evr.as_ref().and_then(|evr| evr.release.as_deref())
    }

    pub fn vercmp(&self, other: &Version) -> Ordering {
        if self.src == other.src {
            return Ordering::Equal;
        }
        let (this, that) = match (&self.evr, &other.evr) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(this), Some(that)) => (this, that),
        };
        if this == that {
            return Ordering::Equal;
        }

        rpmvercmp(&this.epoch, &that.epoch)
            .then_with(|| rpmvercmp(&this.upstream, &that.upstream))
            .then_with(|| match (&this.release, &that.release) {
                (Some(a), Some(b)) => rpmvercmp(a, b),
                _ => Ordering::Equal,
            })
    }

    pub fn is_newer_than(&self, other: &Version) -> bool {
        self.vercmp(other) == Ordering::Greater
    }

    pub fn is_older_than(&self, other: &Version) -> bool {
        self.vercmp(other) == Ordering::Less
    }

    /// Normalized form for display or as a deduplication key. Separator runs
    /// become a single `.` and leading zeros are dropped. Versions that compare
    /// equal may still canonicalize differently.
    pub fn canonicalize(&self, epoch_separator: char) -> Option<String> {
        let evr = self.evr.as_ref()?;
        let mut res = String::new();
        if evr.epoch != "0" {
            res.push_str(evr.epoch.trim_start_matches('0'));
            res.push(epoch_separator);
        }

        for segment in segments(&evr.upstream) {
            match segment.kind {
                SegmentKind::Other => res.push('.'),
                SegmentKind::Digit => res.push_str(strip_zeros(segment.text)),
                SegmentKind::Alpha => res.push_str(segment.text),
            }
        }

        if let Some(release) = &evr.release {
            res.push('-');
            res.push_str(strip_zeros(release));
        }

        Some(res)
    }
}

fn strip_zeros(s: &str) -> &str {
    match s.trim_start_matches('0') {
        "" => "0",
        stripped => stripped,
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.vercmp(other) == Ordering::Equal
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.vercmp(other))
    }
}

impl From<&str> for Version {
    fn from(s: &str) -> Self {
        Version::parse(s)
    }
}

impl From<Option<&str>> for Version {
    fn from(s: Option<&str>) -> Self {
        match s {
            Some(s) => Version::parse(s),
            None => Version::none(),
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.src.as_deref().unwrap_or(""))
    }
}
