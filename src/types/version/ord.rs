use super::parse::{segments, Segment, SegmentKind};
use std::cmp::Ordering;

/// The rpmvercmp algorithm, as used by pacman.
/// Check https://fedoraproject.org/wiki/Archive:Tools/RPM/VersionComparison
///
/// When one side runs out of segments it is older, unless the other side
/// continues with letters: `1.0` is newer than `1.0rc`.
pub(super) fn rpmvercmp(a: &str, b: &str) -> Ordering {
    let mut this = segments(a);
    let mut that = segments(b);
    loop {
        match (this.next(), that.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(rest)) => {
                return match rest.kind {
                    SegmentKind::Alpha => Ordering::Greater,
                    _ => Ordering::Less,
                }
            }
            (Some(rest), None) => {
                return match rest.kind {
                    SegmentKind::Alpha => Ordering::Less,
                    _ => Ordering::Greater,
                }
            }
            (Some(x), Some(y)) => match cmp_segment(&x, &y) {
                Ordering::Equal => (),
                ord => return ord,
            },
        }
    }
}

fn cmp_segment(this: &Segment, that: &Segment) -> Ordering {
    use SegmentKind::*;
    match (this.kind, that.kind) {
        (Digit, Digit) => cmp_numeric(this.text, that.text),
        (Alpha, Alpha) => this.text.cmp(that.text),
        // Only the length of a separator run matters
        (Other, Other) => this.text.chars().count().cmp(&that.text.chars().count()),
        (Digit, _) => Ordering::Greater,
        (_, Digit) => Ordering::Less,
        (Other, _) => Ordering::Greater,
        (_, Other) => Ordering::Less,
    }
}

/// Compare two digit runs as arbitrary precision integers
fn cmp_numeric(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}
