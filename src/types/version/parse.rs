use lazy_static::lazy_static;
use nom::{branch::alt, bytes::complete::take_while1, combinator::map, IResult};
use std::sync::Arc;

lazy_static! {
    // Arch uses ':', MSYS2 uses '~'
    static ref DEFAULT_EPOCH_SEPARATORS: EpochSeparators = EpochSeparators::new([':', '~']);
}

/// Characters accepted between the epoch and the rest of a version
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EpochSeparators(Arc<[char]>);

impl EpochSeparators {
    pub fn new(separators: impl IntoIterator<Item = char>) -> Self {
        let mut separators: Vec<char> = separators.into_iter().collect();
        separators.sort_unstable();
        separators.dedup();
        EpochSeparators(separators.into())
    }

    pub fn contains(&self, c: char) -> bool {
        self.0.contains(&c)
    }

    pub fn as_slice(&self) -> &[char] {
        &self.0
    }
}

impl Default for EpochSeparators {
    fn default() -> Self {
        DEFAULT_EPOCH_SEPARATORS.clone()
    }
}

/// Split a version string into `(epoch, upstream, release)`.
///
/// The epoch is the digit prefix, if the first non-digit character is an epoch
/// separator. The release is whatever follows the last `-`.
pub(super) fn split_evr<'a>(
    s: &'a str,
    separators: &EpochSeparators,
) -> (&'a str, &'a str, Option<&'a str>) {
    let (epoch, rest) = match s.char_indices().find(|(_, c)| !c.is_ascii_digit()) {
        Some((pos, c)) if separators.contains(c) => (&s[..pos], &s[pos + c.len_utf8()..]),
        _ => ("0", s),
    };
    match rest.rsplit_once('-') {
        Some((upstream, release)) => (epoch, upstream, Some(release)),
        None => (epoch, rest, None),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum SegmentKind {
    Digit,
    Alpha,
    Other,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) struct Segment<'a> {
    pub text: &'a str,
    pub kind: SegmentKind,
}

fn is_other(c: char) -> bool {
    !c.is_ascii_digit() && !c.is_alphabetic()
}

fn segment(i: &str) -> IResult<&str, Segment> {
    alt((
        map(take_while1(|c: char| c.is_ascii_digit()), |text| Segment {
            text,
            kind: SegmentKind::Digit,
        }),
        map(take_while1(char::is_alphabetic), |text| Segment {
            text,
            kind: SegmentKind::Alpha,
        }),
        map(take_while1(is_other), |text| Segment {
            text,
            kind: SegmentKind::Other,
        }),
    ))(i)
}

/// Maximal runs of digits, letters and everything else
pub(super) fn segments(s: &str) -> impl Iterator<Item = Segment<'_>> {
    let mut rest = s;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        // Every character belongs to one of the three classes
        let (i, segment) = segment(rest).ok()?;
        rest = i;
        Some(segment)
    })
}
