use std::cmp::Ordering;
use std::convert::Infallible;
use std::str::FromStr;

/// Segment delimiter of a version identifier
const SEGMENT_DELIMITER: char = '.';

/// A version identifier parsed into its numeric segments.
///
/// Equality and ordering treat missing trailing segments as zero, so
/// `"1.2"`, `"1.2.0"` and `"1.2.0.0"` all compare equal even though their
/// segment vectors differ in length.
#[derive(Debug, Clone, Default)]
pub struct ParsedVersion {
    segments: Vec<u64>,
}

impl ParsedVersion {
    /// Numeric segments, one per dot-separated part of the source string
    pub fn segments(&self) -> &[u64] {
        &self.segments
    }

    fn segment(&self, index: usize) -> u64 {
        self.segments.get(index).copied().unwrap_or(0)
    }
}

impl FromStr for ParsedVersion {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(parse(s))
    }
}

impl Ord for ParsedVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.segments.len().max(other.segments.len());
        (0..len)
            .map(|i| self.segment(i).cmp(&other.segment(i)))
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for ParsedVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for ParsedVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ParsedVersion {}

/// Parse a version identifier into numeric segments.
///
/// Never fails. Each segment contributes the value of its leading decimal
/// digits, or 0 when it has none:
/// - "1.2.3" -> [1, 2, 3]
/// - "1.2.beta" -> [1, 2, 0]
/// - "1.2.3-rc1" -> [1, 2, 3]
pub fn parse(identifier: &str) -> ParsedVersion {
    ParsedVersion {
        segments: identifier
            .split(SEGMENT_DELIMITER)
            .map(leading_number)
            .collect(),
    }
}

/// Compare two version identifiers segment by segment
pub fn compare(a: &str, b: &str) -> Ordering {
    parse(a).cmp(&parse(b))
}

/// Index of the greatest version in `versions`.
///
/// Equal versions resolve to the one that appears first.
pub fn latest_index<S: AsRef<str>>(versions: &[S]) -> Option<usize> {
    let mut best: Option<(usize, ParsedVersion)> = None;
    for (i, version) in versions.iter().enumerate() {
        let parsed = parse(version.as_ref());
        if best.as_ref().is_none_or(|(_, current)| parsed > *current) {
            best = Some((i, parsed));
        }
    }
    best.map(|(i, _)| i)
}

fn leading_number(segment: &str) -> u64 {
    segment
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0u64, |acc, digit| {
            acc.saturating_mul(10)
                .saturating_add(u64::from(digit - b'0'))
        })
}
