use std::cmp::Ordering;
use std::fmt;

/// Ordering key for a dotted version string such as `v1.2.3`.
///
/// A leading non-digit marker is dropped and every segment that is not a
/// plain unsigned integer counts as `0`. Segments compare left to right; when
/// one version is a prefix of the other the shorter one is lower.
#[derive(Debug, Clone)]
pub struct Version {
    segments: Vec<u64>,
    degraded: bool,
}

impl Version {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        let digits = match trimmed.chars().next() {
            Some(c) if !c.is_ascii_digit() => &trimmed[c.len_utf8()..],
            _ => trimmed,
        };

        let mut degraded = false;
        let segments = digits
            .split('.')
            .map(|part| match parse_segment(part) {
                Some(n) => n,
                None => {
                    degraded = true;
                    0
                }
            })
            .collect();

        Self { segments, degraded }
    }

    pub fn segments(&self) -> &[u64] {
        &self.segments
    }

    /// True when at least one segment was not numeric and was read as `0`.
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }
}

fn parse_segment(part: &str) -> Option<u64> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.segments == other.segments
    }
}

impl Eq for Version {}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.segments.cmp(&other.segments)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.segments.iter().map(u64::to_string).collect();
        write!(f, "{}", parts.join("."))
    }
}

impl From<&str> for Version {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

/// Sort newest first. The sort is stable: equal versions keep their order.
pub fn sort_newest_first<T, F>(items: &mut [T], version_of: F)
where
    F: Fn(&T) -> Version,
{
    items.sort_by_cached_key(|item| std::cmp::Reverse(version_of(item)));
}
