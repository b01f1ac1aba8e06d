//! Running-version comparison
//!
//! The submission decider only asks one question about versions: is the
//! software that produced the error older than a given release?

use std::cmp::Ordering;

/// Answers whether the running software predates a version
pub trait VersionOracle: Send + Sync {
    /// Whether the running version is strictly older than `version`
    fn running_version_is_older_than(&self, version: &str) -> bool;
}

/// Version oracle backed by a known running version string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunningVersion {
    current: String,
}

impl RunningVersion {
    /// Create an oracle for the given running version
    pub fn new(current: impl Into<String>) -> Self {
        Self {
            current: current.into(),
        }
    }

    /// The version of this binary
    pub fn of_this_crate() -> Self {
        Self::new(env!("CARGO_PKG_VERSION"))
    }

    /// The running version string
    pub fn as_str(&self) -> &str {
        &self.current
    }
}

impl VersionOracle for RunningVersion {
    fn running_version_is_older_than(&self, version: &str) -> bool {
        compare_versions(&self.current, version) == Ordering::Less
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Component<'a> {
    /// All-digit part, leading zeros stripped
    Number(&'a str),
    Text(&'a str),
}

impl PartialOrd for Component<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Component<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            // No leading zeros, so the longer digit string is the larger number
            (Self::Number(a), Self::Number(b)) => a.len().cmp(&b.len()).then_with(|| a.cmp(b)),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            // 1.2.0 > 1.2.beta
            (Self::Number(_), Self::Text(_)) => Ordering::Greater,
            (Self::Text(_), Self::Number(_)) => Ordering::Less,
        }
    }
}

fn components(release: &str) -> Vec<Component<'_>> {
    release
        .split(['.', '_'])
        .map(|part| {
            if !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit()) {
                Component::Number(part.trim_start_matches('0'))
            } else {
                Component::Text(part)
            }
        })
        .collect()
}

/// Compare two dotted version strings
///
/// Numeric components compare numerically, others lexicographically, and
/// missing trailing components count as zero. A leading `v` is ignored. A
/// pre-release suffix (`-rc1`) sorts before the plain release, and build
/// metadata (`+5`) is ignored.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let (a_release, a_pre) = split_pre_release(a);
    let (b_release, b_pre) = split_pre_release(b);

    let a_parts = components(a_release);
    let b_parts = components(b_release);
    let zero = Component::Number("");

    for i in 0..a_parts.len().max(b_parts.len()) {
        let left = a_parts.get(i).unwrap_or(&zero);
        let right = b_parts.get(i).unwrap_or(&zero);
        match left.cmp(right) {
            Ordering::Equal => {}
            other => return other,
        }
    }

    match (a_pre, b_pre) {
        (None, None) => Ordering::Equal,
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (Some(x), Some(y)) => compare_versions(x, y),
    }
}

fn split_pre_release(version: &str) -> (&str, Option<&str>) {
    let version = version.trim();
    let version = version
        .strip_prefix(['v', 'V'])
        .filter(|rest| rest.starts_with(|c: char| c.is_ascii_digit()))
        .unwrap_or(version);
    let version = version.split_once('+').map_or(version, |(v, _)| v);

    match version.split_once('-') {
        Some((release, pre)) => (release, Some(pre)),
        None => (version, None),
    }
}
