//! Semantic version ordering for registry version strings.

use std::cmp::Ordering;

/// A registry version string with semantic-version precedence.
///
/// Strings that do not parse as `MAJOR[.MINOR[.PATCH]][-PRE][+BUILD]`
/// (optionally `v`-prefixed) order below every parseable version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    raw: String,
    parsed: Option<Parsed>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Parsed {
    release: [u64; 3],
    pre: Vec<String>,
}

impl Version {
    pub fn parse(raw: &str) -> Self {
        Self {
            raw: raw.trim().to_string(),
            parsed: parse(raw),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

fn parse(raw: &str) -> Option<Parsed> {
    let clean = raw.trim().trim_start_matches('v');
    let clean = clean.split_once('+').map(|(v, _)| v).unwrap_or(clean);
    let (base, pre) = match clean.split_once('-') {
        Some((base, pre)) => (base, pre.split('.').map(str::to_string).collect()),
        None => (clean, Vec::new()),
    };

    let mut release = [0u64; 3];
    let mut parts = base.split('.');
    release[0] = parts.next()?.parse().ok()?;
    for slot in release.iter_mut().skip(1) {
        match parts.next() {
            Some(part) => *slot = part.parse().ok()?,
            None => break,
        }
    }
    if parts.next().is_some() {
        return None;
    }
    Some(Parsed { release, pre })
}

fn compare_pre(a: &[String], b: &[String]) -> Ordering {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => return Ordering::Equal,
        (true, false) => return Ordering::Greater,
        (false, true) => return Ordering::Less,
        (false, false) => {}
    }
    for (x, y) in a.iter().zip(b) {
        let ord = match (x.parse::<u64>(), y.parse::<u64>()) {
            (Ok(x), Ok(y)) => x.cmp(&y),
            (Ok(_), Err(_)) => Ordering::Less,
            (Err(_), Ok(_)) => Ordering::Greater,
            (Err(_), Err(_)) => x.cmp(y),
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    a.len().cmp(&b.len())
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        match (&self.parsed, &other.parsed) {
            (Some(a), Some(b)) => a
                .release
                .cmp(&b.release)
                .then_with(|| compare_pre(&a.pre, &b.pre))
                .then_with(|| self.raw.cmp(&other.raw)),
            (Some(_), None) => Ordering::Greater,
            (None, Some(_)) => Ordering::Less,
            (None, None) => self.raw.cmp(&other.raw),
        }
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Sort version strings newest first, dropping blanks and duplicates.
pub fn sort_descending<I, S>(versions: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut parsed: Vec<Version> = versions
        .into_iter()
        .map(|v| Version::parse(v.as_ref()))
        .filter(|v| !v.raw.is_empty())
        .collect();
    parsed.sort_by(|a, b| b.cmp(a));
    parsed.dedup_by(|a, b| a.raw == b.raw);
    parsed.into_iter().map(|v| v.raw).collect()
}
