//! Range shorthand parsing.
//!
//! Turns free-form range text (`"AKs, 77-99, Q9s+"`) into an exact set of
//! [`HandKey`]s and renders a set back to a stable display string. Parsing is
//! deliberately lenient: tokens that match no known form are dropped without
//! error. The single exception is weighted-range syntax (`"AA:0.5"`), which
//! fails the whole call so the user can correct the input.

use crate::cards::Rank;
use crate::keys::HandKey;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RangeError {
    #[error("weighted range syntax is not supported, remove ':' from '{0}'")]
    WeightedSyntax(String),
}

/// A de-duplicated set of canonical hand keys.
///
/// ```
/// use range_equity::range::Range;
///
/// let range: Range = "AKs, 77-99, Q9s+".parse().unwrap();
/// assert!(range.contains("88".parse().unwrap()));
/// assert!(range.contains("QTs".parse().unwrap()));
/// assert_eq!(range.to_text(), "77, 88, 99, AKs, Q9s, QJs, QTs");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Range {
    keys: BTreeSet<HandKey>,
}

impl Range {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse range shorthand into a key set.
    ///
    /// Tokens are split on commas and whitespace and matched against the
    /// grammar forms below, in order, first match winning. The ordering is
    /// load-bearing; do not reshuffle it.
    ///
    /// - any token containing `:` — fails the entire call ([`RangeError::WeightedSyntax`])
    /// - `77-99` — every pair between the endpoints, either endpoint order
    /// - `A2s-A5s` — connector range; both ends must share the anchor (higher)
    ///   rank or the token is skipped; a missing `s`/`o` suffix adds both
    /// - `Q9s+` — every low rank from the given one up to, but never
    ///   including, the anchor
    /// - `77` — one pair
    /// - `AKs` / `AKo` — one suited or offsuit key, ranks in either order
    /// - anything else — silently skipped
    pub fn parse(text: &str) -> Result<Range, RangeError> {
        let mut keys = BTreeSet::new();
        for raw in text.split(|c: char| c.is_whitespace() || c == ',') {
            if raw.is_empty() {
                continue;
            }
            if raw.contains(':') {
                return Err(RangeError::WeightedSyntax(raw.to_string()));
            }
            expand_token(&raw.to_ascii_uppercase(), &mut keys);
        }
        Ok(Range { keys })
    }

    /// Stable display text: keys sorted lexicographically, joined by `", "`.
    ///
    /// Lossy on purpose — keys are never re-collapsed into shorthand, so
    /// serializing a parsed range and parsing it again is a fixed point.
    pub fn to_text(&self) -> String {
        let mut texts: Vec<String> = self.keys.iter().map(HandKey::to_string).collect();
        texts.sort();
        texts.join(", ")
    }

    pub fn insert(&mut self, key: HandKey) -> bool {
        self.keys.insert(key)
    }

    pub fn remove(&mut self, key: HandKey) -> bool {
        self.keys.remove(&key)
    }

    pub fn contains(&self, key: HandKey) -> bool {
        self.keys.contains(&key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = HandKey> + '_ {
        self.keys.iter().copied()
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl FromStr for Range {
    type Err = RangeError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Range::parse(s)
    }
}

impl FromIterator<HandKey> for Range {
    fn from_iter<I: IntoIterator<Item = HandKey>>(iter: I) -> Self {
        Range { keys: iter.into_iter().collect() }
    }
}

impl Extend<HandKey> for Range {
    fn extend<I: IntoIterator<Item = HandKey>>(&mut self, iter: I) {
        self.keys.extend(iter);
    }
}

/// Suitedness restriction carried by an `s`/`o` suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Suffix {
    Suited,
    Offsuit,
}

/// Match one uppercased token against the grammar rules in order. A rule that
/// recognizes a token consumes it even when it expands to nothing.
fn expand_token(tok: &str, out: &mut BTreeSet<HandKey>) {
    let _ = expand_pair_range(tok, out)
        || expand_connector_range(tok, out)
        || expand_open_range(tok, out)
        || expand_exact(tok, out);
}

/// `77-99`: every pair between the endpoints inclusive, either order.
fn expand_pair_range(tok: &str, out: &mut BTreeSet<HandKey>) -> bool {
    let b = tok.as_bytes();
    if b.len() != 5 || b[2] != b'-' {
        return false;
    }
    let (Some(a), Some(a2), Some(c), Some(c2)) = (rank(b[0]), rank(b[1]), rank(b[3]), rank(b[4]))
    else {
        return false;
    };
    if a != a2 || c != c2 {
        return false;
    }
    let (lo, hi) = minmax(a.strength(), c.strength());
    for r in &Rank::DESC[lo..=hi] {
        out.insert(HandKey::Pair(*r));
    }
    true
}

/// `A2s-A5s` / `A2-A5`: both ends share the anchor rank; expands the low
/// ranks between the endpoints inclusive. A mismatched anchor consumes the
/// token without adding anything.
fn expand_connector_range(tok: &str, out: &mut BTreeSet<HandKey>) -> bool {
    let Some((first, second)) = tok.split_once('-') else {
        return false;
    };
    let Some((a1, a2, suffix)) = parse_end(first) else {
        return false;
    };
    let Some((b1, b2, second_suffix)) = parse_end(second) else {
        return false;
    };
    // the second end may repeat the first end's suffix or omit it, nothing else
    if second_suffix.is_some() && second_suffix != suffix {
        return false;
    }
    let (anchor, lo_start) = norm(a1, a2);
    let (anchor_b, lo_end) = norm(b1, b2);
    if anchor != anchor_b {
        return true;
    }
    let (lo, hi) = minmax(lo_start.strength(), lo_end.strength());
    for r in &Rank::DESC[lo..=hi] {
        if *r == anchor {
            continue;
        }
        push(anchor, *r, suffix, out);
    }
    true
}

/// `Q9s+`: every low rank from the given one up to, but not including, the
/// anchor. The anchor pair itself is never added, so `77+` expands to nothing.
fn expand_open_range(tok: &str, out: &mut BTreeSet<HandKey>) -> bool {
    let Some(rest) = tok.strip_suffix('+') else {
        return false;
    };
    let Some((a, b, suffix)) = parse_end(rest) else {
        return false;
    };
    let (anchor, low) = norm(a, b);
    let start = anchor.strength() + 1;
    let end = low.strength();
    if start > end {
        return true;
    }
    for r in &Rank::DESC[start..=end] {
        push(anchor, *r, suffix, out);
    }
    true
}

/// `77`, `AKs`, `AKo`: a single exact key. A suffixed token with equal ranks
/// (`AAs`) names no representable class and is consumed without effect.
fn expand_exact(tok: &str, out: &mut BTreeSet<HandKey>) -> bool {
    let b = tok.as_bytes();
    match b.len() {
        2 => {
            let (Some(a), Some(c)) = (rank(b[0]), rank(b[1])) else {
                return false;
            };
            if a != c {
                return false;
            }
            out.insert(HandKey::Pair(a));
            true
        }
        3 => {
            let Some((a, c, Some(suffix))) = parse_end(tok) else {
                return false;
            };
            if a != c {
                push(a.max(c), a.min(c), Some(suffix), out);
            }
            true
        }
        _ => false,
    }
}

/// One range endpoint: two ranks plus an optional suitedness suffix.
fn parse_end(part: &str) -> Option<(Rank, Rank, Option<Suffix>)> {
    let b = part.as_bytes();
    match b.len() {
        2 => Some((rank(b[0])?, rank(b[1])?, None)),
        3 => {
            let suffix = match b[2] {
                b'S' => Suffix::Suited,
                b'O' => Suffix::Offsuit,
                _ => return None,
            };
            Some((rank(b[0])?, rank(b[1])?, Some(suffix)))
        }
        _ => None,
    }
}

fn rank(b: u8) -> Option<Rank> {
    Rank::try_from(b as char).ok()
}

/// (high, low) by strength; equal ranks come back unchanged.
fn norm(a: Rank, b: Rank) -> (Rank, Rank) {
    if a.strength() <= b.strength() {
        (a, b)
    } else {
        (b, a)
    }
}

fn minmax(a: usize, b: usize) -> (usize, usize) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Insert the suited and/or offsuit key for a high/low rank pair, honoring
/// the suffix restriction. No suffix means both.
fn push(high: Rank, low: Rank, suffix: Option<Suffix>, out: &mut BTreeSet<HandKey>) {
    match suffix {
        None => {
            out.insert(HandKey::suited(high, low));
            out.insert(HandKey::offsuit(high, low));
        }
        Some(Suffix::Suited) => {
            out.insert(HandKey::suited(high, low));
        }
        Some(Suffix::Offsuit) => {
            out.insert(HandKey::offsuit(high, low));
        }
    }
}
