//! Canonical starting-hand keys.
//!
//! Every two-card Hold'em starting hand belongs to one of 169 classes: 13
//! pairs, 78 suited combinations, and 78 offsuit combinations. [`HandKey`]
//! names those classes and round-trips them through the text forms the
//! equity engine understands.

use crate::cards::Rank;
use std::fmt;
use std::str::FromStr;

/// One of the 169 canonical starting-hand classes.
///
/// Text forms: pairs render as `"AA"`, suited hands as high-then-low plus
/// `s` (`"AKs"`), and offsuit hands as low-then-high plus `o` (`"KAo"`).
/// The offsuit ordering looks backwards but is the engine's wire convention
/// and is preserved exactly.
///
/// ```
/// use range_equity::cards::Rank;
/// use range_equity::keys::HandKey;
///
/// assert_eq!(HandKey::pair(Rank::Ace).to_string(), "AA");
/// assert_eq!(HandKey::suited(Rank::Ace, Rank::King).to_string(), "AKs");
/// assert_eq!(HandKey::offsuit(Rank::King, Rank::Ace).to_string(), "KAo");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HandKey {
    Pair(Rank),
    Suited { high: Rank, low: Rank },
    Offsuit { high: Rank, low: Rank },
}

impl HandKey {
    /// Number of distinct starting-hand classes.
    pub const COUNT: usize = 169;

    pub const fn pair(rank: Rank) -> Self {
        HandKey::Pair(rank)
    }

    /// Suited key for two ranks given in either order. Equal ranks collapse
    /// to the pair key; there is no suited variant of a pair.
    pub fn suited(a: Rank, b: Rank) -> Self {
        match order(a, b) {
            None => HandKey::Pair(a),
            Some((high, low)) => HandKey::Suited { high, low },
        }
    }

    /// Offsuit key for two ranks given in either order; equal ranks collapse
    /// to the pair key.
    pub fn offsuit(a: Rank, b: Rank) -> Self {
        match order(a, b) {
            None => HandKey::Pair(a),
            Some((high, low)) => HandKey::Offsuit { high, low },
        }
    }

    /// Key at a 13x13 grid coordinate, both axes in strength order (0 = Ace).
    /// The diagonal holds pairs, the upper triangle (row < col) suited keys,
    /// the lower triangle offsuit keys. Total over all valid coordinates.
    pub fn from_grid(row: usize, col: usize) -> Option<HandKey> {
        let r = Rank::from_strength(row)?;
        let c = Rank::from_strength(col)?;
        Some(match row.cmp(&col) {
            std::cmp::Ordering::Equal => HandKey::Pair(r),
            std::cmp::Ordering::Less => HandKey::Suited { high: r, low: c },
            std::cmp::Ordering::Greater => HandKey::Offsuit { high: c, low: r },
        })
    }

    /// Inverse of [`HandKey::from_grid`].
    pub fn grid(self) -> (usize, usize) {
        match self {
            HandKey::Pair(r) => (r.strength(), r.strength()),
            HandKey::Suited { high, low } => (high.strength(), low.strength()),
            HandKey::Offsuit { high, low } => (low.strength(), high.strength()),
        }
    }

    /// All 169 keys, in grid order.
    pub fn all() -> impl Iterator<Item = HandKey> {
        (0..13).flat_map(|row| (0..13).filter_map(move |col| HandKey::from_grid(row, col)))
    }

    pub const fn is_pair(self) -> bool {
        matches!(self, HandKey::Pair(_))
    }
}

/// (high, low) by strength, or None when equal.
fn order(a: Rank, b: Rank) -> Option<(Rank, Rank)> {
    match a.strength().cmp(&b.strength()) {
        std::cmp::Ordering::Equal => None,
        std::cmp::Ordering::Less => Some((a, b)),
        std::cmp::Ordering::Greater => Some((b, a)),
    }
}

impl fmt::Display for HandKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            HandKey::Pair(r) => write!(f, "{r}{r}"),
            HandKey::Suited { high, low } => write!(f, "{high}{low}s"),
            HandKey::Offsuit { high, low } => write!(f, "{low}{high}o"),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum KeyParseError {
    #[error("invalid hand key: '{0}'")]
    Invalid(String),
}

impl FromStr for HandKey {
    type Err = KeyParseError;

    /// Parses one exact key token: `"77"`, `"AKs"`, `"KAo"` (ranks in either
    /// order for suffixed forms). Range shorthand is not accepted here; see
    /// [`crate::range::Range::parse`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || KeyParseError::Invalid(s.to_string());
        let chars: Vec<char> = s.trim().chars().collect();
        match chars.as_slice() {
            [a, b] => {
                let (ra, rb) = (
                    Rank::try_from(*a).map_err(|_| invalid())?,
                    Rank::try_from(*b).map_err(|_| invalid())?,
                );
                if ra == rb {
                    Ok(HandKey::Pair(ra))
                } else {
                    Err(invalid())
                }
            }
            [a, b, suffix] => {
                let (ra, rb) = (
                    Rank::try_from(*a).map_err(|_| invalid())?,
                    Rank::try_from(*b).map_err(|_| invalid())?,
                );
                if ra == rb {
                    return Err(invalid());
                }
                match suffix.to_ascii_lowercase() {
                    's' => Ok(HandKey::suited(ra, rb)),
                    'o' => Ok(HandKey::offsuit(ra, rb)),
                    _ => Err(invalid()),
                }
            }
            _ => Err(invalid()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn display_forms() {
        assert_eq!(HandKey::pair(Rank::Seven).to_string(), "77");
        assert_eq!(HandKey::suited(Rank::King, Rank::Ace).to_string(), "AKs");
        assert_eq!(HandKey::offsuit(Rank::Ace, Rank::King).to_string(), "KAo");
        assert_eq!(HandKey::suited(Rank::Queen, Rank::Nine).to_string(), "Q9s");
    }

    #[test]
    fn equal_ranks_collapse_to_pair() {
        assert_eq!(HandKey::suited(Rank::Ten, Rank::Ten), HandKey::Pair(Rank::Ten));
        assert_eq!(HandKey::offsuit(Rank::Two, Rank::Two), HandKey::Pair(Rank::Two));
    }

    #[test]
    fn grid_is_a_bijection_over_169_classes() {
        let keys: BTreeSet<HandKey> = HandKey::all().collect();
        assert_eq!(keys.len(), HandKey::COUNT);

        let pairs = keys.iter().filter(|k| k.is_pair()).count();
        let suited = keys.iter().filter(|k| matches!(k, HandKey::Suited { .. })).count();
        let offsuit = keys.iter().filter(|k| matches!(k, HandKey::Offsuit { .. })).count();
        assert_eq!((pairs, suited, offsuit), (13, 78, 78));

        for key in keys {
            let (row, col) = key.grid();
            assert_eq!(HandKey::from_grid(row, col), Some(key));
        }
        assert_eq!(HandKey::from_grid(13, 0), None);
        assert_eq!(HandKey::from_grid(0, 13), None);
    }

    #[test]
    fn from_str_accepts_either_rank_order() {
        assert_eq!("AKs".parse::<HandKey>().unwrap(), "KAs".parse::<HandKey>().unwrap());
        assert_eq!(
            "KAo".parse::<HandKey>().unwrap(),
            HandKey::Offsuit { high: Rank::Ace, low: Rank::King }
        );
        assert_eq!("77".parse::<HandKey>().unwrap(), HandKey::Pair(Rank::Seven));
        assert!("AK".parse::<HandKey>().is_err());
        assert!("AAs".parse::<HandKey>().is_err());
        assert!("A5x".parse::<HandKey>().is_err());
    }
}
