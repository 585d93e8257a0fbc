use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// Largest neighbor count a Moore neighborhood can produce.
pub const MAX_NEIGHBORS: u8 = 8;

/// Set of neighbor counts (0-8) stored as a bitmask.
/// Duplicates collapse and order is irrelevant, so equality is set equality.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Debug)]
pub struct CountSet(u16);

impl CountSet {
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Build from counts, rejecting anything above 8
    pub fn from_counts(counts: &[u8]) -> Result<Self, ConfigError> {
        counts.iter().try_fold(Self::empty(), |set, &n| {
            if n > MAX_NEIGHBORS {
                Err(ConfigError::NeighborCount(n))
            } else {
                Ok(set.with(n))
            }
        })
    }

    /// Parse a digit string such as "23".
    /// Characters outside '0'..='8' are ignored rather than failing the parse.
    pub fn parse_lenient(digits: &str) -> Self {
        digits
            .chars()
            .filter_map(|c| c.to_digit(10))
            .filter(|&d| d <= MAX_NEIGHBORS as u32)
            .fold(Self::empty(), |set, d| set.with(d as u8))
    }

    /// Parse a digit string, failing on the first character that is not a count
    fn parse_strict(digits: &str) -> Result<Self, ConfigError> {
        digits.chars().try_fold(Self::empty(), |set, c| match c.to_digit(10) {
            Some(d) if d <= MAX_NEIGHBORS as u32 => Ok(set.with(d as u8)),
            _ => Err(ConfigError::RuleCharacter(c)),
        })
    }

    /// Add a count. Counts above 8 are not neighbor counts and are dropped.
    #[inline]
    pub const fn with(self, n: u8) -> Self {
        if n > MAX_NEIGHBORS {
            return self;
        }
        Self(self.0 | (1 << n))
    }

    #[inline]
    pub const fn contains(self, n: u8) -> bool {
        n <= MAX_NEIGHBORS && (self.0 >> n) & 1 == 1
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Members in ascending order
    pub fn iter(self) -> impl Iterator<Item = u8> {
        (0..=MAX_NEIGHBORS).filter(move |&n| self.contains(n))
    }
}

impl fmt::Display for CountSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.iter().try_for_each(|n| write!(f, "{n}"))
    }
}

/// Survival/birth rule for a totalistic Moore-neighborhood automaton.
///
/// A live cell stays alive when its neighbor count is in `survival`;
/// a dead cell is born when its count is in `birth`. Values are immutable:
/// changing the rule means building a new `RuleSet`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct RuleSet {
    survival: CountSet,
    birth: CountSet,
}

impl RuleSet {
    /// Strict constructor from neighbor counts
    pub fn new(survival: &[u8], birth: &[u8]) -> Result<Self, ConfigError> {
        Ok(Self {
            survival: CountSet::from_counts(survival)?,
            birth: CountSet::from_counts(birth)?,
        })
    }

    pub const fn from_sets(survival: CountSet, birth: CountSet) -> Self {
        Self { survival, birth }
    }

    /// Build from the two digit strings a rule editor produces ("23", "3").
    pub fn from_digits(survival: &str, birth: &str) -> Self {
        Self {
            survival: CountSet::parse_lenient(survival),
            birth: CountSet::parse_lenient(birth),
        }
    }

    pub const fn survival(&self) -> CountSet {
        self.survival
    }

    pub const fn birth(&self) -> CountSet {
        self.birth
    }

    /// Next state of one cell given its current state and live neighbor count
    #[inline]
    pub const fn next_state(&self, alive: bool, neighbors: u8) -> bool {
        if alive {
            self.survival.contains(neighbors)
        } else {
            self.birth.contains(neighbors)
        }
    }

    /// Conway's Game of Life (B3/S23)
    pub const fn conway() -> Self {
        Self::from_sets(CountSet::empty().with(2).with(3), CountSet::empty().with(3))
    }

    /// HighLife (B36/S23), produces replicators
    pub const fn high_life() -> Self {
        Self::from_sets(
            CountSet::empty().with(2).with(3),
            CountSet::empty().with(3).with(6),
        )
    }

    /// Seeds (B2/S), every live cell dies each generation
    pub const fn seeds() -> Self {
        Self::from_sets(CountSet::empty(), CountSet::empty().with(2))
    }

    /// Day & Night (B3678/S34678), symmetric under inversion
    pub const fn day_and_night() -> Self {
        Self::from_sets(
            CountSet::empty().with(3).with(4).with(6).with(7).with(8),
            CountSet::empty().with(3).with(6).with(7).with(8),
        )
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::conway()
    }
}

/// Birth/survival notation, e.g. "B3/S23"
impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "B{}/S{}", self.birth, self.survival)
    }
}

impl FromStr for RuleSet {
    type Err = ConfigError;

    /// Accepts "B3/S23" and "S23/B3" in either case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ConfigError::RuleNotation(s.to_owned());
        let (first, second) = s.trim().split_once('/').ok_or_else(malformed)?;

        let mut birth = None;
        let mut survival = None;
        for part in [first, second] {
            let mut chars = part.chars();
            let slot = match chars.next().map(|c| c.to_ascii_uppercase()) {
                Some('B') => &mut birth,
                Some('S') => &mut survival,
                _ => return Err(malformed()),
            };
            if slot.is_some() {
                return Err(malformed());
            }
            *slot = Some(CountSet::parse_strict(chars.as_str())?);
        }

        match (survival, birth) {
            (Some(survival), Some(birth)) => Ok(Self { survival, birth }),
            _ => Err(malformed()),
        }
    }
}

/// Get all built-in rule presets
pub fn all_rules() -> Vec<(&'static str, RuleSet)> {
    vec![
        ("Conway", RuleSet::conway()),
        ("HighLife", RuleSet::high_life()),
        ("Seeds", RuleSet::seeds()),
        ("Day&Night", RuleSet::day_and_night()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conway_rules() {
        let rule = RuleSet::conway();

        // Underpopulation
        assert!(!rule.next_state(true, 0));
        assert!(!rule.next_state(true, 1));

        // Survival
        assert!(rule.next_state(true, 2));
        assert!(rule.next_state(true, 3));

        // Overpopulation
        assert!(!rule.next_state(true, 4));

        // Reproduction
        assert!(rule.next_state(false, 3));
        assert!(!rule.next_state(false, 2));
    }

    #[test]
    fn test_highlife_reproduction() {
        let rule = RuleSet::high_life();
        assert!(rule.next_state(false, 6));
        assert!(rule.next_state(false, 3));
    }

    #[test]
    fn test_seeds_always_dies() {
        let rule = RuleSet::seeds();
        for n in 0..=8 {
            assert!(!rule.next_state(true, n));
        }
        assert!(rule.next_state(false, 2));
        assert!(!rule.next_state(false, 3));
    }

    #[test]
    fn test_digit_order_and_duplicates_ignored() {
        assert_eq!(CountSet::parse_lenient("32"), CountSet::parse_lenient("2233"));
        assert_eq!(
            RuleSet::from_digits("23", "3"),
            RuleSet::from_digits("332", "33")
        );
        assert_eq!(RuleSet::from_digits("23", "3"), RuleSet::conway());
    }

    #[test]
    fn test_lenient_parse_skips_invalid_characters() {
        let set = CountSet::parse_lenient("2x9-3");
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![2, 3]);
        assert!(CountSet::parse_lenient("9a").is_empty());
    }

    #[test]
    fn test_with_drops_counts_above_eight() {
        assert_eq!(CountSet::empty().with(9), CountSet::empty());
        assert!(CountSet::empty().with(15).is_empty());
        assert!(CountSet::empty().with(200).is_empty());
        let set = CountSet::empty().with(3).with(12);
        assert_eq!(set, CountSet::empty().with(3));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![3]);
        assert_eq!(
            RuleSet::from_sets(CountSet::empty().with(2).with(3).with(9), CountSet::empty().with(3)),
            RuleSet::conway()
        );
    }

    #[test]
    fn test_strict_constructor_rejects_out_of_range() {
        assert_eq!(RuleSet::new(&[2, 9], &[3]), Err(ConfigError::NeighborCount(9)));
        assert_eq!(RuleSet::new(&[2, 3], &[3]), Ok(RuleSet::conway()));
    }

    #[test]
    fn test_notation_roundtrip() {
        let rule: RuleSet = "B36/S23".parse().unwrap();
        assert_eq!(rule, RuleSet::high_life());
        assert_eq!(rule.to_string(), "B36/S23");
        assert_eq!(RuleSet::seeds().to_string(), "B2/S");

        let swapped: RuleSet = "s23/b3".parse().unwrap();
        assert_eq!(swapped, RuleSet::conway());
    }

    #[test]
    fn test_notation_errors() {
        assert_eq!("B39/S23".parse::<RuleSet>(), Err(ConfigError::RuleCharacter('9')));
        assert!(matches!("23/3".parse::<RuleSet>(), Err(ConfigError::RuleNotation(_))));
        assert!(matches!("B3/B3".parse::<RuleSet>(), Err(ConfigError::RuleNotation(_))));
        assert!(matches!("B3".parse::<RuleSet>(), Err(ConfigError::RuleNotation(_))));
    }

    #[test]
    fn test_presets_are_distinct() {
        let rules = all_rules();
        assert_eq!(rules.len(), 4);
        for (i, (_, a)) in rules.iter().enumerate() {
            for (_, b) in rules.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }
}
