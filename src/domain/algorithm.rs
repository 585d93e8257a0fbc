//! Stepping strategies.
//!
//! Both strategies compute the same next generation; they differ only in
//! how the work is scheduled.

use super::{Grid, RuleSet};

/// Grids at or above this many cells are stepped in parallel by `Auto`
const PARALLEL_THRESHOLD: usize = 64 * 64;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Algorithm {
    /// Cell by cell on the calling thread
    Serial,
    /// Rows spread over the rayon pool
    Parallel,
    /// Serial for small grids, parallel for large ones
    #[default]
    Auto,
}

impl Algorithm {
    pub fn all() -> Vec<Algorithm> {
        vec![Algorithm::Serial, Algorithm::Parallel, Algorithm::Auto]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Serial => "Serial",
            Algorithm::Parallel => "Parallel",
            Algorithm::Auto => "Auto",
        }
    }
}

/// Advance one generation. Pure: same grid and rules give the same result.
pub fn step(grid: &Grid, rules: &RuleSet, algorithm: Algorithm) -> Grid {
    match algorithm {
        Algorithm::Serial => grid.evolve(rules),
        Algorithm::Parallel => grid.evolve_parallel(rules),
        Algorithm::Auto if grid.size() * grid.size() >= PARALLEL_THRESHOLD => {
            grid.evolve_parallel(rules)
        }
        Algorithm::Auto => grid.evolve(rules),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_are_unique() {
        let names: Vec<_> = Algorithm::all().iter().map(|a| a.name()).collect();
        let mut unique = names.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(names.len(), unique.len());
    }

    #[test]
    fn test_all_algorithms_agree() {
        for size in [21, 65, 101] {
            let grid = Grid::with_alive(size, (0..size * 3).map(|i| ((i * 5) % size, (i * 3) % size)));
            let rules = RuleSet::conway();
            let expected = step(&grid, &rules, Algorithm::Serial);
            for algorithm in Algorithm::all() {
                assert_eq!(step(&grid, &rules, algorithm), expected, "{}", algorithm.name());
            }
        }
    }
}
