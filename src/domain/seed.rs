//! Initial-state strategies for layer 0 of a session.

use std::fmt;

use rand::Rng;

use super::Grid;

/// How the seed layer is filled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum InitialMode {
    /// Every cell independently alive with probability `soup_density`
    #[default]
    Soup,
    /// Only the exact center cell alive
    Single,
}

impl InitialMode {
    pub fn toggled(self) -> Self {
        match self {
            InitialMode::Soup => InitialMode::Single,
            InitialMode::Single => InitialMode::Soup,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            InitialMode::Soup => "Soup",
            InitialMode::Single => "Single",
        }
    }

    /// Build the seed grid.
    /// `density` is only consulted in soup mode and is validated upstream.
    pub fn seed<R: Rng + ?Sized>(self, size: usize, density: f32, rng: &mut R) -> Grid {
        match self {
            InitialMode::Single => single(size),
            InitialMode::Soup => soup(size, density, rng),
        }
    }
}

impl fmt::Display for InitialMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// All-dead grid with the center cell `(n/2, n/2)` alive
pub fn single(size: usize) -> Grid {
    let center = size / 2;
    Grid::with_alive(size, [(center, center)])
}

/// Random soup: each cell alive with probability `density`
pub fn soup<R: Rng + ?Sized>(size: usize, density: f32, rng: &mut R) -> Grid {
    let mut grid = Grid::new(size);
    for row in 0..size {
        for col in 0..size {
            if rng.random::<f32>() < density {
                grid.set(row, col, true);
            }
        }
    }
    grid
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_single_has_one_centered_cell() {
        for n in [1, 2, 3, 21, 64, 65, 101] {
            let grid = single(n);
            assert_eq!(grid.population(), 1, "size {}", n);
            assert!(grid.get(n / 2, n / 2), "size {}", n);
        }
    }

    #[test]
    fn test_full_density_fills_grid() {
        let mut rng = StdRng::seed_from_u64(7);
        let grid = soup(21, 1.0, &mut rng);
        assert_eq!(grid.population(), 21 * 21);
    }

    #[test]
    fn test_soup_density_is_roughly_respected() {
        let mut rng = StdRng::seed_from_u64(42);
        let grid = soup(101, 0.15, &mut rng);
        let ratio = grid.population() as f32 / (101.0 * 101.0);
        assert!((0.12..0.18).contains(&ratio), "ratio was {}", ratio);
    }

    #[test]
    fn test_seeded_soup_is_reproducible() {
        let a = soup(33, 0.4, &mut StdRng::seed_from_u64(9));
        let b = soup(33, 0.4, &mut StdRng::seed_from_u64(9));
        let c = soup(33, 0.4, &mut StdRng::seed_from_u64(10));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_mode_dispatch_and_toggle() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(InitialMode::Single.seed(5, 1.0, &mut rng), single(5));
        assert_eq!(InitialMode::Soup.seed(5, 1.0, &mut rng).population(), 25);
        assert_eq!(InitialMode::Soup.toggled(), InitialMode::Single);
        assert_eq!(InitialMode::default(), InitialMode::Soup);
    }
}
