use super::rules::RuleSet;
use rayon::prelude::*;

/// One generation of the automaton: a square toroidal grid of booleans.
///
/// Cells are addressed as `(row, col)` and every neighbor lookup wraps
/// modulo the side length, so opposite edges are adjacent. Grids are
/// produced whole by [`Grid::evolve`] and never edited once they enter
/// the history.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Grid {
    size: usize,
    cells: Vec<bool>,
}

impl Grid {
    /// Create a new grid with all cells dead
    pub fn new(size: usize) -> Self {
        debug_assert!(size >= 1, "grid size must be at least 1");
        Self {
            size,
            cells: vec![false; size * size],
        }
    }

    /// Create a grid from alive cell coordinates
    pub fn with_alive(size: usize, alive: impl IntoIterator<Item = (usize, usize)>) -> Self {
        let mut grid = Self::new(size);
        alive.into_iter().for_each(|(row, col)| grid.set(row, col, true));
        grid
    }

    /// Side length
    pub const fn size(&self) -> usize {
        self.size
    }

    const fn index(&self, row: usize, col: usize) -> usize {
        row * self.size + col
    }

    /// Cell state; out-of-range coordinates read as dead
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> bool {
        row < self.size && col < self.size && self.cells[self.index(row, col)]
    }

    /// Set a cell (only used while building a grid)
    pub fn set(&mut self, row: usize, col: usize, alive: bool) {
        if row < self.size && col < self.size {
            let idx = self.index(row, col);
            self.cells[idx] = alive;
        }
    }

    /// Row-major view of all cells
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    /// Count live neighbors using toroidal wrapping
    pub fn count_live_neighbors(&self, row: usize, col: usize) -> u8 {
        let n = self.size as isize;

        (-1..=1)
            .flat_map(|dr| (-1..=1).map(move |dc| (dr, dc)))
            .filter(|&(dr, dc)| dr != 0 || dc != 0)
            .filter(|&(dr, dc)| {
                let r = (row as isize + dr).rem_euclid(n) as usize;
                let c = (col as isize + dc).rem_euclid(n) as usize;
                self.cells[self.index(r, c)]
            })
            .count() as u8
    }

    #[inline]
    fn next_cell(&self, row: usize, col: usize, rules: &RuleSet) -> bool {
        rules.next_state(self.get(row, col), self.count_live_neighbors(row, col))
    }

    /// Pure evolution - returns the next generation (serial)
    pub fn evolve(&self, rules: &RuleSet) -> Self {
        let cells = (0..self.size)
            .flat_map(|row| (0..self.size).map(move |col| (row, col)))
            .map(|(row, col)| self.next_cell(row, col, rules))
            .collect();

        Self { size: self.size, cells }
    }

    /// Parallel evolution using rayon, one task per row.
    /// Produces exactly the same grid as [`Grid::evolve`].
    pub fn evolve_parallel(&self, rules: &RuleSet) -> Self {
        let size = self.size;
        let cells = (0..size)
            .into_par_iter()
            .flat_map_iter(|row| (0..size).map(move |col| self.next_cell(row, col, rules)))
            .collect();

        Self { size, cells }
    }

    /// Count total alive cells
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    /// Iterate over all cells with their positions, row-major
    pub fn iter_cells(&self) -> impl Iterator<Item = (usize, usize, bool)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, &alive)| (i / self.size, i % self.size, alive))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conway() -> RuleSet {
        RuleSet::conway()
    }

    #[test]
    fn test_get_set_and_bounds() {
        let mut grid = Grid::new(5);
        assert!(!grid.get(2, 2));
        grid.set(2, 2, true);
        assert!(grid.get(2, 2));
        // Out of bounds reads dead, writes are ignored
        grid.set(5, 0, true);
        assert!(!grid.get(5, 0));
        assert_eq!(grid.population(), 1);
    }

    #[test]
    fn test_diagonal_wrap_counts_neighbor() {
        let n = 7;
        let grid = Grid::with_alive(n, [(0, 0), (n - 1, n - 1)]);
        assert_eq!(grid.count_live_neighbors(0, 0), 1);
        assert_eq!(grid.count_live_neighbors(n - 1, n - 1), 1);
    }

    #[test]
    fn test_horizontal_wrap_counts_neighbor() {
        let n = 7;
        let grid = Grid::with_alive(n, [(0, 0), (0, n - 1)]);
        assert_eq!(grid.count_live_neighbors(0, 0), 1);
        assert_eq!(grid.count_live_neighbors(0, n - 1), 1);
    }

    #[test]
    fn test_lone_center_cell_dies() {
        let grid = Grid::with_alive(3, [(1, 1)]);
        let next = grid.evolve(&conway());
        assert_eq!(next.population(), 0);
    }

    #[test]
    fn test_blinker_evolution() {
        let grid = Grid::with_alive(10, [(5, 4), (5, 5), (5, 6)]);

        let next = grid.evolve(&conway());
        assert!(next.get(4, 5));
        assert!(next.get(5, 5));
        assert!(next.get(6, 5));
        assert!(!next.get(5, 4));
        assert_eq!(next.population(), 3);

        let next2 = next.evolve(&conway());
        assert_eq!(next2, grid);
    }

    #[test]
    fn test_block_still_life() {
        let grid = Grid::with_alive(9, [(4, 4), (4, 5), (5, 4), (5, 5)]);
        let mut current = grid.clone();
        for _ in 0..10 {
            current = current.evolve(&conway());
            assert_eq!(current, grid);
        }
    }

    #[test]
    fn test_block_across_the_seam_is_stable() {
        // A block split over all four corners only exists because of wrapping
        let n = 8;
        let grid = Grid::with_alive(n, [(0, 0), (0, n - 1), (n - 1, 0), (n - 1, n - 1)]);
        assert_eq!(grid.evolve(&conway()), grid);
    }

    #[test]
    fn test_evolve_is_deterministic() {
        let grid = Grid::with_alive(15, (0..40).map(|i| ((i * 7) % 15, (i * 11) % 15)));
        let rules = RuleSet::high_life();
        assert_eq!(grid.evolve(&rules), grid.evolve(&rules));
    }

    #[test]
    fn test_parallel_matches_serial() {
        let grid = Grid::with_alive(31, (0..200).map(|i| ((i * 13) % 31, (i * 7) % 31)));
        for (_, rules) in crate::domain::all_rules() {
            assert_eq!(grid.evolve(&rules), grid.evolve_parallel(&rules));
        }
    }

    #[test]
    fn test_single_cell_grid_is_its_own_neighbor() {
        // On a 1x1 torus every offset wraps back onto the cell itself
        let grid = Grid::with_alive(1, [(0, 0)]);
        assert_eq!(grid.count_live_neighbors(0, 0), 8);
        let rules = RuleSet::from_digits("8", "");
        assert!(grid.evolve(&rules).get(0, 0));
    }

    #[test]
    fn test_iter_cells_row_major() {
        let grid = Grid::with_alive(3, [(1, 2)]);
        let alive: Vec<_> = grid.iter_cells().filter(|c| c.2).collect();
        assert_eq!(alive, vec![(1, 2, true)]);
        assert_eq!(grid.iter_cells().count(), 9);
    }
}
