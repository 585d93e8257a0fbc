use std::sync::Arc;

use super::Grid;

/// Append-only stack of generations. Layer 0 is the seed.
///
/// Layers are shared as `Arc<Grid>` and never modified after being pushed,
/// so readers can hold a snapshot while the writer keeps appending.
#[derive(Clone, Debug)]
pub struct History {
    layers: Vec<Arc<Grid>>,
    max_generations: usize,
}

impl History {
    /// Start a history from its seed layer
    pub fn new(seed: Grid, max_generations: usize) -> Self {
        debug_assert!(max_generations >= 1);
        let mut layers = Vec::with_capacity(max_generations);
        layers.push(Arc::new(seed));
        Self {
            layers,
            max_generations,
        }
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Always false, a history holds at least its seed
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn max_generations(&self) -> usize {
        self.max_generations
    }

    /// True once no more layers will be accepted
    pub fn is_full(&self) -> bool {
        self.layers.len() >= self.max_generations
    }

    pub fn grid_size(&self) -> usize {
        self.layers[0].size()
    }

    /// Newest layer
    pub fn latest(&self) -> &Arc<Grid> {
        &self.layers[self.layers.len() - 1]
    }

    pub fn layer(&self, index: usize) -> Option<&Grid> {
        self.layers.get(index).map(Arc::as_ref)
    }

    pub fn layers(&self) -> &[Arc<Grid>] {
        &self.layers
    }

    /// Cheap consistent copy for readers on other threads
    pub fn snapshot(&self) -> Vec<Arc<Grid>> {
        self.layers.clone()
    }

    /// Append a generation. Returns false (and drops the grid) at the cap.
    pub fn push(&mut self, grid: Grid) -> bool {
        debug_assert_eq!(
            grid.size(),
            self.grid_size(),
            "appended grid does not match history grid size"
        );
        if self.is_full() {
            return false;
        }
        self.layers.push(Arc::new(grid));
        true
    }

    /// Live cells per layer
    pub fn populations(&self) -> Vec<usize> {
        self.layers.iter().map(|g| g.population()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_with_seed() {
        let history = History::new(Grid::with_alive(5, [(2, 2)]), 4);
        assert_eq!(history.len(), 1);
        assert!(!history.is_empty());
        assert_eq!(history.grid_size(), 5);
        assert!(history.latest().get(2, 2));
    }

    #[test]
    fn test_never_exceeds_cap() {
        let mut history = History::new(Grid::new(5), 3);
        assert!(history.push(Grid::new(5)));
        assert!(history.push(Grid::new(5)));
        assert!(history.is_full());
        for _ in 0..10 {
            assert!(!history.push(Grid::new(5)));
        }
        assert_eq!(history.len(), 3);
    }

    #[test]
    fn test_cap_of_one_holds_only_seed() {
        let mut history = History::new(Grid::new(3), 1);
        assert!(history.is_full());
        assert!(!history.push(Grid::new(3)));
    }

    #[test]
    fn test_snapshot_is_unaffected_by_later_pushes() {
        let mut history = History::new(Grid::new(3), 8);
        let snapshot = history.snapshot();
        history.push(Grid::with_alive(3, [(0, 0)]));
        assert_eq!(snapshot.len(), 1);
        assert_eq!(history.len(), 2);
        assert!(Arc::ptr_eq(&snapshot[0], &history.layers()[0]));
    }

    #[test]
    fn test_populations_per_layer() {
        let mut history = History::new(Grid::with_alive(3, [(0, 0)]), 8);
        history.push(Grid::with_alive(3, [(0, 0), (1, 1)]));
        assert_eq!(history.populations(), vec![1, 2]);
        assert_eq!(history.layer(1).map(Grid::population), Some(2));
        assert!(history.layer(2).is_none());
    }
}
