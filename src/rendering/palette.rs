use macroquad::color::{Color, hsl_to_rgb};

pub const SATURATION: f32 = 0.7;
pub const LIGHTNESS: f32 = 0.64;

/// Hue for a cell: a diagonal gradient across the grid that shifts with
/// height. Wrapped into `[0, 1)`.
pub fn hue(layer: usize, x: usize, z: usize, grid_size: usize) -> f32 {
    let sum = if layer == 0 { x + z } else { x + z + layer };
    (sum as f32 / (grid_size * 2) as f32).rem_euclid(1.0)
}

pub fn voxel_color(layer: usize, x: usize, z: usize, grid_size: usize) -> Color {
    hsl_to_rgb(hue(layer, x, z, grid_size), SATURATION, LIGHTNESS)
}

/// Per-cell colors, computed once per layer and reused every frame.
/// Colors depend only on `(layer, x, z)` and the grid size, so a layer's
/// entry never changes once computed.
#[derive(Clone, Debug, Default)]
pub struct Palette {
    grid_size: usize,
    layers: Vec<Vec<Color>>,
}

impl Palette {
    pub fn new(grid_size: usize) -> Self {
        Self {
            grid_size,
            layers: Vec::new(),
        }
    }

    /// Make sure colors exist for layers `0..layer_count`
    pub fn extend_to(&mut self, layer_count: usize) {
        let n = self.grid_size;
        while self.layers.len() < layer_count {
            let layer = self.layers.len();
            let colors = (0..n)
                .flat_map(|x| (0..n).map(move |z| voxel_color(layer, x, z, n)))
                .collect();
            self.layers.push(colors);
        }
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Cached color; falls back to computing it for layers not yet cached
    #[inline]
    pub fn get(&self, layer: usize, x: usize, z: usize) -> Color {
        match self.layers.get(layer) {
            Some(colors) => colors[x * self.grid_size + z],
            None => voxel_color(layer, x, z, self.grid_size),
        }
    }
}
