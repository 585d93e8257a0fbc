//! Turns the generation history into per-frame voxel instances.
//!
//! Every frame the whole history is re-scanned in `(layer, x, z)` order.
//! A cell becomes an instance when it is alive and its center lies inside
//! the camera frustum. Layers are scanned in parallel and concatenated in
//! layer order, so the output is identical to a serial scan.

use std::sync::Arc;

use macroquad::color::Color;
use macroquad::math::{Mat4, Vec3};
use rayon::prelude::*;

use super::frustum::Frustum;
use super::palette::Palette;
use crate::domain::Grid;

/// Grid coordinate of a voxel: which layer, and which row (`x`) / column (`z`)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellRef {
    pub layer: usize,
    pub x: usize,
    pub z: usize,
}

/// One drawable voxel
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VoxelInstance {
    pub position: Vec3,
    pub color: Color,
}

/// Offset that centers a grid of this size on the origin
pub fn center_offset(grid_size: usize) -> isize {
    (grid_size / 2) as isize
}

/// World-space center of a cell
pub fn world_position(cell: CellRef, grid_size: usize) -> Vec3 {
    let offset = center_offset(grid_size);
    Vec3::new(
        (cell.x as isize - offset) as f32,
        cell.layer as f32,
        (cell.z as isize - offset) as f32,
    )
}

/// Inverse of [`world_position`], rounding to the nearest cell.
/// Returns None for positions outside the volume.
pub fn cell_at(position: Vec3, grid_size: usize, layer_count: usize) -> Option<CellRef> {
    let offset = center_offset(grid_size);
    let layer = position.y.round() as isize;
    let x = position.x.round() as isize + offset;
    let z = position.z.round() as isize + offset;
    let n = grid_size as isize;

    (layer >= 0 && (layer as usize) < layer_count && (0..n).contains(&x) && (0..n).contains(&z))
        .then(|| CellRef {
            layer: layer as usize,
            x: x as usize,
            z: z as usize,
        })
}

/// The instance batch for one rendered frame
#[derive(Clone, Debug, Default)]
pub struct Frame {
    instances: Vec<VoxelInstance>,
    cells: Vec<CellRef>,
    grid_size: usize,
    layer_count: usize,
}

impl Frame {
    pub fn instances(&self) -> &[VoxelInstance] {
        &self.instances
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Grid cell behind the instance at `index`
    pub fn cell(&self, index: usize) -> Option<CellRef> {
        self.cells.get(index).copied()
    }

    /// Grid cell for a world position reported by a hit test
    pub fn resolve(&self, position: Vec3) -> Option<CellRef> {
        cell_at(position, self.grid_size, self.layer_count)
    }

    pub fn positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.instances.iter().map(|i| i.position)
    }
}

/// Build the instance list for one frame
pub fn build_frame(layers: &[Arc<Grid>], palette: &Palette, view_projection: &Mat4) -> Frame {
    let Some(first) = layers.first() else {
        return Frame::default();
    };
    let grid_size = first.size();
    let frustum = Frustum::from_view_projection(view_projection);

    let per_layer: Vec<Vec<(VoxelInstance, CellRef)>> = layers
        .par_iter()
        .enumerate()
        .map(|(layer, grid)| layer_instances(layer, grid, palette, &frustum))
        .collect();

    let total = per_layer.iter().map(Vec::len).sum();
    let mut instances = Vec::with_capacity(total);
    let mut cells = Vec::with_capacity(total);
    for (instance, cell) in per_layer.into_iter().flatten() {
        instances.push(instance);
        cells.push(cell);
    }

    log::trace!("built frame from {} layers: {} instances", layers.len(), total);

    Frame {
        instances,
        cells,
        grid_size,
        layer_count: layers.len(),
    }
}

fn layer_instances(
    layer: usize,
    grid: &Grid,
    palette: &Palette,
    frustum: &Frustum,
) -> Vec<(VoxelInstance, CellRef)> {
    let n = grid.size();
    grid.iter_cells()
        .filter(|&(_, _, alive)| alive)
        .filter_map(|(x, z, _)| {
            let cell = CellRef { layer, x, z };
            let position = world_position(cell, n);
            frustum.contains_point(position).then(|| {
                let color = palette.get(layer, x, z);
                (VoxelInstance { position, color }, cell)
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Camera far above the volume looking straight down, wide enough to
    /// see everything
    fn overview() -> Mat4 {
        let proj = Mat4::perspective_rh_gl(90f32.to_radians(), 1.0, 0.1, 1000.0);
        let view = Mat4::look_at_rh(Vec3::new(0.0, 200.0, 0.0), Vec3::ZERO, Vec3::Z);
        proj * view
    }

    fn history(grids: Vec<Grid>) -> (Vec<Arc<Grid>>, Palette) {
        let size = grids[0].size();
        let mut palette = Palette::new(size);
        palette.extend_to(grids.len());
        (grids.into_iter().map(Arc::new).collect(), palette)
    }

    #[test]
    fn test_world_position_centers_grid() {
        let center = world_position(CellRef { layer: 3, x: 2, z: 2 }, 5);
        assert_eq!(center, Vec3::new(0.0, 3.0, 0.0));
        let corner = world_position(CellRef { layer: 0, x: 0, z: 4 }, 5);
        assert_eq!(corner, Vec3::new(-2.0, 0.0, 2.0));
    }

    #[test]
    fn test_cell_at_inverts_world_position() {
        let cell = CellRef { layer: 4, x: 1, z: 6 };
        let p = world_position(cell, 9);
        assert_eq!(cell_at(p, 9, 5), Some(cell));
        assert_eq!(cell_at(p + Vec3::new(0.3, -0.4, 0.2), 9, 5), Some(cell));
        // Layer not in history, or outside the grid
        assert_eq!(cell_at(p, 9, 4), None);
        assert_eq!(cell_at(Vec3::new(10.0, 0.0, 0.0), 9, 5), None);
    }

    #[test]
    fn test_only_live_cells_emitted() {
        let (layers, palette) = history(vec![
            Grid::with_alive(5, [(2, 2)]),
            Grid::with_alive(5, [(0, 0), (4, 4)]),
        ]);
        let frame = build_frame(&layers, &palette, &overview());

        assert_eq!(frame.len(), 3);
        for index in 0..frame.len() {
            let cell = frame.cell(index).unwrap();
            assert!(layers[cell.layer].get(cell.x, cell.z));
        }
    }

    #[test]
    fn test_fixed_traversal_order() {
        let (layers, palette) = history(vec![
            Grid::with_alive(5, [(3, 1), (1, 3)]),
            Grid::with_alive(5, [(0, 4), (0, 0)]),
        ]);
        let frame = build_frame(&layers, &palette, &overview());
        let cells: Vec<_> = (0..frame.len()).filter_map(|i| frame.cell(i)).collect();
        assert_eq!(
            cells,
            vec![
                CellRef { layer: 0, x: 1, z: 3 },
                CellRef { layer: 0, x: 3, z: 1 },
                CellRef { layer: 1, x: 0, z: 0 },
                CellRef { layer: 1, x: 0, z: 4 },
            ]
        );
    }

    #[test]
    fn test_positions_resolve_back_to_cells() {
        let (layers, palette) = history(vec![
            Grid::with_alive(7, [(1, 2), (6, 0)]),
            Grid::with_alive(7, [(3, 3)]),
        ]);
        let frame = build_frame(&layers, &palette, &overview());
        for (index, instance) in frame.instances().iter().enumerate() {
            assert_eq!(frame.resolve(instance.position), frame.cell(index));
        }
    }

    #[test]
    fn test_colors_come_from_palette() {
        let (layers, palette) = history(vec![Grid::new(5), Grid::with_alive(5, [(1, 2)])]);
        let frame = build_frame(&layers, &palette, &overview());
        assert_eq!(frame.instances()[0].color, palette.get(1, 1, 2));
    }

    #[test]
    fn test_culled_cells_are_skipped() {
        // Camera at +x looking further toward +x: only cells with x > 0 are in view
        let proj = Mat4::perspective_rh_gl(60f32.to_radians(), 1.0, 0.1, 100.0);
        let view = Mat4::look_at_rh(Vec3::new(0.5, 0.0, 0.0), Vec3::new(10.0, 0.0, 0.0), Vec3::Y);
        let vp = proj * view;
        let frustum = Frustum::from_view_projection(&vp);

        let all: Vec<(usize, usize)> = (0..11).flat_map(|x| (0..11).map(move |z| (x, z))).collect();
        let (layers, palette) = history(vec![Grid::with_alive(11, all)]);
        let frame = build_frame(&layers, &palette, &vp);

        assert!(!frame.is_empty());
        assert!(frame.len() < 121);
        for p in frame.positions() {
            assert!(frustum.contains_point(p));
            assert!(p.x > 0.0);
        }
    }

    #[test]
    fn test_empty_history_gives_empty_frame() {
        let frame = build_frame(&[], &Palette::new(5), &overview());
        assert!(frame.is_empty());
        assert_eq!(frame.cell(0), None);
    }
}
