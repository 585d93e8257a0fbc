mod frustum;
mod instances;
mod palette;
pub mod pick;

pub use frustum::Frustum;
pub use instances::{CellRef, Frame, VoxelInstance, build_frame, cell_at, center_offset, world_position};
pub use palette::{Palette, voxel_color};

use macroquad::prelude::*;

use crate::application::Session;
use crate::ui::{Button, PANEL_WIDTH, panel_x};

const BACKGROUND: Color = Color::new(0.067, 0.067, 0.071, 1.0);
const OUTLINE_COLOR: Color = WHITE;

pub fn clear() {
    clear_background(BACKGROUND);
}

/// Draw every instance of the frame as a unit cube.
/// Must be called with the 3D camera active.
pub fn draw_voxels(frame: &Frame) {
    for instance in frame.instances() {
        draw_cube(instance.position, Vec3::ONE, None, instance.color);
    }
}

/// Wireframe slab around the focused layer
pub fn draw_layer_outline(grid_size: usize, layer: usize) {
    let n = grid_size as f32;
    draw_cube_wires(vec3(0.0, layer as f32, 0.0), vec3(n, 1.0, n), OUTLINE_COLOR);
}

/// Format large numbers with K/M suffixes
fn format_number(n: usize) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1_000.0)
    } else {
        format!("{}", n)
    }
}

/// Draw control panel background
fn draw_panel_background() {
    draw_rectangle(
        panel_x(),
        0.0,
        PANEL_WIDTH,
        screen_height(),
        Color::from_rgba(30, 30, 30, 230),
    );
}

/// Helper to draw text labels
fn draw_text_label(text: &str, x: f32, y: f32, size: f32, color: Color) {
    draw_text(text, x, y, size, color);
}

/// Draw the side panel: buttons, session knobs and frame statistics.
/// Must be called with the default (2D) camera active.
pub fn draw_controls(
    session: &Session,
    paused: bool,
    visible_instances: usize,
    buttons: &[Button],
    mouse_pos: (f32, f32),
) {
    draw_panel_background();
    buttons.iter().for_each(|btn| btn.draw(mouse_pos));

    let px = panel_x() + 10.0;
    let config = session.config();
    let history = session.history();
    let value_color = Color::from_rgba(180, 180, 180, 255);
    let accent = Color::from_rgba(0, 255, 150, 255);

    let rows = [
        ("Rule", session.rules().to_string()),
        ("Seed", config.initial_mode.to_string()),
        ("Density", format!("{:.2}", config.soup_density)),
        ("Grid", format!("{0}x{0}", config.grid_size)),
        ("Tick", format!("{} ms", config.frame_delay.as_millis())),
        ("Layers", format!("{} / {}", history.len(), history.max_generations())),
        ("Voxels", format_number(visible_instances)),
    ];
    for (i, (label, value)) in rows.iter().enumerate() {
        let y = 215.0 + i as f32 * 36.0;
        draw_text_label(label, px, y, 16.0, WHITE);
        draw_text_label(value, px, y + 16.0, 16.0, value_color);
    }

    let focus = if session.selector().is_pinned() {
        format!("Layer {} (pinned)", session.focused_layer())
    } else {
        format!("Layer {} (auto)", session.focused_layer())
    };
    draw_text_label(&focus, px, 480.0, 18.0, accent);

    let (status, status_color) = if paused {
        ("Paused", Color::from_rgba(255, 165, 0, 255))
    } else if session.is_complete() {
        ("Complete", GRAY)
    } else {
        ("Running", Color::from_rgba(0, 255, 0, 255))
    };
    draw_text_label(status, px, 505.0, 16.0, status_color);
    draw_text_label(&format!("FPS: {}", get_fps()), px, 525.0, 14.0, GRAY);

    let help = [
        "Controls:",
        "LMB drag: Orbit",
        "Click voxel: Pick layer",
        "Wheel: Zoom",
        "R: Restart  M: Mode",
        "[ ]: Density",
        "- =: Grid size",
        ", .: Generations",
        "1-4: Rule preset",
        "Click S/B: Type digits 0-8",
        "Space: Pause",
        "Up/Down: Speed",
    ];
    for (i, line) in help.iter().enumerate() {
        let (size, color) = if i == 0 { (14.0, WHITE) } else { (12.0, GRAY) };
        draw_text_label(line, px, 555.0 + i as f32 * 14.0, size, color);
    }
}
