use macroquad::prelude::*;

use crate::application::{Command, OrbitCamera, RuleEditor};
use crate::domain::all_rules;
use crate::ui::Button;

/// Handle zoom with mouse wheel
pub fn handle_zoom(camera: &mut OrbitCamera) {
    let wheel = mouse_wheel().1;
    if wheel > 0.0 {
        camera.zoom_in(1.1);
    } else if wheel < 0.0 {
        camera.zoom_out(1.1);
    }
}

/// Press and release positions of a completed left click
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Release {
    pub down: Vec2,
    pub up: Vec2,
}

/// Tracks the left button between press and release.
/// Dragging orbits the camera; the release is handed back for picking.
#[derive(Default)]
pub struct PointerTracker {
    last: Option<Vec2>,
    pressed_at: Option<Vec2>,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update from this frame's mouse state.
    /// Presses that start over the panel are ignored.
    pub fn update(&mut self, camera: &mut OrbitCamera, mouse_pos: (f32, f32), over_panel: bool) -> Option<Release> {
        let pos = Vec2::new(mouse_pos.0, mouse_pos.1);

        if is_mouse_button_pressed(MouseButton::Left) && !over_panel {
            self.pressed_at = Some(pos);
            self.last = Some(pos);
        }

        if is_mouse_button_down(MouseButton::Left) {
            if let Some(last) = self.last {
                camera.orbit(pos - last);
                self.last = Some(pos);
            }
        }

        if is_mouse_button_released(MouseButton::Left) {
            self.last = None;
            return self.pressed_at.take().map(|down| Release { down, up: pos });
        }
        None
    }
}

/// Map this frame's key presses to commands
pub fn process_keyboard_input(camera: &mut OrbitCamera) -> Vec<Command> {
    let presets = all_rules();
    let preset = |i: usize| Command::SetRules(presets[i].1);

    let bindings: [(KeyCode, Command); 15] = [
        (KeyCode::R, Command::Restart),
        (KeyCode::M, Command::ToggleInitialMode),
        (KeyCode::LeftBracket, Command::DensityDown),
        (KeyCode::RightBracket, Command::DensityUp),
        (KeyCode::Minus, Command::GridSizeDown),
        (KeyCode::Equal, Command::GridSizeUp),
        (KeyCode::Comma, Command::GenerationsDown),
        (KeyCode::Period, Command::GenerationsUp),
        (KeyCode::Key1, preset(0)),
        (KeyCode::Key2, preset(1)),
        (KeyCode::Key3, preset(2)),
        (KeyCode::Key4, preset(3)),
        (KeyCode::Space, Command::TogglePause),
        (KeyCode::Up, Command::SpeedUp),
        (KeyCode::Down, Command::SpeedDown),
    ];

    // Reset camera with 'H' (home)
    if is_key_pressed(KeyCode::H) {
        camera.reset();
    }

    bindings
        .iter()
        .filter(|(key, _)| is_key_pressed(*key))
        .map(|&(_, command)| command)
        .collect()
}

/// Feed typed characters to the rule editor while a field is focused.
/// Enter, Escape or a click in the scene ends editing.
pub fn process_rule_typing(editor: &mut RuleEditor, over_panel: bool) -> Vec<Command> {
    let mut commands = Vec::new();
    while let Some(c) = get_char_pressed() {
        commands.extend(editor.type_char(c));
    }
    if is_key_pressed(KeyCode::Backspace) {
        commands.extend(editor.backspace());
    }
    if is_key_pressed(KeyCode::Enter)
        || is_key_pressed(KeyCode::Escape)
        || (is_mouse_button_pressed(MouseButton::Left) && !over_panel)
    {
        editor.finish();
    }
    commands
}

/// Commands from buttons clicked this frame
pub fn process_button_clicks(buttons: &[Button], mouse_pos: (f32, f32)) -> Vec<Command> {
    buttons
        .iter()
        .filter(|btn| btn.is_clicked(mouse_pos))
        .map(Button::command)
        .collect()
}
