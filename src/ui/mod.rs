mod button;

pub use button::Button;

use macroquad::prelude::{screen_height, screen_width};

use crate::application::{Command, RuleEditor, RuleField, Session};

pub const PANEL_WIDTH: f32 = 200.0;
pub const BUTTON_HEIGHT: f32 = 32.0;
const BUTTON_MARGIN: f32 = 10.0;

/// Get the X position where the panel starts (right side)
pub fn panel_x() -> f32 {
    screen_width() - PANEL_WIDTH
}

/// Width of the 3D view left of the panel
pub fn scene_width() -> f32 {
    screen_width() - PANEL_WIDTH
}

pub fn scene_height() -> f32 {
    screen_height()
}

/// True when the point lies over the side panel
pub fn over_panel(point: (f32, f32)) -> bool {
    point.0 >= panel_x()
}

/// Panel buttons; labels reflect the current session and rule editor
pub fn create_buttons(session: &Session, paused: bool, editor: &RuleEditor) -> Vec<Button> {
    let x = panel_x() + BUTTON_MARGIN;
    let width = PANEL_WIDTH - 2.0 * BUTTON_MARGIN;
    let row = |i: usize| BUTTON_MARGIN + i as f32 * (BUTTON_HEIGHT + 6.0);
    let mode = session.config().initial_mode;
    let rule_field = |i: usize, field: RuleField| {
        let cursor = if editor.editing() == Some(field) { "_" } else { "" };
        let label = format!("{}: {}{}", field.label(), editor.text(field), cursor);
        Button::new(x, row(i), width, BUTTON_HEIGHT, label, Command::EditRule(field))
    };

    vec![
        Button::new(x, row(0), width, BUTTON_HEIGHT, "Restart", Command::Restart),
        Button::new(x, row(1), width, BUTTON_HEIGHT, format!("Seed: {}", mode), Command::ToggleInitialMode),
        Button::new(
            x,
            row(2),
            width,
            BUTTON_HEIGHT,
            if paused { "Resume" } else { "Pause" },
            Command::TogglePause,
        ),
        rule_field(3, RuleField::Survival),
        rule_field(4, RuleField::Birth),
    ]
}
