use macroquad::math::Vec2;

/// Pointer travel (in pixels, `|dx| + |dy|`) above which a click is a drag
pub const DRAG_THRESHOLD_PX: f32 = 2.0;

/// True when the pointer moved far enough between press and release to
/// count as a camera drag rather than a selection.
pub fn is_drag(down: Vec2, up: Vec2) -> bool {
    let delta = (up - down).abs();
    delta.x + delta.y > DRAG_THRESHOLD_PX
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SelectorState {
    /// Follow the newest layer
    #[default]
    Auto,
    /// Stay on a layer the user picked
    Pinned(usize),
}

/// Tracks which layer has focus.
///
/// Starts in `Auto`, following the newest layer as the history grows. The
/// first pick pins the focus for the rest of the session; only a new
/// session returns to `Auto`.
#[derive(Clone, Copy, Debug, Default)]
pub struct LayerSelector {
    state: SelectorState,
    latest: usize,
}

impl LayerSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SelectorState {
        self.state
    }

    pub fn is_pinned(&self) -> bool {
        matches!(self.state, SelectorState::Pinned(_))
    }

    pub fn focused(&self) -> usize {
        match self.state {
            SelectorState::Auto => self.latest,
            SelectorState::Pinned(layer) => layer,
        }
    }

    /// History grew (or was seeded) to `len` layers
    pub fn on_history_len(&mut self, len: usize) {
        self.latest = len.saturating_sub(1);
    }

    /// User picked a layer; always pins, whatever the previous state
    pub fn pin(&mut self, layer: usize) {
        self.state = SelectorState::Pinned(layer);
    }
}
