//! Divider geometry and drag state for the before/after comparison.
//!
//! Mouse and touch handlers both feed `DividerDrag::pointer_move`, so the
//! math never depends on the input source.

/// Divider position when the comparison first renders, in percent.
pub const INITIAL_POSITION: f64 = 50.0;

/// Container bounds in viewport coordinates, read fresh for every move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainerGeometry {
    pub left: f64,
    pub width: f64,
}

impl ContainerGeometry {
    pub fn from_element(el: &web_sys::Element) -> Self {
        let rect = el.get_bounding_client_rect();
        Self {
            left: rect.left(),
            width: rect.width(),
        }
    }
}

/// Divider percentage for a pointer x coordinate, clamped to `[0, 100]`.
///
/// Returns `None` when the geometry cannot produce a position (zero or
/// non-finite width, non-finite x).
pub fn divider_position(client_x: f64, geometry: ContainerGeometry) -> Option<f64> {
    if !client_x.is_finite() || !geometry.left.is_finite() {
        return None;
    }
    if !geometry.width.is_finite() || geometry.width <= 0.0 {
        return None;
    }
    let percent = (client_x - geometry.left) / geometry.width * 100.0;
    Some(percent.clamp(0.0, 100.0))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Mouse,
    Touch,
}

/// Drag session state. Only one session, mouse or touch, is armed at a time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DividerDrag {
    position: f64,
    active: Option<PointerKind>,
}

impl Default for DividerDrag {
    fn default() -> Self {
        Self {
            position: INITIAL_POSITION,
            active: None,
        }
    }
}

impl DividerDrag {
    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    /// Arm dragging. Ignored while another session is armed.
    pub fn pointer_down(&mut self, kind: PointerKind) -> bool {
        if self.active.is_some() {
            return false;
        }
        self.active = Some(kind);
        true
    }

    /// Move the divider if `kind` owns the armed session. Returns whether the
    /// position was updated.
    pub fn pointer_move(
        &mut self,
        kind: PointerKind,
        client_x: f64,
        geometry: ContainerGeometry,
    ) -> bool {
        if self.active != Some(kind) {
            return false;
        }
        match divider_position(client_x, geometry) {
            Some(position) => {
                self.position = position;
                true
            }
            None => false,
        }
    }

    pub fn pointer_up(&mut self, kind: PointerKind) {
        if self.active == Some(kind) {
            self.active = None;
        }
    }
}
