//! Pointer drag tracking.

/// Tracks a press-drag-release gesture and reports horizontal motion.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DragState {
    dragging: bool,
    last: Option<(f64, f64)>,
}

impl DragState {
    /// Start a drag at `(x, y)`.
    pub fn press(&mut self, x: f64, y: f64) {
        self.dragging = true;
        self.last = Some((x, y));
    }

    /// End the drag.
    pub fn release(&mut self) {
        self.dragging = false;
        self.last = None;
    }

    /// Whether a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Record pointer motion; returns the horizontal delta while dragging.
    pub fn motion(&mut self, x: f64, y: f64) -> Option<f64> {
        if !self.dragging {
            return None;
        }
        let dx = self.last.map(|(last_x, _)| x - last_x);
        self.last = Some((x, y));
        dx
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drag_sequence() {
        let mut drag = DragState::default();
        assert_eq!(drag.motion(10.0, 0.0), None);

        drag.press(10.0, 5.0);
        assert_eq!(drag.motion(25.0, 9.0), Some(15.0));
        assert_eq!(drag.motion(20.0, 9.0), Some(-5.0));

        drag.release();
        assert!(!drag.is_dragging());
        assert_eq!(drag.motion(100.0, 0.0), None);
    }
}
