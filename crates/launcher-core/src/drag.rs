//! Pointer-driven window dragging.

use serde::{Deserialize, Serialize};

use crate::models::WindowPosition;

/// When a dragged window position is written to the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PositionPersistence {
    #[default]
    OnDragEnd,
    EveryMove,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ActiveDrag {
    pointer_start: (i32, i32),
    window_origin: WindowPosition,
    last: WindowPosition,
}

/// Converts pointer screen coordinates into absolute window positions.
#[derive(Debug, Default)]
pub struct DragTracker {
    active: Option<ActiveDrag>,
}

impl DragTracker {
    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    pub fn begin(&mut self, pointer: (i32, i32), window_origin: WindowPosition) {
        self.active = Some(ActiveDrag {
            pointer_start: pointer,
            window_origin,
            last: window_origin,
        });
    }

    /// New window position for the pointer at `pointer`, or `None` when no
    /// drag is in progress.
    pub fn motion(&mut self, pointer: (i32, i32)) -> Option<WindowPosition> {
        let drag = self.active.as_mut()?;
        let dx = pointer.0.saturating_sub(drag.pointer_start.0);
        let dy = pointer.1.saturating_sub(drag.pointer_start.1);
        drag.last = WindowPosition::new(
            drag.window_origin.x.saturating_add(dx),
            drag.window_origin.y.saturating_add(dy),
        );
        Some(drag.last)
    }

    /// Ends the drag, returning the final position if the window moved.
    pub fn end(&mut self) -> Option<WindowPosition> {
        let drag = self.active.take()?;
        (drag.last != drag.window_origin).then_some(drag.last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn motion_is_relative_to_window_origin() {
        let mut tracker = DragTracker::default();
        tracker.begin((500, 400), WindowPosition::new(100, 100));

        assert_eq!(tracker.motion((510, 395)), Some(WindowPosition::new(110, 95)));
        assert_eq!(tracker.motion((450, 420)), Some(WindowPosition::new(50, 120)));
        assert_eq!(tracker.end(), Some(WindowPosition::new(50, 120)));
        assert!(!tracker.is_dragging());
    }

    #[test]
    fn click_without_motion_reports_nothing() {
        let mut tracker = DragTracker::default();
        tracker.begin((10, 10), WindowPosition::new(0, 0));
        assert_eq!(tracker.end(), None);
    }

    #[test]
    fn motion_without_drag_is_ignored() {
        let mut tracker = DragTracker::default();
        assert_eq!(tracker.motion((10, 10)), None);
        assert_eq!(tracker.end(), None);
    }
}
