//! Pointer drag tracking for board cards.
//!
//! A press on a card only becomes a drag once the pointer has travelled at
//! least the activation distance; releasing before that is a click. The
//! machine knows nothing about columns or the network: the caller resolves
//! the drop target and turns the returned [`DragOutcome`] into an intent.

/// Default activation distance, in terminal cells.
pub const ACTIVATION_DISTANCE: u16 = 2;

/// Pointer position in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: u16,
    pub y: u16,
}

impl Point {
    pub fn new(x: u16, y: u16) -> Self {
        Point { x, y }
    }

    /// Chebyshev distance; a diagonal step counts as one cell.
    fn distance(self, other: Point) -> u16 {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragState {
    Idle,
    /// Button is down on a card but the threshold has not been crossed.
    Pressed { task_id: u64, origin: Point },
    Dragging { task_id: u64, origin: Point, at: Point },
}

/// What a pointer release amounted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome<T> {
    /// Released without crossing the threshold.
    Click { task_id: u64 },
    /// Released over a drop target.
    Drop { task_id: u64, target: T },
    /// Released outside every target, or nothing was held.
    Cancelled,
}

#[derive(Debug, Clone)]
pub struct DragMachine {
    state: DragState,
    activation_distance: u16,
}

impl Default for DragMachine {
    fn default() -> Self {
        DragMachine::new(ACTIVATION_DISTANCE)
    }
}

impl DragMachine {
    pub fn new(activation_distance: u16) -> Self {
        DragMachine {
            state: DragState::Idle,
            activation_distance,
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> DragState {
        self.state
    }

    /// Task currently being dragged, once the threshold is crossed.
    pub fn dragging(&self) -> Option<(u64, Point)> {
        match self.state {
            DragState::Dragging { task_id, at, .. } => Some((task_id, at)),
            _ => None,
        }
    }

    pub fn pointer_down(&mut self, task_id: u64, at: Point) {
        self.state = DragState::Pressed { task_id, origin: at };
    }

    pub fn pointer_move(&mut self, at: Point) {
        self.state = match self.state {
            DragState::Pressed { task_id, origin } if origin.distance(at) >= self.activation_distance => {
                DragState::Dragging { task_id, origin, at }
            }
            DragState::Dragging { task_id, origin, .. } => DragState::Dragging { task_id, origin, at },
            other => other,
        };
    }

    /// Finish the gesture. `target` is the drop target under the pointer, if any.
    pub fn pointer_up<T>(&mut self, target: Option<T>) -> DragOutcome<T> {
        let outcome = match (self.state, target) {
            (DragState::Pressed { task_id, .. }, _) => DragOutcome::Click { task_id },
            (DragState::Dragging { task_id, .. }, Some(target)) => DragOutcome::Drop { task_id, target },
            _ => DragOutcome::Cancelled,
        };
        self.state = DragState::Idle;
        outcome
    }

    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_movement_is_a_click() {
        let mut drag = DragMachine::default();
        drag.pointer_down(3, Point::new(10, 10));
        drag.pointer_move(Point::new(11, 10));
        assert!(drag.dragging().is_none());
        assert_eq!(drag.pointer_up(Some("done")), DragOutcome::Click { task_id: 3 });
        assert_eq!(drag.state(), DragState::Idle);
    }

    #[test]
    fn test_drag_past_threshold_drops_on_target() {
        let mut drag = DragMachine::default();
        drag.pointer_down(3, Point::new(10, 10));
        drag.pointer_move(Point::new(12, 11));
        assert_eq!(drag.dragging(), Some((3, Point::new(12, 11))));
        drag.pointer_move(Point::new(40, 12));
        assert_eq!(drag.dragging(), Some((3, Point::new(40, 12))));

        assert_eq!(
            drag.pointer_up(Some(2usize)),
            DragOutcome::Drop { task_id: 3, target: 2 }
        );
    }

    #[test]
    fn test_drop_outside_targets_is_cancelled() {
        let mut drag = DragMachine::default();
        drag.pointer_down(1, Point::new(0, 0));
        drag.pointer_move(Point::new(5, 5));
        assert_eq!(drag.pointer_up::<usize>(None), DragOutcome::Cancelled);
    }

    #[test]
    fn test_release_without_press_is_cancelled() {
        let mut drag = DragMachine::default();
        drag.pointer_move(Point::new(5, 5));
        assert_eq!(drag.pointer_up(Some(1usize)), DragOutcome::Cancelled);
    }

    #[test]
    fn test_cancel_resets() {
        let mut drag = DragMachine::new(1);
        drag.pointer_down(1, Point::new(0, 0));
        drag.pointer_move(Point::new(1, 0));
        assert!(drag.dragging().is_some());
        drag.cancel();
        assert_eq!(drag.state(), DragState::Idle);
    }
}
