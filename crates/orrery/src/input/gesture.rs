use glam::Vec2;

/// Pointer travel (pixels) before a press becomes a drag.
pub const DRAG_THRESHOLD: f32 = 5.0;

/// What a pointer event amounted to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    /// Pointer moved while dragging; `delta` is the move since the last event.
    Drag { delta: Vec2 },
    /// Pointer released without exceeding the drag threshold.
    Click { at: Vec2 },
}

/// Tells clicks from drags for one pointer.
#[derive(Debug, Clone, Default)]
pub struct PointerTracker {
    pressed: Option<Vec2>,
    last: Vec2,
    dragging: bool,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn down(&mut self, at: Vec2) {
        self.pressed = Some(at);
        self.last = at;
        self.dragging = false;
    }

    pub fn moved(&mut self, at: Vec2) -> Option<Gesture> {
        let start = self.pressed?;
        if !self.dragging && at.distance(start) > DRAG_THRESHOLD {
            self.dragging = true;
        }
        let delta = at - self.last;
        self.last = at;
        self.dragging.then_some(Gesture::Drag { delta })
    }

    pub fn up(&mut self, at: Vec2) -> Option<Gesture> {
        let start = self.pressed.take()?;
        let was_drag = self.dragging || at.distance(start) > DRAG_THRESHOLD;
        self.dragging = false;
        (!was_drag).then_some(Gesture::Click { at })
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_wobble_is_still_a_click() {
        let mut t = PointerTracker::new();
        t.down(Vec2::new(100.0, 100.0));
        assert_eq!(t.moved(Vec2::new(102.0, 101.0)), None);
        assert_eq!(t.up(Vec2::new(102.0, 101.0)), Some(Gesture::Click { at: Vec2::new(102.0, 101.0) }));
    }

    #[test]
    fn long_move_is_a_drag() {
        let mut t = PointerTracker::new();
        t.down(Vec2::ZERO);
        assert_eq!(t.moved(Vec2::new(10.0, 0.0)), Some(Gesture::Drag { delta: Vec2::new(10.0, 0.0) }));
        assert!(t.is_dragging());
        assert_eq!(t.moved(Vec2::new(12.0, 0.0)), Some(Gesture::Drag { delta: Vec2::new(2.0, 0.0) }));
        // Coming back near the start does not turn it into a click.
        assert_eq!(t.up(Vec2::new(1.0, 0.0)), None);
        assert!(!t.is_dragging());
    }

    #[test]
    fn move_or_up_without_press_is_ignored() {
        let mut t = PointerTracker::new();
        assert_eq!(t.moved(Vec2::new(50.0, 50.0)), None);
        assert_eq!(t.up(Vec2::new(50.0, 50.0)), None);
    }
}
