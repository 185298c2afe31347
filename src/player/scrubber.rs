/// Where the pointer is relative to the timeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PointerState {
    #[default]
    Idle,
    Hovering,
    Dragging,
}

/// Horizontal geometry of the timeline in pointer units.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Timeline {
    pub left: f64,
    pub width: f64,
}

impl Timeline {
    pub fn new(left: f64, width: f64) -> Self {
        Self { left, width }
    }

    fn is_measurable(&self) -> bool {
        self.left.is_finite() && self.width.is_finite() && self.width > 0.0
    }

    /// Pointer offset from the left edge, clamped to `[0, width]`.
    pub fn offset(&self, pointer_x: f64) -> Option<f64> {
        if !self.is_measurable() || !pointer_x.is_finite() {
            return None;
        }
        Some((pointer_x - self.left).clamp(0.0, self.width))
    }

    pub fn fraction(&self, pointer_x: f64) -> Option<f64> {
        self.offset(pointer_x).map(|offset| offset / self.width)
    }

    /// Media time under the pointer, or `None` while the duration is unknown.
    pub fn seek_target(&self, pointer_x: f64, duration: f64) -> Option<f64> {
        if !(duration.is_finite() && duration > 0.0) {
            return None;
        }
        self.fraction(pointer_x).map(|fraction| fraction * duration)
    }
}
