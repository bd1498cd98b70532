use std::collections::VecDeque;

use crate::geometry::WeightedPoint;

/// Number of points the window retains; also caps the order of the
/// emitted curve (four points drive one cubic segment).
pub const WINDOW_CAPACITY: usize = 4;

// ============================================================================
// SEGMENT EVENTS
// ============================================================================

/// Ribbon construction rule selected by the current window length.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SegmentKind {
    Dot,
    Line,
    QuadCurve,
    CubicCurve,
}

impl SegmentKind {
    fn for_len(len: usize) -> SegmentKind {
        match len {
            0 | 1 => SegmentKind::Dot,
            2 => SegmentKind::Line,
            3 => SegmentKind::QuadCurve,
            _ => SegmentKind::CubicCurve,
        }
    }
}

/// One ribbon segment to build: a snapshot of the window in arrival order
/// plus whether the segment is permanent (`finalized`) or a still-revisable
/// preview.
#[derive(Clone, Debug)]
pub struct SegmentEvent {
    pub kind: SegmentKind,
    pub points: Vec<WeightedPoint>,
    pub finalized: bool,
}

// ============================================================================
// STROKE WINDOW
// ============================================================================

/// Bounded FIFO of the most recent weighted points of the active gesture.
///
/// Advancing the window emits events synchronously in call order; there
/// is no event loop, the caller routes the returned events itself:
///
/// - length 0→1: `Dot`, 1→2: `Line`, 2→3: `QuadCurve`, 3→4: `CubicCurve`,
///   all previews (their far endpoint is still subject to revision);
/// - at capacity, each new point first re-emits the outgoing window as a
///   finalized `CubicCurve` (no later event can cover the evicted point's
///   span), then evicts the oldest point and emits the new window as the
///   next preview.
pub struct StrokeWindow {
    points: VecDeque<WeightedPoint>,
}

impl StrokeWindow {
    pub fn new() -> Self {
        Self {
            points: VecDeque::with_capacity(WINDOW_CAPACITY),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Empties the window at gesture start.
    pub fn reset(&mut self) {
        self.points.clear();
    }

    /// Feeds one accepted sample and returns the emitted events in order.
    pub fn add_point(&mut self, point: WeightedPoint) -> Vec<SegmentEvent> {
        let mut events = Vec::with_capacity(2);
        if self.points.len() == WINDOW_CAPACITY {
            events.push(self.event(true));
            self.points.pop_front();
        }
        self.points.push_back(point);
        events.push(self.event(false));
        events
    }

    /// Final finalized event for the remaining window content, emitted at
    /// gesture end (release and cancellation alike). Empties the window.
    pub fn flush(&mut self) -> Option<SegmentEvent> {
        let event = if self.points.is_empty() {
            None
        } else {
            Some(self.event(true))
        };
        self.points.clear();
        event
    }

    fn event(&self, finalized: bool) -> SegmentEvent {
        SegmentEvent {
            kind: SegmentKind::for_len(self.points.len()),
            points: self.points.iter().copied().collect(),
            finalized,
        }
    }
}

impl Default for StrokeWindow {
    fn default() -> Self {
        Self::new()
    }
}
