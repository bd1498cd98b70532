use egui::{Pos2, Vec2};

// ============================================================================
// WEIGHTED POINT
// ============================================================================

/// A sampled stroke point in device-pixel space.
///
/// `weight` is the stroke *half*-width at this point: the ribbon boundary
/// runs `weight` pixels to either side of `pos`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WeightedPoint {
    pub pos: Pos2,
    pub weight: f32,
}

impl WeightedPoint {
    pub fn new(pos: Pos2, weight: f32) -> Self {
        Self { pos, weight }
    }
}

// ============================================================================
// OFFSET LINES
// ============================================================================

/// The two lateral boundary points flanking one weighted point,
/// perpendicular to the local stroke direction. `a` and `b` sit on
/// opposite sides of the sample, each `weight` pixels away.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OffsetLine {
    pub a: Pos2,
    pub b: Pos2,
}

impl OffsetLine {
    /// Pointwise midpoint of two offset lines. Blending the far boundary
    /// of one segment with the near boundary of the next yields the single
    /// shared joint that keeps the ribbon seamless. `average(x, x) == x`.
    pub fn average(x: &OffsetLine, y: &OffsetLine) -> OffsetLine {
        OffsetLine {
            a: x.a.lerp(y.a, 0.5),
            b: x.b.lerp(y.b, 0.5),
        }
    }
}

/// Boundary edges of the ribbon segment between two consecutive weighted
/// points: `near` flanks the first point, `far` the second.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OffsetPair {
    pub near: OffsetLine,
    pub far: OffsetLine,
}

// ============================================================================
// OFFSET ENGINE
// ============================================================================

/// Computes the perpendicular ribbon boundaries for point pairs.
///
/// Stateful only for the degenerate-segment fallback: when two samples
/// coincide the segment has no direction of its own, so the most recent
/// valid direction is reused (or the +X axis before any segment has one).
/// The offset therefore never produces NaN coordinates.
pub struct OffsetEngine {
    last_dir: Vec2,
}

impl OffsetEngine {
    pub fn new() -> Self {
        Self {
            last_dir: Vec2::RIGHT,
        }
    }

    /// Forgets the carried direction at gesture start.
    pub fn reset(&mut self) {
        self.last_dir = Vec2::RIGHT;
    }

    /// Boundary edges of the ribbon segment from `a` to `b`.
    pub fn offset(&mut self, a: &WeightedPoint, b: &WeightedPoint) -> OffsetPair {
        let delta = b.pos - a.pos;
        if delta.length_sq() > 0.0 {
            self.last_dir = delta.normalized();
        }
        let n = Vec2::new(-self.last_dir.y, self.last_dir.x);
        OffsetPair {
            near: OffsetLine {
                a: a.pos + n * a.weight,
                b: a.pos - n * a.weight,
            },
            far: OffsetLine {
                a: b.pos + n * b.weight,
                b: b.pos - n * b.weight,
            },
        }
    }
}

impl Default for OffsetEngine {
    fn default() -> Self {
        Self::new()
    }
}
