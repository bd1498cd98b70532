use egui::{Color32, Pos2, pos2};
use serde::{Deserialize, Serialize};

// ============================================================================
// PATH COMMANDS
// ============================================================================

/// Control-point distance for approximating a quarter circle with one
/// cubic segment.
const CIRCLE_KAPPA: f32 = 0.552_284_75;

/// One step of an abstract filled path. The engine emits command
/// sequences instead of calling into any drawing API; the rendering
/// backend translates them into its own shape representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCommand {
    MoveTo(Pos2),
    LineTo(Pos2),
    QuadTo { ctrl: Pos2, to: Pos2 },
    CubicTo { ctrl1: Pos2, ctrl2: Pos2, to: Pos2 },
    Close,
}

/// Appends a full circle as four cubic arcs, so dots stay inside the
/// plain path-command vocabulary.
pub fn push_circle(out: &mut Vec<PathCommand>, center: Pos2, radius: f32) {
    let (cx, cy) = (center.x, center.y);
    let r = radius;
    let k = radius * CIRCLE_KAPPA;
    out.push(PathCommand::MoveTo(pos2(cx + r, cy)));
    out.push(PathCommand::CubicTo {
        ctrl1: pos2(cx + r, cy + k),
        ctrl2: pos2(cx + k, cy + r),
        to: pos2(cx, cy + r),
    });
    out.push(PathCommand::CubicTo {
        ctrl1: pos2(cx - k, cy + r),
        ctrl2: pos2(cx - r, cy + k),
        to: pos2(cx - r, cy),
    });
    out.push(PathCommand::CubicTo {
        ctrl1: pos2(cx - r, cy - k),
        ctrl2: pos2(cx - k, cy - r),
        to: pos2(cx, cy - r),
    });
    out.push(PathCommand::CubicTo {
        ctrl1: pos2(cx + k, cy - r),
        ctrl2: pos2(cx + r, cy - k),
        to: pos2(cx + r, cy),
    });
    out.push(PathCommand::Close);
}

// ============================================================================
// STROKE STYLE
// ============================================================================

/// Fill style for one stroke, captured at gesture start and constant for
/// the stroke's lifetime. Serializable so host applications can persist
/// their tool settings.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    pub color: Color32,
    /// Opacity in [0, 1].
    pub alpha: f32,
    /// Full stroke width in device pixels; point weights are half of this.
    pub width: f32,
}

impl StrokeStyle {
    /// The color with `alpha` folded in, ready for a fill.
    pub fn fill_color(&self) -> Color32 {
        let a = (self.alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
        Color32::from_rgba_unmultiplied(self.color.r(), self.color.g(), self.color.b(), a)
    }
}

// ============================================================================
// RIBBON SHAPE
// ============================================================================

/// A closed, filled path plus its style. One `RibbonShape` accumulates
/// every finalized segment of one gesture on the committed layer; the
/// preview layer holds at most one, wholly replaced per sample.
#[derive(Clone, Debug, PartialEq)]
pub struct RibbonShape {
    pub commands: Vec<PathCommand>,
    pub style: StrokeStyle,
}

impl RibbonShape {
    pub fn new(style: StrokeStyle) -> Self {
        Self {
            commands: Vec::new(),
            style,
        }
    }

    pub fn with_commands(commands: Vec<PathCommand>, style: StrokeStyle) -> Self {
        Self { commands, style }
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
