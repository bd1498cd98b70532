use crate::path::{PathCommand, RibbonShape, StrokeStyle};

// ============================================================================
// UNDO RESULT
// ============================================================================

/// Outcome of an undo request. Never an error: asking with nothing to
/// undo reports `Nothing`.
#[derive(Clone, Debug, PartialEq)]
pub enum Undo {
    /// The most recent completed gesture's shape, now removed.
    Removed(RibbonShape),
    /// No completed gesture existed; the in-flight gesture's committed
    /// content was discarded as a unit instead.
    DiscardedActive,
    /// Nothing to undo.
    Nothing,
}

// ============================================================================
// LAYER MANAGER
// ============================================================================

/// Exclusive owner of the two drawing buffers.
///
/// The preview layer holds at most one shape and is wholly replaced by
/// every preview segment; committed geometry is never redrawn through it.
/// The finalized layer is an append-only list of shapes, one per completed
/// gesture, each grown by command concatenation while its gesture runs.
/// External consumers read committed shapes between events only; nothing
/// here is shared during a mutation.
pub struct LayerManager {
    preview: Option<RibbonShape>,
    finalized: Vec<RibbonShape>,
    /// The in-flight gesture's shape; moves onto `finalized` at gesture end.
    open: Option<RibbonShape>,
}

impl LayerManager {
    pub fn new() -> Self {
        Self {
            preview: None,
            finalized: Vec::new(),
            open: None,
        }
    }

    /// Starts a fresh gesture: clears the preview slot and opens an empty
    /// shape for the gesture's finalized segments.
    pub fn begin_stroke(&mut self, style: StrokeStyle) {
        self.preview = None;
        self.open = Some(RibbonShape::new(style));
    }

    /// Replaces the preview layer's sole shape. Never touches committed
    /// content.
    pub fn set_preview(&mut self, commands: Vec<PathCommand>, style: StrokeStyle) {
        self.preview = Some(RibbonShape::with_commands(commands, style));
    }

    /// Appends a finalized segment's commands to the open shape. The
    /// preview slot is left as-is until the next event replaces it.
    pub fn commit(&mut self, commands: &[PathCommand]) {
        if let Some(open) = self.open.as_mut() {
            open.commands.extend_from_slice(commands);
        }
    }

    /// Files the open shape onto the finalized layer. A shape that never
    /// received a committed segment is dropped instead.
    pub fn end_stroke(&mut self) {
        if let Some(shape) = self.open.take()
            && !shape.is_empty()
        {
            self.finalized.push(shape);
        }
    }

    /// Removes the most recent completed shape; with none completed, the
    /// in-flight gesture's committed-so-far content is the undo unit.
    pub fn undo(&mut self) -> Undo {
        if let Some(shape) = self.finalized.pop() {
            return Undo::Removed(shape);
        }
        if let Some(open) = self.open.as_mut()
            && !open.commands.is_empty()
        {
            open.commands.clear();
            return Undo::DiscardedActive;
        }
        Undo::Nothing
    }

    /// Committed shapes, oldest first.
    pub fn shapes(&self) -> &[RibbonShape] {
        &self.finalized
    }

    pub fn preview(&self) -> Option<&RibbonShape> {
        self.preview.as_ref()
    }
}

impl Default for LayerManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{Color32, pos2};

    fn style() -> StrokeStyle {
        StrokeStyle {
            color: Color32::BLACK,
            alpha: 1.0,
            width: 10.0,
        }
    }

    fn segment(x: f32) -> Vec<PathCommand> {
        vec![
            PathCommand::MoveTo(pos2(x, 0.0)),
            PathCommand::LineTo(pos2(x + 1.0, 0.0)),
            PathCommand::Close,
        ]
    }

    #[test]
    fn preview_is_wholly_replaced_each_time() {
        let mut layers = LayerManager::new();
        layers.begin_stroke(style());
        layers.set_preview(segment(0.0), style());
        layers.set_preview(segment(9.0), style());
        let preview = layers.preview().unwrap();
        assert_eq!(preview.commands, segment(9.0));
        // Committing never goes through the preview slot.
        assert!(layers.shapes().is_empty());
    }

    #[test]
    fn commits_concatenate_into_one_shape_per_gesture() {
        let mut layers = LayerManager::new();
        layers.begin_stroke(style());
        layers.commit(&segment(0.0));
        layers.commit(&segment(5.0));
        layers.end_stroke();
        assert_eq!(layers.shapes().len(), 1);
        assert_eq!(layers.shapes()[0].commands.len(), 6);
    }

    #[test]
    fn commit_leaves_preview_untouched() {
        let mut layers = LayerManager::new();
        layers.begin_stroke(style());
        layers.set_preview(segment(0.0), style());
        layers.commit(&segment(5.0));
        assert_eq!(layers.preview().unwrap().commands, segment(0.0));
    }

    #[test]
    fn gesture_start_clears_stale_preview() {
        let mut layers = LayerManager::new();
        layers.begin_stroke(style());
        layers.set_preview(segment(0.0), style());
        layers.end_stroke();
        layers.begin_stroke(style());
        assert!(layers.preview().is_none());
    }

    #[test]
    fn empty_gesture_leaves_no_shape() {
        let mut layers = LayerManager::new();
        layers.begin_stroke(style());
        layers.end_stroke();
        assert!(layers.shapes().is_empty());
    }

    #[test]
    fn undo_removes_exactly_the_last_gesture_then_reports_nothing() {
        let mut layers = LayerManager::new();
        layers.begin_stroke(style());
        layers.commit(&segment(0.0));
        layers.end_stroke();

        let removed = layers.undo();
        assert!(matches!(removed, Undo::Removed(ref s) if s.commands == segment(0.0)));
        assert!(layers.shapes().is_empty());
        assert_eq!(layers.undo(), Undo::Nothing);
    }

    #[test]
    fn undo_discards_in_flight_content_when_nothing_is_completed() {
        let mut layers = LayerManager::new();
        layers.begin_stroke(style());
        layers.commit(&segment(0.0));
        assert_eq!(layers.undo(), Undo::DiscardedActive);
        // The in-flight content is gone as a unit, so the gesture files
        // nothing at its end.
        layers.end_stroke();
        assert!(layers.shapes().is_empty());
    }

    #[test]
    fn undo_prefers_completed_shapes_over_in_flight_content() {
        let mut layers = LayerManager::new();
        layers.begin_stroke(style());
        layers.commit(&segment(0.0));
        layers.end_stroke();
        layers.begin_stroke(style());
        layers.commit(&segment(5.0));
        assert!(matches!(layers.undo(), Undo::Removed(_)));
        layers.end_stroke();
        assert_eq!(layers.shapes().len(), 1);
        assert_eq!(layers.shapes()[0].commands, segment(5.0));
    }
}
