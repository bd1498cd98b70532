use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::layers::{LayerManager, Undo};
use crate::log_info;
use crate::path::{PathCommand, StrokeStyle};
use crate::ribbon::RibbonBuilder;
use crate::sampler::{Sampler, WeightModel};
use crate::window::{SegmentEvent, StrokeWindow};

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Engine configuration. `device_scale` is fixed for the engine's
/// lifetime; everything else may change between gestures, never
/// mid-stroke (the style is captured at gesture start).
///
/// Coordinates and `stroke_width` are logical units; the engine scales
/// both into device pixels.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub stroke_width: f32,
    pub stroke_color: Color32,
    pub stroke_alpha: f32,
    /// Minimum gap between accepted samples of one gesture.
    pub min_sample_interval_ms: u64,
    /// Weight smoothing factor: each accepted sample moves the weight
    /// this fraction of the way toward the model's target.
    pub smoothing: f32,
    pub min_weight: f32,
    pub max_weight: f32,
    /// Device pixels per logical unit, fixed at engine construction.
    pub device_scale: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            stroke_width: 10.0,
            stroke_color: Color32::BLACK,
            stroke_alpha: 1.0,
            min_sample_interval_ms: 10,
            smoothing: 0.3,
            min_weight: 0.5,
            max_weight: 256.0,
            device_scale: 1.0,
        }
    }
}

// ============================================================================
// OBSERVER
// ============================================================================

/// Synchronous sink for every segment the engine produces. A rendering
/// backend implements this to mirror engine output (and to learn a redraw
/// is due). Invoked in pointer-event order, never concurrently.
pub trait SegmentObserver {
    fn on_segment(&mut self, commands: &[PathCommand], style: &StrokeStyle, finalized: bool);
}

// ============================================================================
// INK ENGINE
// ============================================================================

/// The incremental stroke engine: wires the sampler, the four-point
/// window, the ribbon builder and the layer pair together behind the
/// gesture-level API (`begin_gesture` / `add_sample` / `end_gesture` /
/// `undo`).
///
/// Strictly single-threaded: calls are processed in order, nothing blocks
/// or suspends, and one gesture is active at a time. Malformed input in
/// one gesture never poisons the next; every recovery is local.
pub struct InkEngine {
    config: EngineConfig,
    style: StrokeStyle,
    sampler: Sampler,
    window: StrokeWindow,
    builder: RibbonBuilder,
    layers: LayerManager,
    observer: Option<Box<dyn SegmentObserver>>,
    active: bool,
}

impl InkEngine {
    pub fn new(config: EngineConfig) -> Self {
        let sampler = Sampler::new(
            config.device_scale,
            config.min_sample_interval_ms,
            config.smoothing,
            config.min_weight,
            config.max_weight,
        );
        let style = StrokeStyle {
            color: config.stroke_color,
            alpha: config.stroke_alpha,
            width: config.stroke_width * config.device_scale,
        };
        Self {
            config,
            style,
            sampler,
            window: StrokeWindow::new(),
            builder: RibbonBuilder::new(),
            layers: LayerManager::new(),
            observer: None,
            active: false,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn layers(&self) -> &LayerManager {
        &self.layers
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Applies from the next gesture; the running stroke keeps its style.
    pub fn set_stroke_width(&mut self, width: f32) {
        self.config.stroke_width = width;
    }

    pub fn set_stroke_color(&mut self, color: Color32) {
        self.config.stroke_color = color;
    }

    pub fn set_stroke_alpha(&mut self, alpha: f32) {
        self.config.stroke_alpha = alpha.clamp(0.0, 1.0);
    }

    pub fn set_min_sample_interval_ms(&mut self, interval: u64) {
        self.config.min_sample_interval_ms = interval;
        self.sampler.set_min_interval_ms(interval);
    }

    pub fn set_smoothing(&mut self, smoothing: f32) {
        self.config.smoothing = smoothing;
        self.sampler.set_ease(smoothing);
    }

    /// Plugs in a different weight policy (constant width by default).
    pub fn set_weight_model(&mut self, model: Box<dyn WeightModel>) {
        self.sampler.set_model(model);
    }

    pub fn set_observer(&mut self, observer: Box<dyn SegmentObserver>) {
        self.observer = Some(observer);
    }

    /// Starts a new gesture. An unfinished previous gesture is flushed
    /// first so no window content leaks across gestures.
    pub fn begin_gesture(&mut self) {
        if self.active {
            self.end_gesture();
        }
        self.style = StrokeStyle {
            color: self.config.stroke_color,
            alpha: self.config.stroke_alpha,
            width: self.config.stroke_width * self.config.device_scale,
        };
        self.sampler.begin(self.style.width * 0.5);
        self.window.reset();
        self.builder.reset();
        self.layers.begin_stroke(self.style);
        self.active = true;
    }

    /// Feeds one raw pointer sample: view coordinates plus a monotonic
    /// millisecond timestamp. Ignored outside a gesture; suppressed
    /// samples produce no event.
    pub fn add_sample(&mut self, x: f32, y: f32, now_ms: u64) {
        if !self.active {
            return;
        }
        let Some(point) = self.sampler.sample(x, y, now_ms) else {
            return;
        };
        for event in self.window.add_point(point) {
            self.dispatch(event);
        }
    }

    /// Ends the gesture: flushes the remaining window content as a final
    /// finalized segment and files the gesture's shape.
    pub fn end_gesture(&mut self) {
        if !self.active {
            return;
        }
        if let Some(event) = self.window.flush() {
            self.dispatch(event);
        }
        self.layers.end_stroke();
        self.active = false;
        log_info!("gesture ended, {} committed strokes", self.layers.shapes().len());
    }

    /// Pointer cancellation is handled identically to a normal release.
    pub fn cancel_gesture(&mut self) {
        self.end_gesture();
    }

    /// Removes the most recent committed stroke (or discards the
    /// in-flight gesture's committed content when none is completed).
    pub fn undo(&mut self) -> Undo {
        let result = self.layers.undo();
        match result {
            Undo::Removed(_) => log_info!("undo: removed last stroke"),
            Undo::DiscardedActive => log_info!("undo: discarded in-flight stroke"),
            Undo::Nothing => {}
        }
        result
    }

    fn dispatch(&mut self, event: SegmentEvent) {
        let commands = self.builder.build(&event.points);
        if commands.is_empty() {
            return;
        }
        if let Some(observer) = self.observer.as_mut() {
            observer.on_segment(&commands, &self.style, event.finalized);
        }
        if event.finalized {
            self.layers.commit(&commands);
        } else {
            self.layers.set_preview(commands, self.style);
        }
    }
}
