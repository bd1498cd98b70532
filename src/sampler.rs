use egui::{Pos2, pos2};

use crate::geometry::WeightedPoint;

// ============================================================================
// WEIGHT MODEL
// ============================================================================

/// Supplies the target half-width for each accepted sample.
///
/// The sampler owns the smoothing blend and the min/max clamp, so a model
/// only has to produce a target; pressure-like behavior (e.g. thinning on
/// fast movement) plugs in here without touching the pipeline.
pub trait WeightModel {
    /// `base` is the stroke's configured half-width, `distance` the
    /// device pixels travelled since the previous accepted sample, and
    /// `elapsed_ms` the wall-clock gap (floored at zero).
    fn target_weight(&self, base: f32, distance: f32, elapsed_ms: u64) -> f32;
}

/// Fixed half-width, the default model.
pub struct ConstantWeight;

impl WeightModel for ConstantWeight {
    fn target_weight(&self, base: f32, _distance: f32, _elapsed_ms: u64) -> f32 {
        base
    }
}

// ============================================================================
// SAMPLER
// ============================================================================

/// Maps raw view coordinates into device-pixel weighted points.
///
/// Per gesture it enforces a minimum interval between accepted samples:
/// samples arriving sooner are suppressed, not buffered; the next
/// accepted sample simply reflects a later pointer position. A timestamp
/// older than the last accepted one is accepted with its elapsed time
/// floored at zero, and the last-accepted clock stays where it was.
pub struct Sampler {
    device_scale: f32,
    min_interval_ms: u64,
    ease: f32,
    min_weight: f32,
    max_weight: f32,
    model: Box<dyn WeightModel>,
    base_weight: f32,
    weight: f32,
    last_time: Option<u64>,
    last_pos: Option<Pos2>,
}

impl Sampler {
    pub fn new(
        device_scale: f32,
        min_interval_ms: u64,
        ease: f32,
        min_weight: f32,
        max_weight: f32,
    ) -> Self {
        Self {
            device_scale,
            min_interval_ms,
            ease,
            min_weight,
            max_weight,
            model: Box::new(ConstantWeight),
            base_weight: min_weight,
            weight: min_weight,
            last_time: None,
            last_pos: None,
        }
    }

    /// Swaps in a different weight policy. Takes effect from the next
    /// accepted sample.
    pub fn set_model(&mut self, model: Box<dyn WeightModel>) {
        self.model = model;
    }

    pub fn set_min_interval_ms(&mut self, min_interval_ms: u64) {
        self.min_interval_ms = min_interval_ms;
    }

    pub fn set_ease(&mut self, ease: f32) {
        self.ease = ease;
    }

    /// Arms the sampler for a new gesture with the stroke's half-width.
    /// The first sample of a gesture is always accepted.
    pub fn begin(&mut self, base_weight: f32) {
        self.base_weight = base_weight.clamp(self.min_weight, self.max_weight);
        self.weight = self.base_weight;
        self.last_time = None;
        self.last_pos = None;
    }

    /// One raw pointer sample; `None` means suppressed by the minimum
    /// sampling interval.
    pub fn sample(&mut self, raw_x: f32, raw_y: f32, now_ms: u64) -> Option<WeightedPoint> {
        let pos = pos2(raw_x * self.device_scale, raw_y * self.device_scale);
        let elapsed = match self.last_time {
            None => {
                self.last_time = Some(now_ms);
                0
            }
            Some(last) if now_ms < last => 0,
            Some(last) => {
                let dt = now_ms - last;
                if dt < self.min_interval_ms {
                    return None;
                }
                self.last_time = Some(now_ms);
                dt
            }
        };

        let distance = self.last_pos.map_or(0.0, |p| (pos - p).length());
        let target = self
            .model
            .target_weight(self.base_weight, distance, elapsed)
            .clamp(self.min_weight, self.max_weight);
        self.weight += self.ease * (target - self.weight);
        self.weight = self.weight.clamp(self.min_weight, self.max_weight);
        self.last_pos = Some(pos);

        Some(WeightedPoint::new(pos, self.weight))
    }
}
