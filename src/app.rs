use eframe::egui;
use egui::epaint::{CubicBezierShape, PathShape, QuadraticBezierShape};
use egui::{Color32, Pos2};

use crate::cli::{self, CliArgs};
use crate::engine::{EngineConfig, InkEngine};
use crate::path::{PathCommand, RibbonShape};

/// Curve flattening tolerance for on-screen rendering, in points.
const FLATTEN_TOLERANCE: f32 = 0.1;

// ============================================================================
// DEMO APP
// ============================================================================

/// Minimal host around the engine: captures pointer gestures, feeds them
/// through as timestamped samples, and paints both layers every frame.
/// The engine stays headless; everything UI-specific lives here.
pub struct InkApp {
    engine: InkEngine,
    drawing: bool,
    // Toolbar state, mirrored into the engine between gestures.
    stroke_width: f32,
    stroke_color: Color32,
    stroke_alpha: f32,
}

impl InkApp {
    pub fn new(cc: &eframe::CreationContext<'_>, args: &CliArgs) -> Self {
        let color = cli::parse_color(&args.stroke_color).unwrap_or(Color32::BLACK);
        let config = EngineConfig {
            stroke_width: args.stroke_width,
            stroke_color: color,
            stroke_alpha: args.stroke_alpha.clamp(0.0, 1.0),
            min_sample_interval_ms: args.min_sample_interval_ms,
            smoothing: args.smoothing,
            device_scale: cc.egui_ctx.pixels_per_point(),
            ..EngineConfig::default()
        };
        Self {
            stroke_width: config.stroke_width,
            stroke_color: config.stroke_color,
            stroke_alpha: config.stroke_alpha,
            engine: InkEngine::new(config),
            drawing: false,
        }
    }
}

impl eframe::App for InkApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("inkfe_toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Undo").clicked() {
                    self.engine.undo();
                }
                ui.separator();
                ui.label("Width");
                ui.add(egui::Slider::new(&mut self.stroke_width, 1.0..=64.0));
                ui.label("Alpha");
                ui.add(egui::Slider::new(&mut self.stroke_alpha, 0.05..=1.0));
                ui.color_edit_button_srgba(&mut self.stroke_color);
                ui.separator();
                ui.label(format!("{} strokes", self.engine.layers().shapes().len()));
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let (response, painter) =
                ui.allocate_painter(ui.available_size(), egui::Sense::drag());
            let rect = response.rect;
            let scale = self.engine.config().device_scale;

            // Style edits apply from the next gesture (constant per stroke).
            if !self.drawing {
                self.engine.set_stroke_width(self.stroke_width);
                self.engine.set_stroke_color(self.stroke_color);
                self.engine.set_stroke_alpha(self.stroke_alpha);
            }

            let (pressed, down, released, pointer, time) = ctx.input(|i| {
                (
                    i.pointer.primary_pressed(),
                    i.pointer.primary_down(),
                    i.pointer.primary_released(),
                    i.pointer.interact_pos(),
                    i.time,
                )
            });
            let now_ms = (time * 1000.0) as u64;

            if pressed && pointer.is_some_and(|p| rect.contains(p)) {
                self.engine.begin_gesture();
                self.drawing = true;
            }
            if self.drawing
                && down
                && let Some(p) = pointer
            {
                let local = p - rect.min;
                self.engine.add_sample(local.x, local.y, now_ms);
            }
            if self.drawing && released {
                self.engine.end_gesture();
                self.drawing = false;
            }

            for shape in self.engine.layers().shapes() {
                paint_ribbon(&painter, shape, rect.min, scale);
            }
            // The preview slot outlives the gesture until the next one
            // starts; only the live trailing edge is worth painting.
            if self.drawing
                && let Some(preview) = self.engine.layers().preview()
            {
                paint_ribbon(&painter, preview, rect.min, scale);
            }
        });
    }
}

// ============================================================================
// PATH-COMMAND RENDERING
// ============================================================================

/// Paints one ribbon shape: device-pixel commands are mapped back into UI
/// points, curves flattened, and each closed subpath filled.
fn paint_ribbon(painter: &egui::Painter, shape: &RibbonShape, origin: Pos2, scale: f32) {
    let fill = shape.style.fill_color();
    for points in flatten_subpaths(&shape.commands, origin, scale) {
        painter.add(PathShape {
            points,
            closed: true,
            fill,
            stroke: egui::Stroke::NONE,
        });
    }
}

/// Flattens a command list into one polygon per closed subpath.
fn flatten_subpaths(commands: &[PathCommand], origin: Pos2, scale: f32) -> Vec<Vec<Pos2>> {
    let to_ui = |p: Pos2| origin + p.to_vec2() / scale;
    let mut subpaths = Vec::new();
    let mut current: Vec<Pos2> = Vec::new();
    for command in commands {
        match *command {
            PathCommand::MoveTo(p) => {
                finish_subpath(&mut subpaths, &mut current);
                current.push(to_ui(p));
            }
            PathCommand::LineTo(p) => current.push(to_ui(p)),
            PathCommand::QuadTo { ctrl, to } => {
                if let Some(&from) = current.last() {
                    let bezier = QuadraticBezierShape {
                        points: [from, to_ui(ctrl), to_ui(to)],
                        closed: false,
                        fill: Color32::TRANSPARENT,
                        stroke: egui::Stroke::NONE,
                    };
                    current.extend(bezier.flatten(Some(FLATTEN_TOLERANCE)).into_iter().skip(1));
                }
            }
            PathCommand::CubicTo { ctrl1, ctrl2, to } => {
                if let Some(&from) = current.last() {
                    let bezier = CubicBezierShape {
                        points: [from, to_ui(ctrl1), to_ui(ctrl2), to_ui(to)],
                        closed: false,
                        fill: Color32::TRANSPARENT,
                        stroke: egui::Stroke::NONE,
                    };
                    current.extend(bezier.flatten(Some(FLATTEN_TOLERANCE)).into_iter().skip(1));
                }
            }
            PathCommand::Close => finish_subpath(&mut subpaths, &mut current),
        }
    }
    finish_subpath(&mut subpaths, &mut current);
    subpaths
}

/// A subpath needs at least three vertices to enclose area; anything
/// shorter is dropped.
fn finish_subpath(subpaths: &mut Vec<Vec<Pos2>>, current: &mut Vec<Pos2>) {
    if current.len() >= 3 {
        subpaths.push(std::mem::take(current));
    } else {
        current.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    #[test]
    fn flatten_splits_closed_subpaths() {
        let commands = vec![
            PathCommand::MoveTo(pos2(0.0, 0.0)),
            PathCommand::LineTo(pos2(10.0, 0.0)),
            PathCommand::LineTo(pos2(10.0, 10.0)),
            PathCommand::Close,
            PathCommand::MoveTo(pos2(20.0, 0.0)),
            PathCommand::LineTo(pos2(30.0, 0.0)),
            PathCommand::LineTo(pos2(30.0, 10.0)),
            PathCommand::LineTo(pos2(20.0, 10.0)),
            PathCommand::Close,
        ];
        let subpaths = flatten_subpaths(&commands, pos2(0.0, 0.0), 1.0);
        assert_eq!(subpaths.len(), 2);
        assert_eq!(subpaths[0].len(), 3);
        assert_eq!(subpaths[1].len(), 4);
    }

    #[test]
    fn flatten_maps_device_pixels_back_to_ui_points() {
        let commands = vec![
            PathCommand::MoveTo(pos2(0.0, 0.0)),
            PathCommand::LineTo(pos2(20.0, 0.0)),
            PathCommand::LineTo(pos2(20.0, 20.0)),
            PathCommand::Close,
        ];
        let subpaths = flatten_subpaths(&commands, pos2(100.0, 50.0), 2.0);
        assert_eq!(subpaths[0][1], pos2(110.0, 50.0));
        assert_eq!(subpaths[0][2], pos2(110.0, 60.0));
    }

    #[test]
    fn flatten_expands_curves_into_polylines() {
        let commands = vec![
            PathCommand::MoveTo(pos2(0.0, 0.0)),
            PathCommand::QuadTo {
                ctrl: pos2(10.0, 20.0),
                to: pos2(20.0, 0.0),
            },
            PathCommand::Close,
        ];
        let subpaths = flatten_subpaths(&commands, pos2(0.0, 0.0), 1.0);
        assert_eq!(subpaths.len(), 1);
        // The curve must flatten into more than its two endpoints.
        assert!(subpaths[0].len() > 3);
        assert_eq!(*subpaths[0].last().unwrap(), pos2(20.0, 0.0));
    }

    #[test]
    fn degenerate_subpaths_are_dropped() {
        let commands = vec![
            PathCommand::MoveTo(pos2(0.0, 0.0)),
            PathCommand::LineTo(pos2(10.0, 0.0)),
            PathCommand::Close,
        ];
        assert!(flatten_subpaths(&commands, pos2(0.0, 0.0), 1.0).is_empty());
    }
}
