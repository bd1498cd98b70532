use crate::geometry::{OffsetEngine, OffsetLine, WeightedPoint};
use crate::path::{self, PathCommand};

// ============================================================================
// RIBBON BUILDER
// ============================================================================

/// Builds the closed ribbon outline for one window snapshot.
///
/// Interior window points never become path vertices: they only steer
/// curvature through averaged control lines, so raw pointer jitter at a
/// middle sample cannot produce a visible corner.
pub struct RibbonBuilder {
    offsets: OffsetEngine,
}

impl RibbonBuilder {
    pub fn new() -> Self {
        Self {
            offsets: OffsetEngine::new(),
        }
    }

    /// Drops the degenerate-direction fallback state at gesture start.
    pub fn reset(&mut self) {
        self.offsets.reset();
    }

    /// Closed path for a window snapshot; branches on window length.
    /// An empty snapshot yields an empty command list.
    pub fn build(&mut self, points: &[WeightedPoint]) -> Vec<PathCommand> {
        match points {
            [] => Vec::new(),
            [p] => self.build_dot(p),
            [a, b] => self.build_line(a, b),
            [a, b, c] => self.build_quad(a, b, c),
            [a, b, c, d, ..] => self.build_cubic(a, b, c, d),
        }
    }

    /// A single point renders as a filled circle of radius = weight.
    fn build_dot(&mut self, p: &WeightedPoint) -> Vec<PathCommand> {
        let mut out = Vec::with_capacity(6);
        path::push_circle(&mut out, p.pos, p.weight);
        out
    }

    /// Straight ribbon: a quadrilateral whose width may differ at each end.
    fn build_line(&mut self, a: &WeightedPoint, b: &WeightedPoint) -> Vec<PathCommand> {
        let seg = self.offsets.offset(a, b);
        vec![
            PathCommand::MoveTo(seg.near.a),
            PathCommand::LineTo(seg.far.a),
            PathCommand::LineTo(seg.far.b),
            PathCommand::LineTo(seg.near.b),
            PathCommand::Close,
        ]
    }

    /// Curved ribbon over three points; the middle point acts purely as a
    /// curvature control through the averaged joint line.
    fn build_quad(
        &mut self,
        a: &WeightedPoint,
        b: &WeightedPoint,
        c: &WeightedPoint,
    ) -> Vec<PathCommand> {
        let ab = self.offsets.offset(a, b);
        let bc = self.offsets.offset(b, c);
        let ctrl = OffsetLine::average(&ab.far, &bc.near);
        vec![
            PathCommand::MoveTo(ab.near.a),
            PathCommand::QuadTo {
                ctrl: ctrl.a,
                to: bc.far.a,
            },
            PathCommand::LineTo(bc.far.b),
            PathCommand::QuadTo {
                ctrl: ctrl.b,
                to: ab.near.b,
            },
            PathCommand::Close,
        ]
    }

    /// Curved ribbon over four points with two averaged control lines.
    fn build_cubic(
        &mut self,
        a: &WeightedPoint,
        b: &WeightedPoint,
        c: &WeightedPoint,
        d: &WeightedPoint,
    ) -> Vec<PathCommand> {
        let ab = self.offsets.offset(a, b);
        let bc = self.offsets.offset(b, c);
        let cd = self.offsets.offset(c, d);
        let ctrl1 = OffsetLine::average(&ab.far, &bc.near);
        let ctrl2 = OffsetLine::average(&bc.far, &cd.near);
        vec![
            PathCommand::MoveTo(ab.near.a),
            PathCommand::CubicTo {
                ctrl1: ctrl1.a,
                ctrl2: ctrl2.a,
                to: cd.far.a,
            },
            PathCommand::LineTo(cd.far.b),
            PathCommand::CubicTo {
                ctrl1: ctrl2.b,
                ctrl2: ctrl1.b,
                to: ab.near.b,
            },
            PathCommand::Close,
        ]
    }
}

impl Default for RibbonBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{Pos2, pos2};

    fn wp(x: f32, y: f32) -> WeightedPoint {
        WeightedPoint::new(pos2(x, y), 5.0)
    }

    #[test]
    fn dot_builds_a_circle_of_weight_radius() {
        let mut builder = RibbonBuilder::new();
        let commands = builder.build(&[wp(5.0, 5.0)]);
        assert_eq!(commands.len(), 6);
        assert_eq!(commands[0], PathCommand::MoveTo(pos2(10.0, 5.0)));
        assert_eq!(commands[5], PathCommand::Close);
    }

    #[test]
    fn line_builds_the_boundary_quadrilateral() {
        let mut builder = RibbonBuilder::new();
        let commands = builder.build(&[wp(0.0, 0.0), wp(10.0, 0.0)]);
        assert_eq!(
            commands,
            vec![
                PathCommand::MoveTo(pos2(0.0, 5.0)),
                PathCommand::LineTo(pos2(10.0, 5.0)),
                PathCommand::LineTo(pos2(10.0, -5.0)),
                PathCommand::LineTo(pos2(0.0, -5.0)),
                PathCommand::Close,
            ]
        );
    }

    #[test]
    fn quad_averages_the_shared_joint_into_one_control_line() {
        let mut builder = RibbonBuilder::new();
        let commands = builder.build(&[wp(0.0, 0.0), wp(10.0, 0.0), wp(10.0, 10.0)]);
        assert_eq!(
            commands,
            vec![
                PathCommand::MoveTo(pos2(0.0, 5.0)),
                PathCommand::QuadTo {
                    ctrl: pos2(7.5, 2.5),
                    to: pos2(5.0, 10.0),
                },
                PathCommand::LineTo(pos2(15.0, 10.0)),
                PathCommand::QuadTo {
                    ctrl: pos2(12.5, -2.5),
                    to: pos2(0.0, -5.0),
                },
                PathCommand::Close,
            ]
        );
    }

    #[test]
    fn colinear_cubic_controls_sit_on_the_straight_boundary() {
        let mut builder = RibbonBuilder::new();
        let commands = builder.build(&[
            wp(0.0, 0.0),
            wp(10.0, 0.0),
            wp(20.0, 0.0),
            wp(30.0, 0.0),
        ]);
        // Colinear input: averaged control lines coincide with the
        // straight-line midpoints, so the ribbon is visually straight and
        // a constant 10 wide.
        assert_eq!(
            commands,
            vec![
                PathCommand::MoveTo(pos2(0.0, 5.0)),
                PathCommand::CubicTo {
                    ctrl1: pos2(10.0, 5.0),
                    ctrl2: pos2(20.0, 5.0),
                    to: pos2(30.0, 5.0),
                },
                PathCommand::LineTo(pos2(30.0, -5.0)),
                PathCommand::CubicTo {
                    ctrl1: pos2(20.0, -5.0),
                    ctrl2: pos2(10.0, -5.0),
                    to: pos2(0.0, -5.0),
                },
                PathCommand::Close,
            ]
        );
    }

    #[test]
    fn cubic_path_endpoints_derive_from_first_and_last_window_points() {
        let mut builder = RibbonBuilder::new();
        let first = wp(0.0, 0.0);
        let last = wp(28.0, 9.0);
        let commands = builder.build(&[first, wp(8.0, 4.0), wp(18.0, 2.0), last]);
        let PathCommand::MoveTo(start) = commands[0] else {
            panic!("path must start with MoveTo");
        };
        let PathCommand::CubicTo { to: end, .. } = commands[1] else {
            panic!("second command must be the top boundary cubic");
        };
        assert!(((start - first.pos).length() - first.weight).abs() < 1e-4);
        assert!(((end - last.pos).length() - last.weight).abs() < 1e-4);
    }

    #[test]
    fn duplicate_points_never_produce_nan() {
        let mut builder = RibbonBuilder::new();
        let p = wp(4.0, 4.0);
        for commands in [
            builder.build(&[p, p]),
            builder.build(&[p, p, p]),
            builder.build(&[p, p, p, p]),
        ] {
            for command in commands {
                let coords: Vec<Pos2> = match command {
                    PathCommand::MoveTo(p) | PathCommand::LineTo(p) => vec![p],
                    PathCommand::QuadTo { ctrl, to } => vec![ctrl, to],
                    PathCommand::CubicTo { ctrl1, ctrl2, to } => vec![ctrl1, ctrl2, to],
                    PathCommand::Close => vec![],
                };
                for p in coords {
                    assert!(p.x.is_finite() && p.y.is_finite());
                }
            }
        }
    }
}
