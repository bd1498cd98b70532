// ============================================================================
// InkFE CLI — flags for the demo binary
// ============================================================================
//
// Usage examples:
//   inkfe
//   inkfe --stroke-width 14 --stroke-color 204080
//   inkfe --stroke-color "#1a1a2e" --stroke-alpha 0.8 --smoothing 0.5
//
// These flags seed the engine configuration of the demo window. The
// engine itself exposes no CLI surface.

use clap::Parser;
use egui::Color32;

/// InkFE freehand ink demo.
///
/// Draw variable-width ink strokes with the pointer, one gesture per
/// drag. Undo removes the most recent stroke.
#[derive(Parser, Debug)]
#[command(name = "inkfe", about = "InkFE freehand ink stroke demo")]
pub struct CliArgs {
    /// Stroke width in logical pixels.
    #[arg(long, default_value_t = 10.0)]
    pub stroke_width: f32,

    /// Stroke color as RGB hex, e.g. "1a1a2e" or "#204080".
    #[arg(long, default_value = "1a1a2e")]
    pub stroke_color: String,

    /// Stroke opacity in [0, 1].
    #[arg(long, default_value_t = 1.0)]
    pub stroke_alpha: f32,

    /// Minimum interval between accepted pointer samples, in milliseconds.
    #[arg(long, default_value_t = 10)]
    pub min_sample_interval_ms: u64,

    /// Weight smoothing factor in (0, 1]; lower reacts slower.
    #[arg(long, default_value_t = 0.3)]
    pub smoothing: f32,
}

/// Parses an RGB hex string, with or without a leading '#'.
pub fn parse_color(s: &str) -> Option<Color32> {
    let hex = s.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color32::from_rgb(r, g, b))
}
