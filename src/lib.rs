//! InkFE — an incremental, variable-width ink stroke engine.
//!
//! A freehand pointer gesture is rendered as a smooth filled "ribbon",
//! sample by sample: a four-point sliding window selects the curve order
//! (dot / line / quadratic / cubic), perpendicular offset lines form the
//! ribbon boundary, averaged joints keep adjacent segments seamless, and
//! a preview/finalized layer pair lets the trailing edge redraw live
//! without touching committed geometry.
//!
//! The engine is headless: it consumes timestamped pointer samples and
//! emits abstract path commands for a rendering backend to translate.
//! [`app`] contains an eframe demo host showing the full wiring.

pub mod logger;

pub mod app;
pub mod cli;
pub mod engine;
pub mod geometry;
pub mod layers;
pub mod path;
pub mod ribbon;
pub mod sampler;
pub mod window;

pub use engine::{EngineConfig, InkEngine, SegmentObserver};
pub use geometry::{OffsetEngine, OffsetLine, OffsetPair, WeightedPoint};
pub use layers::{LayerManager, Undo};
pub use path::{PathCommand, RibbonShape, StrokeStyle};
pub use ribbon::RibbonBuilder;
pub use sampler::{ConstantWeight, Sampler, WeightModel};
pub use window::{SegmentEvent, SegmentKind, StrokeWindow, WINDOW_CAPACITY};
