pub mod model;
pub mod view;

pub use model::{Circle, Degrees, PlotState, StrainField, StrainInput, StrainPoint, Sweep};
pub use view::draw;

pub const DEFAULT_PERIOD_MS: f64 = 30_000.0; // one revolution per 30s
pub const MIN_PERIOD_MS: f64 = 1.0;

pub const PLOT_WIDTH_FRACTION: f64 = 0.9; // plot extent within the surface
pub const PLOT_HEIGHT_FRACTION: f64 = 0.6;
pub const SCALE_DIVISOR: f64 = 4.0; // strain unit per quarter extent

pub const AXIS_LINE_WIDTH: f64 = 1.0;
pub const CIRCLE_LINE_WIDTH: f64 = 2.0;
pub const SWEEP_LINE_WIDTH: f64 = 1.5;
pub const DASH_PATTERN: [f64; 2] = [6.0, 4.0]; // sweep radius segment
pub const MARKER_RADIUS: f64 = 5.0;
pub const PRINCIPAL_TICK_HALF: f64 = 6.0;
pub const AXIS_LABEL_FONT_SIZE: f64 = 13.0;
pub const TICK_LABEL_FONT_SIZE: f64 = 11.0;

// Input field granularity and bounds
pub const STRAIN_STEP: f64 = 0.1;
pub const STRAIN_MIN: f64 = -1000.0;
pub const STRAIN_MAX: f64 = 1000.0;
