use crate::config::{Config, StartMode};
use crate::gui::plot::MIN_PERIOD_MS;
use derive_more::{Display, From, Into};
use std::f64::consts::PI;
use strum::EnumIter;

/// One of the three user-editable strain components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum StrainField {
    NormalX,
    NormalY,
    ShearXY,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StrainInput {
    pub normal_x: f64,
    pub normal_y: f64,
    pub shear_xy: f64,
}

impl StrainInput {
    pub fn new(normal_x: f64, normal_y: f64, shear_xy: f64) -> Self {
        Self {
            normal_x,
            normal_y,
            shear_xy,
        }
    }

    pub fn get(&self, field: StrainField) -> f64 {
        match field {
            StrainField::NormalX => self.normal_x,
            StrainField::NormalY => self.normal_y,
            StrainField::ShearXY => self.shear_xy,
        }
    }

    pub fn set(&mut self, field: StrainField, value: f64) {
        match field {
            StrainField::NormalX => self.normal_x = value,
            StrainField::NormalY => self.normal_y = value,
            StrainField::ShearXY => self.shear_xy = value,
        }
    }
}

/// Parses user-entered field text. Anything that is not a number reads as zero.
pub fn parse_strain(raw: &str) -> f64 {
    raw.trim().parse().unwrap_or(0.0)
}

/// The Mohr's circle derived from a strain state: the locus of every
/// (normal, shear) pair reachable by rotating the reference axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: f64,
    pub radius: f64,
}

impl Circle {
    pub fn of(input: &StrainInput) -> Self {
        let center = (input.normal_x + input.normal_y) / 2.0;
        let half_diff = (input.normal_x - input.normal_y) / 2.0;
        Self {
            center,
            radius: half_diff.hypot(input.shear_xy),
        }
    }

    /// Strain components at a given sweep angle. A zero radius collapses
    /// every angle onto the center point.
    pub fn point_at(&self, angle: f64) -> StrainPoint {
        StrainPoint {
            normal: self.center + self.radius * angle.cos(),
            shear: self.radius * angle.sin(),
        }
    }

    /// Principal strains, where the circle crosses the normal-strain axis.
    pub fn principal(&self) -> (f64, f64) {
        (self.center + self.radius, self.center - self.radius)
    }

    pub fn max_shear(&self) -> f64 {
        self.radius
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrainPoint {
    pub normal: f64,
    pub shear: f64,
}

/// An angle readout in degrees, formatted for the results table.
#[derive(Debug, Clone, Copy, PartialEq, Display, From, Into)]
#[display("{_0:.2}°")]
pub struct Degrees(f64);

impl Degrees {
    /// Orientation of the conjugate shear reading, 90° past this one.
    pub fn conjugate(self) -> Self {
        Self(self.0 + 90.0)
    }
}

/// The sweep around the circle: a two-state play/pause machine advanced by
/// frame-clock timestamps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sweep {
    pub angle: f64,
    pub playing: bool,
    period_ms: f64,
    last_tick: Option<f64>,
}

impl Sweep {
    pub fn new(angle: f64, playing: bool, period_ms: f64) -> Self {
        Self {
            angle: angle.rem_euclid(2.0 * PI),
            playing,
            period_ms: clamp_period(period_ms),
            last_tick: None,
        }
    }

    pub fn period_ms(&self) -> f64 {
        self.period_ms
    }

    pub fn set_period(&mut self, period_ms: f64) {
        self.period_ms = clamp_period(period_ms);
    }

    /// Flips play/pause and returns the new playing flag. Entering play
    /// clears the tick marker so elapsed time restarts at the resume instant.
    pub fn toggle(&mut self) -> bool {
        self.playing = !self.playing;
        if self.playing {
            self.last_tick = None;
        }
        self.playing
    }

    /// Advances the angle by the wall-clock time since the previous tick.
    /// The first tick after (re)starting only records a baseline. Returns
    /// whether the angle was updated.
    pub fn advance(&mut self, now_ms: f64) -> bool {
        if !self.playing {
            return false;
        }
        let Some(last) = self.last_tick.replace(now_ms) else {
            return false;
        };
        let delta_ms = now_ms - last;
        self.angle = (self.angle + delta_ms * 2.0 * PI / self.period_ms).rem_euclid(2.0 * PI);
        true
    }
}

fn clamp_period(period_ms: f64) -> f64 {
    if period_ms < MIN_PERIOD_MS {
        log::warn!(
            "Sweep period {}ms is too small, clamping to {}ms",
            period_ms,
            MIN_PERIOD_MS
        );
        MIN_PERIOD_MS
    } else {
        period_ms
    }
}

/// All mutable visualizer state: the strain inputs and the sweep. Everything
/// shown on screen derives from these two.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotState {
    pub input: StrainInput,
    pub sweep: Sweep,
}

impl PlotState {
    pub fn new(input: StrainInput, sweep: Sweep) -> Self {
        Self { input, sweep }
    }

    pub fn from_config(config: &Config) -> Self {
        let input = StrainInput::new(
            config.strain.normal_x,
            config.strain.normal_y,
            config.strain.shear_xy,
        );
        let sweep = Sweep::new(
            config.sweep.start_angle_deg.to_radians(),
            config.sweep.start == StartMode::Playing,
            config.sweep.period_ms,
        );
        Self { input, sweep }
    }

    /// Re-seeds the inputs and period from a reloaded config. The sweep angle
    /// and play state are left alone.
    pub fn apply_config(&mut self, config: &Config) {
        self.input = StrainInput::new(
            config.strain.normal_x,
            config.strain.normal_y,
            config.strain.shear_xy,
        );
        self.sweep.set_period(config.sweep.period_ms);
    }

    /// Applies a single-field edit, coercing unparsable text to zero.
    pub fn set_field(&mut self, field: StrainField, raw: &str) {
        self.input.set(field, parse_strain(raw));
    }

    pub fn circle(&self) -> Circle {
        Circle::of(&self.input)
    }

    pub fn point(&self) -> StrainPoint {
        self.circle().point_at(self.sweep.angle)
    }

    pub fn normal_angle(&self) -> Degrees {
        Degrees::from(self.sweep.angle.to_degrees())
    }

    pub fn shear_angle(&self) -> Degrees {
        self.normal_angle().conjugate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{StrainSeed, SweepConfig};
    use strum::IntoEnumIterator;

    const PERIOD: f64 = 30_000.0;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn worked_input() -> StrainInput {
        StrainInput::new(2.0, 0.2, 0.905)
    }

    #[test]
    fn radius_is_never_negative() {
        let cases = [
            (0.0, 0.0, 0.0),
            (-3.0, 2.0, -0.5),
            (1e6, -1e6, 0.0),
            (-0.1, -0.1, -7.25),
        ];
        for (nx, ny, sxy) in cases {
            let circle = Circle::of(&StrainInput::new(nx, ny, sxy));
            assert!(circle.radius >= 0.0, "radius negative for ({nx}, {ny}, {sxy})");
        }
    }

    #[test]
    fn degenerate_circle_collapses_to_center() {
        let circle = Circle::of(&StrainInput::new(1.5, 1.5, 0.0));
        assert_eq!(circle.radius, 0.0);
        for i in 0..8 {
            let point = circle.point_at(i as f64 * PI / 4.0);
            assert!(close(point.normal, circle.center));
            assert!(close(point.shear, 0.0));
        }
    }

    #[test]
    fn projection_is_periodic() {
        let circle = Circle::of(&worked_input());
        for i in 0..12 {
            let angle = i as f64 * PI / 6.0;
            let a = circle.point_at(angle);
            let b = circle.point_at(angle + 2.0 * PI);
            assert!(close(a.normal, b.normal));
            assert!(close(a.shear, b.shear));
        }
    }

    #[test]
    fn projected_point_lies_on_circle() {
        let circle = Circle::of(&StrainInput::new(-1.2, 0.7, 2.4));
        for i in 0..12 {
            let point = circle.point_at(i as f64 * PI / 6.0);
            let r2 = (point.normal - circle.center).powi(2) + point.shear.powi(2);
            assert!(close(r2, circle.radius.powi(2)));
        }
    }

    #[test]
    fn worked_example() {
        let circle = Circle::of(&worked_input());
        assert!(close(circle.center, 1.1));
        let expected_radius = (0.9f64.powi(2) + 0.905f64.powi(2)).sqrt();
        assert!(close(circle.radius, expected_radius));
        assert!((circle.radius - 1.2763).abs() < 1e-4);

        let at_zero = circle.point_at(0.0);
        assert!((at_zero.normal - 2.3763).abs() < 1e-4);
        assert!(close(at_zero.shear, 0.0));

        let at_quarter = circle.point_at(PI / 2.0);
        assert!(close(at_quarter.normal, 1.1));
        assert!(close(at_quarter.shear, expected_radius));
    }

    #[test]
    fn principal_strains_bracket_the_center() {
        let circle = Circle::of(&worked_input());
        let (e1, e2) = circle.principal();
        assert!(close(e1, circle.center + circle.radius));
        assert!(close(e2, circle.center - circle.radius));
        assert!(close(circle.max_shear(), circle.radius));
    }

    #[test]
    fn full_period_returns_to_start() {
        let mut sweep = Sweep::new(1.0, true, PERIOD);
        assert!(!sweep.advance(500.0));
        assert!(sweep.advance(500.0 + PERIOD));
        assert!(close(sweep.angle, 1.0));
    }

    #[test]
    fn half_period_steps_advance_by_pi() {
        let mut sweep = Sweep::new(0.0, true, PERIOD);
        sweep.advance(0.0);
        sweep.advance(PERIOD / 2.0);
        assert!(close(sweep.angle, PI));
        sweep.advance(PERIOD);
        assert!(close(sweep.angle, 0.0));
    }

    #[test]
    fn paused_sweep_holds_its_angle() {
        let mut sweep = Sweep::new(0.25, false, PERIOD);
        assert!(!sweep.advance(1_000.0));
        assert!(!sweep.advance(2_000.0));
        assert!(close(sweep.angle, 0.25));
    }

    #[test]
    fn resume_measures_from_the_resume_instant() {
        let mut sweep = Sweep::new(0.0, true, PERIOD);
        sweep.advance(0.0);
        sweep.advance(1_000.0);
        let before_pause = sweep.angle;

        assert!(!sweep.toggle());
        assert!(sweep.toggle());

        // A long pause must not register as elapsed time.
        assert!(!sweep.advance(500_000.0));
        assert!(close(sweep.angle, before_pause));

        assert!(sweep.advance(501_000.0));
        let one_second = 1_000.0 * 2.0 * PI / PERIOD;
        assert!(close(sweep.angle, before_pause + one_second));
    }

    #[test]
    fn tiny_period_is_clamped() {
        let sweep = Sweep::new(0.0, true, 0.0);
        assert_eq!(sweep.period_ms(), MIN_PERIOD_MS);
    }

    #[test]
    fn garbage_edits_coerce_to_zero() {
        assert_eq!(parse_strain("abc"), 0.0);
        assert_eq!(parse_strain(""), 0.0);
        assert_eq!(parse_strain("3.5"), 3.5);
        assert_eq!(parse_strain(" -0.905 "), -0.905);
    }

    #[test]
    fn single_field_edits_preserve_the_rest() {
        for field in StrainField::iter() {
            let mut state = PlotState::new(worked_input(), Sweep::new(0.0, true, PERIOD));
            state.set_field(field, "abc");
            assert_eq!(state.input.get(field), 0.0);
            for other in StrainField::iter().filter(|&f| f != field) {
                assert_eq!(state.input.get(other), worked_input().get(other));
            }
        }
    }

    #[test]
    fn edits_do_not_touch_the_sweep() {
        let mut state = PlotState::new(worked_input(), Sweep::new(1.3, true, PERIOD));
        state.set_field(StrainField::ShearXY, "0.4");
        assert!(close(state.sweep.angle, 1.3));
        assert!(state.sweep.playing);
    }

    #[test]
    fn config_seeds_angle_and_start_mode() {
        let config = Config {
            strain: StrainSeed {
                normal_x: 0.5,
                normal_y: -0.5,
                shear_xy: 0.0,
            },
            sweep: SweepConfig {
                period_ms: 10_000.0,
                start_angle_deg: 90.0,
                start: StartMode::Paused,
            },
        };
        let state = PlotState::from_config(&config);
        assert!(close(state.sweep.angle, PI / 2.0));
        assert!(!state.sweep.playing);
        assert_eq!(state.sweep.period_ms(), 10_000.0);
        assert_eq!(state.input.normal_x, 0.5);
    }

    #[test]
    fn reload_keeps_the_sweep_position() {
        let mut state = PlotState::new(worked_input(), Sweep::new(2.0, true, PERIOD));
        let config = Config {
            strain: StrainSeed {
                normal_x: 1.0,
                normal_y: 1.0,
                shear_xy: 1.0,
            },
            sweep: SweepConfig {
                period_ms: 5_000.0,
                start_angle_deg: 0.0,
                start: StartMode::Paused,
            },
        };
        state.apply_config(&config);
        assert_eq!(state.input.normal_x, 1.0);
        assert_eq!(state.sweep.period_ms(), 5_000.0);
        assert!(close(state.sweep.angle, 2.0));
        assert!(state.sweep.playing);
    }

    #[test]
    fn angle_readouts_format_in_degrees() {
        let state = PlotState::new(worked_input(), Sweep::new(PI / 4.0, true, PERIOD));
        assert_eq!(state.normal_angle().to_string(), "45.00°");
        assert_eq!(state.shear_angle().to_string(), "135.00°");
    }
}
