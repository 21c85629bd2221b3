use super::model::{Circle, PlotState, StrainPoint};
use super::{
    AXIS_LABEL_FONT_SIZE, AXIS_LINE_WIDTH, CIRCLE_LINE_WIDTH, DASH_PATTERN, MARKER_RADIUS,
    PLOT_HEIGHT_FRACTION, PLOT_WIDTH_FRACTION, PRINCIPAL_TICK_HALF, SCALE_DIVISOR,
    SWEEP_LINE_WIDTH, TICK_LABEL_FONT_SIZE,
};
use crate::gui::theme::ThemeColors;
use cairo::Context;
use palette::Srgba;
use std::f64::consts::PI;

/// Pixels per strain unit: the plot extent covers 90% of the surface width
/// and 60% of its height, and a quarter of the smaller extent maps to one
/// strain unit.
pub fn plot_scale(width: f64, height: f64) -> f64 {
    (width * PLOT_WIDTH_FRACTION).min(height * PLOT_HEIGHT_FRACTION) / SCALE_DIVISOR
}

pub fn draw(
    cr: &Context,
    state: &PlotState,
    colors: &ThemeColors,
    width: i32,
    height: i32,
) -> Result<(), cairo::Error> {
    let (w, h) = (width as f64, height as f64);
    let circle = state.circle();
    let point = circle.point_at(state.sweep.angle);
    let scale = plot_scale(w, h);

    set_source(cr, colors.background);
    cr.paint()?;

    cr.save()?;
    cr.translate(w / 2.0, h / 2.0);

    draw_axes(cr, colors, w, h)?;
    draw_circle(cr, colors, &circle, scale)?;
    draw_principal_ticks(cr, colors, &circle, scale)?;
    draw_sweep_radius(cr, colors, &circle, &point, scale)?;
    draw_marker(cr, colors, &point, scale)?;

    cr.restore()
}

fn set_source(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

fn draw_axes(cr: &Context, colors: &ThemeColors, w: f64, h: f64) -> Result<(), cairo::Error> {
    set_source(cr, colors.axis);
    cr.set_line_width(AXIS_LINE_WIDTH);
    cr.move_to(-w / 2.0, 0.0);
    cr.line_to(w / 2.0, 0.0);
    cr.move_to(0.0, -h / 2.0);
    cr.line_to(0.0, h / 2.0);
    cr.stroke()?;

    set_source(cr, colors.text);
    cr.select_font_face("Sans", cairo::FontSlant::Italic, cairo::FontWeight::Normal);
    cr.set_font_size(AXIS_LABEL_FONT_SIZE);
    cr.move_to(w / 2.0 - 20.0, -8.0);
    cr.show_text("ε")?;
    cr.move_to(8.0, -h / 2.0 + 18.0);
    cr.show_text("γ/2")
}

fn draw_circle(
    cr: &Context,
    colors: &ThemeColors,
    circle: &Circle,
    scale: f64,
) -> Result<(), cairo::Error> {
    set_source(cr, colors.circle);
    cr.set_line_width(CIRCLE_LINE_WIDTH);
    cr.arc(circle.center * scale, 0.0, circle.radius * scale, 0.0, 2.0 * PI);
    cr.stroke()
}

/// Tick marks where the circle crosses the normal-strain axis.
fn draw_principal_ticks(
    cr: &Context,
    colors: &ThemeColors,
    circle: &Circle,
    scale: f64,
) -> Result<(), cairo::Error> {
    let (e1, e2) = circle.principal();

    set_source(cr, colors.principal);
    cr.set_line_width(AXIS_LINE_WIDTH);
    cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Normal);
    cr.set_font_size(TICK_LABEL_FONT_SIZE);

    for (label, value) in [("ε1", e1), ("ε2", e2)] {
        let x = value * scale;
        cr.move_to(x, -PRINCIPAL_TICK_HALF);
        cr.line_to(x, PRINCIPAL_TICK_HALF);
        cr.stroke()?;

        if let Ok(ext) = cr.text_extents(label) {
            cr.move_to(x - ext.width() / 2.0, PRINCIPAL_TICK_HALF + 14.0);
            cr.show_text(label)?;
        }
    }
    Ok(())
}

fn draw_sweep_radius(
    cr: &Context,
    colors: &ThemeColors,
    circle: &Circle,
    point: &StrainPoint,
    scale: f64,
) -> Result<(), cairo::Error> {
    set_source(cr, colors.sweep);
    cr.set_line_width(SWEEP_LINE_WIDTH);
    cr.set_dash(&DASH_PATTERN, 0.0);
    cr.move_to(circle.center * scale, 0.0);
    cr.line_to(point.normal * scale, -point.shear * scale);
    cr.stroke()?;
    cr.set_dash(&[], 0.0);
    Ok(())
}

fn draw_marker(
    cr: &Context,
    colors: &ThemeColors,
    point: &StrainPoint,
    scale: f64,
) -> Result<(), cairo::Error> {
    set_source(cr, colors.marker);
    cr.arc(
        point.normal * scale,
        -point.shear * scale,
        MARKER_RADIUS,
        0.0,
        2.0 * PI,
    );
    cr.fill()
}
