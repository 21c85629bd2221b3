use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::Srgba;

pub struct ThemeColors {
    pub background: Srgba<f64>,
    pub axis: Srgba<f64>,
    pub circle: Srgba<f64>,
    pub sweep: Srgba<f64>,
    pub marker: Srgba<f64>,
    pub principal: Srgba<f64>,
    pub text: Srgba<f64>,
}

impl ThemeColors {
    pub fn from_context(context: &gtk::StyleContext) -> Self {
        Self {
            background: Self::lookup_color(
                context,
                "theme_base_color",
                Srgba::new(0.10, 0.10, 0.12, 1.0),
                Some(1.0),
            ),
            axis: Self::lookup_color(
                context,
                "insensitive_fg_color",
                Srgba::new(0.55, 0.55, 0.58, 0.9),
                Some(0.9),
            ),
            circle: Self::lookup_color(
                context,
                "theme_selected_bg_color",
                Srgba::new(0.28, 0.51, 0.85, 1.0),
                Some(1.0),
            ),
            sweep: Self::lookup_color(
                context,
                "theme_fg_color",
                Srgba::new(0.85, 0.85, 0.85, 0.6),
                Some(0.6),
            ),
            marker: Self::lookup_color(
                context,
                "warning_color",
                Srgba::new(0.90, 0.55, 0.20, 1.0),
                Some(1.0),
            ),
            principal: Self::lookup_color(
                context,
                "success_color",
                Srgba::new(0.35, 0.70, 0.40, 0.9),
                Some(0.9),
            ),
            text: Self::lookup_color(
                context,
                "theme_fg_color",
                Srgba::new(0.9, 0.9, 0.9, 1.0),
                None,
            ),
        }
    }

    fn lookup_color(
        context: &gtk::StyleContext,
        name: &str,
        fallback: Srgba<f64>,
        alpha_override: Option<f64>,
    ) -> Srgba<f64> {
        context
            .lookup_color(name)
            .map(|c| {
                let (r, g, b, a) = (
                    c.red() as f64,
                    c.green() as f64,
                    c.blue() as f64,
                    c.alpha() as f64,
                );
                Srgba::new(r, g, b, alpha_override.unwrap_or(a))
            })
            .unwrap_or(fallback)
    }
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
.straincircle-plot {
    background: none;
    background-color: transparent;
}
.result-value {
    font-family: monospace;
}
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}
