use crate::config;
use crate::events::AppEvent;
use crate::gui::plot::{self, PlotState, StrainField, STRAIN_MAX, STRAIN_MIN, STRAIN_STEP};
use crate::gui::theme::{self, ThemeColors};
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

const LEGEND_MARKUP: &str = "<b>Legend</b>\n\
Circle: every (ε, γ/2) pair reachable by rotating the reference axes.\n\
Dashed radius: from circle center to the swept point.\n\
Marker: strain components at the current sweep angle.\n\
Axis ticks: principal strains ε1 and ε2.\n\
The sweep angle is twice the physical axis rotation.";

pub struct AppModel {
    pub state: Rc<RefCell<PlotState>>,
    pub drawing_area: gtk::DrawingArea,
    tick: Option<gtk::TickCallbackId>,
}

#[derive(Debug)]
pub enum AppMsg {
    Edit(StrainField, String),
    TogglePlay,
    Tick(i64),
    SurfaceResized(i32, i32),
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (PlotState, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Mohr's Circle (Plane Strain)"),
            set_default_size: (960, 620),
            add_css_class: "straincircle-window",

            gtk::Box {
                set_orientation: gtk::Orientation::Horizontal,
                set_spacing: 18,
                set_margin_all: 18,

                gtk::Box {
                    set_orientation: gtk::Orientation::Vertical,
                    set_spacing: 12,
                    set_width_request: 300,

                    gtk::Label {
                        set_markup: "<b>Strain state</b>",
                        set_xalign: 0.0,
                    },

                    gtk::Grid {
                        set_row_spacing: 6,
                        set_column_spacing: 12,

                        attach[0, 0, 1, 1] = &gtk::Label {
                            set_markup: "Normal strain ε<sub>x</sub>",
                            set_xalign: 0.0,
                        },
                        attach[1, 0, 1, 1] = &gtk::SpinButton {
                            set_adjustment: &field_adjustment(model.state.borrow().input.normal_x),
                            set_digits: 3,
                            #[watch]
                            set_value: model.state.borrow().input.normal_x,
                            connect_value_changed[sender] => move |field| {
                                sender.input(AppMsg::Edit(StrainField::NormalX, field.text().into()));
                            },
                        },

                        attach[0, 1, 1, 1] = &gtk::Label {
                            set_markup: "Normal strain ε<sub>y</sub>",
                            set_xalign: 0.0,
                        },
                        attach[1, 1, 1, 1] = &gtk::SpinButton {
                            set_adjustment: &field_adjustment(model.state.borrow().input.normal_y),
                            set_digits: 3,
                            #[watch]
                            set_value: model.state.borrow().input.normal_y,
                            connect_value_changed[sender] => move |field| {
                                sender.input(AppMsg::Edit(StrainField::NormalY, field.text().into()));
                            },
                        },

                        attach[0, 2, 1, 1] = &gtk::Label {
                            set_markup: "Shear strain γ<sub>xy</sub>",
                            set_xalign: 0.0,
                        },
                        attach[1, 2, 1, 1] = &gtk::SpinButton {
                            set_adjustment: &field_adjustment(model.state.borrow().input.shear_xy),
                            set_digits: 3,
                            #[watch]
                            set_value: model.state.borrow().input.shear_xy,
                            connect_value_changed[sender] => move |field| {
                                sender.input(AppMsg::Edit(StrainField::ShearXY, field.text().into()));
                            },
                        },
                    },

                    gtk::Button {
                        #[watch]
                        set_label: if model.state.borrow().sweep.playing { "Pause" } else { "Continue" },
                        connect_clicked => AppMsg::TogglePlay,
                    },

                    gtk::Label {
                        set_markup: "<b>Current components</b>",
                        set_xalign: 0.0,
                    },

                    gtk::Grid {
                        set_row_spacing: 6,
                        set_column_spacing: 12,

                        attach[0, 0, 1, 1] = &gtk::Label {
                            set_markup: "Normal strain ε",
                            set_xalign: 0.0,
                            set_hexpand: true,
                        },
                        attach[1, 0, 1, 1] = &gtk::Label {
                            add_css_class: "result-value",
                            set_xalign: 1.0,
                            #[watch]
                            set_label: &format!("{:.3}", model.state.borrow().point().normal),
                        },
                        attach[2, 0, 1, 1] = &gtk::Label {
                            add_css_class: "result-value",
                            set_xalign: 1.0,
                            #[watch]
                            set_label: &model.state.borrow().normal_angle().to_string(),
                        },

                        attach[0, 1, 1, 1] = &gtk::Label {
                            set_markup: "Shear strain γ/2",
                            set_xalign: 0.0,
                        },
                        attach[1, 1, 1, 1] = &gtk::Label {
                            add_css_class: "result-value",
                            set_xalign: 1.0,
                            #[watch]
                            set_label: &format!("{:.3}", model.state.borrow().point().shear),
                        },
                        attach[2, 1, 1, 1] = &gtk::Label {
                            add_css_class: "result-value",
                            set_xalign: 1.0,
                            #[watch]
                            set_label: &model.state.borrow().shear_angle().to_string(),
                        },
                    },

                    gtk::Label {
                        set_markup: LEGEND_MARKUP,
                        set_xalign: 0.0,
                        set_wrap: true,
                        set_valign: gtk::Align::End,
                        set_vexpand: true,
                    },
                },

                #[name = "drawing_area"]
                gtk::DrawingArea {
                    set_hexpand: true,
                    set_vexpand: true,
                    add_css_class: "straincircle-plot",

                    connect_resize[sender] => move |_, width, height| {
                        sender.input(AppMsg::SurfaceResized(width, height));
                    },
                },
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (state, rx) = init;

        theme::load_css();

        let state = Rc::new(RefCell::new(state));

        let model = AppModel {
            state: state.clone(),
            drawing_area: gtk::DrawingArea::default(),
            tick: None,
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();

        let state_draw = model.state.clone();
        widgets
            .drawing_area
            .set_draw_func(move |drawing_area, cr, width, height| {
                let style_context = drawing_area.style_context();
                let colors = ThemeColors::from_context(&style_context);
                if let Err(e) = plot::draw(cr, &state_draw.borrow(), &colors, width, height) {
                    log::error!("Drawing error: {}", e);
                }
            });

        if model.state.borrow().sweep.playing {
            model.install_tick(&sender);
        }

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, sender: ComponentSender<Self>) {
        match msg {
            AppMsg::Edit(field, raw) => {
                self.state.borrow_mut().set_field(field, &raw);
                self.drawing_area.queue_draw();
            }
            AppMsg::TogglePlay => {
                let playing = self.state.borrow_mut().sweep.toggle();
                if playing {
                    self.install_tick(&sender);
                } else if let Some(tick) = self.tick.take() {
                    tick.remove();
                }
            }
            AppMsg::Tick(frame_time_us) => {
                let advanced = self
                    .state
                    .borrow_mut()
                    .sweep
                    .advance(frame_time_us as f64 / 1000.0);
                if advanced {
                    self.drawing_area.queue_draw();
                }
            }
            AppMsg::SurfaceResized(width, height) => {
                log::debug!("Plot surface resized to {}x{}", width, height);
                self.drawing_area.queue_draw();
            }
            AppMsg::ConfigReload => match config::load_config() {
                Ok(new_config) => {
                    self.state.borrow_mut().apply_config(&new_config);
                    self.drawing_area.queue_draw();
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
        }
    }
}

impl AppModel {
    /// Hooks the sweep onto the frame clock. The handle is kept so pausing
    /// can cancel the pending callback.
    fn install_tick(&mut self, sender: &ComponentSender<Self>) {
        let sender = sender.clone();
        self.tick = Some(self.drawing_area.add_tick_callback(move |_, clock| {
            sender.input(AppMsg::Tick(clock.frame_time()));
            glib::ControlFlow::Continue
        }));
    }
}

fn field_adjustment(value: f64) -> gtk::Adjustment {
    gtk::Adjustment::new(
        value,
        STRAIN_MIN,
        STRAIN_MAX,
        STRAIN_STEP,
        STRAIN_STEP * 10.0,
        0.0,
    )
}
