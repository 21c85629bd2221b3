use relm4::prelude::*;
use straincircle::config;
use straincircle::gui::app::AppModel;
use straincircle::gui::plot::PlotState;
use straincircle::sys::runtime;

fn main() {
    env_logger::init();

    let config = config::load_or_setup();
    let state = PlotState::from_config(&config);

    let (tx, rx) = async_channel::bounded(32);

    // Background services (config watcher)
    runtime::start_background_services(tx);

    let app = RelmApp::new("org.straincircle.app");

    app.run::<AppModel>((state, rx));
}
