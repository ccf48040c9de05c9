mod app;
mod io;
mod model;

use app::DesktopApp;

fn main() -> eframe::Result<()> {
    env_logger::init();

    let initial = std::env::args_os().nth(1).map(std::path::PathBuf::from);
    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "Inventory Lookup",
        options,
        Box::new(move |_cc| {
            let mut app = DesktopApp::default();
            if let Some(path) = initial {
                app.open_path(&path);
            }
            Box::new(app)
        }),
    )
}
