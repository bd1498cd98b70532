use clap::Parser;
use eframe::egui;
use inkfe::app::InkApp;
use inkfe::cli::CliArgs;
use inkfe::{log_info, logger};

fn main() -> Result<(), eframe::Error> {
    let args = CliArgs::parse();

    // Initialize session log (overwrites previous session log)
    logger::init();
    log_info!("starting demo with {:?}", args);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1024.0, 768.0])
            .with_title("InkFE"),
        ..Default::default()
    };

    eframe::run_native(
        "InkFE",
        options,
        Box::new(move |cc| Box::new(InkApp::new(cc, &args))),
    )
}
