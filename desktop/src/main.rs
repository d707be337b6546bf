//! Maatiputra desktop entry point.

use maatiputra::app::App;
use maatiputra::debug;
use maatiputra::ui::{self, fonts, theme::Theme, widgets::notifications::NotificationManager};

const WINDOW_TITLE: &str = "Maatiputra - Smart Farming Assistant";

struct MaatiputraApp {
    app: App,
    notifications: NotificationManager,
}

impl eframe::App for MaatiputraApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.app.on_tick();
        ui::render(ctx, &mut self.app, &mut self.notifications);
    }
}

fn main() -> eframe::Result {
    debug::init();

    if let Err(e) = lib_core::config::init_config() {
        tracing::error!(error = %e, "Invalid configuration, continuing in demo mode");
    }

    // Collaborator tasks are spawned onto this runtime from the UI thread
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            tracing::error!(error = %e, "Failed to start async runtime");
            eprintln!("Failed to start async runtime: {e}");
            std::process::exit(1);
        }
    };
    let _guard = runtime.enter();

    tracing::info!("Starting Maatiputra");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([900.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(|cc| {
            egui_extras::install_image_loaders(&cc.egui_ctx);
            fonts::setup_fonts(&cc.egui_ctx);
            Theme::apply(&cc.egui_ctx);

            let app = App::from_config(lib_core::config::core_config());
            Ok(Box::new(MaatiputraApp {
                app,
                notifications: NotificationManager::new(),
            }))
        }),
    )
}
