//! VTT scene editor entry point

fn main() -> eframe::Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vtt_frontend=debug,vtt_editor=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting VTT Scene Editor");

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([640.0, 480.0])
            .with_title("VTT Scene Editor"),
        ..Default::default()
    };

    eframe::run_native(
        "vtt-editor",
        native_options,
        Box::new(|cc| Ok(Box::new(vtt_frontend::VttEditorApp::new(cc)))),
    )
}
