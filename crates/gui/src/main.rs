mod app;
pub mod i18n;
mod ui;
mod viewport;

// Re-export library modules so that `crate::state`, `crate::viewer`, etc.
// resolve to the lib crate types everywhere in the binary.
pub use detail_studio_lib::assets;
pub use detail_studio_lib::helpers;
pub use detail_studio_lib::model;
pub use detail_studio_lib::state;
pub use detail_studio_lib::timer;
pub use detail_studio_lib::viewer;
pub use detail_studio_lib::zones;

use app::DetailStudioApp;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "detail_studio=info,detail_studio_lib=info".into()),
        )
        .init();

    // Parse --asset <url> and --color <css> arguments
    let args: Vec<String> = std::env::args().collect();
    let initial_asset = arg_value(&args, "--asset");
    let initial_color = arg_value(&args, "--color");

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Detail Studio")
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([900.0, 560.0]),
        ..Default::default()
    };

    if let Err(e) = eframe::run_native(
        "detail-studio",
        native_options,
        Box::new(move |cc| Ok(Box::new(DetailStudioApp::new(cc, initial_asset, initial_color)))),
    ) {
        tracing::error!("Failed to start application: {e}");
    }
}

fn arg_value(args: &[String], flag: &str) -> Option<String> {
    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        if arg == flag {
            match iter.next() {
                Some(value) => return Some(value.clone()),
                None => {
                    tracing::error!("{flag} expects a value");
                    return None;
                }
            }
        }
        if let Some(value) = arg.strip_prefix(flag).and_then(|rest| rest.strip_prefix('=')) {
            return Some(value.to_string());
        }
    }
    None
}
