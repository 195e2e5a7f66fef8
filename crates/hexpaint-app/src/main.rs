//! Main application entry point.

fn main() {
    env_logger::init();
    log::info!("Starting HexPaint");

    let result = hexpaint_app::AppConfig::from_args(std::env::args().skip(1))
        .and_then(hexpaint_app::run);
    if let Err(e) = result {
        log::error!("{}", e);
        eprintln!("hexpaint: {}", e);
        std::process::exit(1);
    }
}
