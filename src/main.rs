fn main() {
    // Initialize logger. Set RUST_LOG environment variable to control log level.
    // Examples: RUST_LOG=info, RUST_LOG=warn, RUST_LOG=card_binder=debug
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Starting Card Binder");

    if let Err(e) = card_binder::ui::launch_gui() {
        log::error!("GUI error: {}", e);
        std::process::exit(1);
    }
}
