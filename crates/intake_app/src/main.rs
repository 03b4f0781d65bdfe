mod app;
mod config;
mod effects;
mod logging;
mod presenter;
mod preview;

use std::path::Path;

fn main() -> std::io::Result<()> {
    // Config first: the log file path is part of the configuration.
    let config = config::load(Path::new("."));
    logging::initialize(logging::LogDestination::File, Path::new(&config.log_file));
    app::run_app(config)
}
