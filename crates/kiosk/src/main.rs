use std::process::ExitCode;

use kiosk_core::init_logging;

mod app;
mod commands;

fn main() -> ExitCode {
    let app = app::build_cli();
    let matches = app.get_matches();

    // Extract quiet flag before initializing logging
    let quiet = matches.get_flag("quiet");
    init_logging(quiet);

    match commands::run_command(&matches) {
        Ok(code) => code,
        Err(_) => ExitCode::FAILURE,
    }
}
