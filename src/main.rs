//! Dodge Block entry point
//!
//! Sets up logging and settings, then hands control to the winit event loop.

use std::process::ExitCode;

use dodge_block::Settings;
use dodge_block::app::{App, AppError};
use winit::event_loop::EventLoop;

fn run() -> Result<(), AppError> {
    let settings = Settings::load();
    log::debug!("Settings: {:?}", settings);

    let event_loop = EventLoop::new()?;
    let mut app = App::new(settings);
    event_loop.run_app(&mut app)?;

    match app.take_error() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Dodge Block starting...");

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
