mod app;
mod input;
mod panel;
mod state;

use starlines_engine::device::GpuInit;
use starlines_engine::logging::{init_logging, LoggingConfig};
use starlines_engine::window::{Runtime, RuntimeConfig};

use crate::app::StarlinesApp;

fn main() {
    init_logging(LoggingConfig::default());

    if let Err(err) = Runtime::run(RuntimeConfig::default(), GpuInit::default(), StarlinesApp::new()) {
        log::error!("fatal: {err:#}");
        std::process::exit(1);
    }
}
