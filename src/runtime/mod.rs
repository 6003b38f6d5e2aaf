//! Application lifecycle: startup wiring, HTTP server and shutdown

pub mod lifetime;
pub mod server;

pub use lifetime::startup::{StartupContext, prepare_server_startup};
pub use server::{configure_app, run_server};
