pub mod signals;
pub mod web;

pub use signals::{shutdown_signal, spawn_reload_on_hangup};
pub use web::start_web_server;
