pub mod app;
pub mod commands;
pub mod config;
pub mod csv_loader;
pub mod export;
pub mod logging;
pub mod state;
pub mod utils;
pub mod views;

pub use app::App;
