pub mod cli;
pub mod config;
pub mod impact;
pub mod logging;
pub mod materials;
pub mod server;
pub mod summary;
pub mod sweep;
