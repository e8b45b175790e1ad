pub mod config;
pub mod ids;
pub mod logging;
pub mod projector;
pub mod storage;
pub mod store;
pub mod tui;
