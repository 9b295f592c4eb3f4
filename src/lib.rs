// Library surface for headless/integration tests and reuse.
pub mod app;
pub mod app_dirs;
pub mod compare;
pub mod config;
pub mod error;
pub mod logging;
pub mod presenter;
pub mod runtime;
pub mod score;
pub mod sentences;
pub mod session;
pub mod ui;
