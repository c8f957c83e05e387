// Library surface for the binary, headless tests and reuse.
pub mod app;
pub mod app_dirs;
pub mod clock;
pub mod config;
pub mod corpus;
pub mod error;
pub mod export;
pub mod logging;
pub mod metrics;
pub mod progress;
pub mod result;
pub mod runtime;
pub mod script;
pub mod session;
pub mod storage;
pub mod store;
pub mod ui;
