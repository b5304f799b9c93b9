// Library surface for the binary and for headless/integration tests.
// main.rs only parses arguments and wires these together.
pub mod app;
pub mod app_dirs;
pub mod config;
pub mod convert;
pub mod error;
pub mod input;
pub mod layout;
pub mod results;
pub mod runtime;
pub mod session;
pub mod stats;
pub mod terminal;
pub mod theme;
pub mod ui;
pub mod word_bank;

pub use error::{Result, WordedError};
