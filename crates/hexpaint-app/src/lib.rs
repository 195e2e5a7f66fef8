//! HexPaint Application
//!
//! Headless shell around the editor core: loads configuration, replays a
//! script of editor inputs and renders the result.

mod app;

pub use app::{App, AppConfig, AppError, RunSummary, run};
