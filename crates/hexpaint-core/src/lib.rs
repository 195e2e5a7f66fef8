//! HexPaint Core Library
//!
//! Platform-agnostic editing engine for the HexPaint hex-grid painter:
//! lattice geometry, pointer mapping, tool dispatch, line rasterization
//! and undo.

pub mod camera;
pub mod config;
pub mod editor;
pub mod grid;
pub mod history;
pub mod input;
pub mod raster;
pub mod tools;

pub use camera::Camera;
pub use config::{ConfigError, EditorConfig, GridConfig, ToolConfig};
pub use editor::{EditorState, Response};
pub use grid::{Cell, CellIndex, CellState, HexGrid, Rgb};
pub use history::{Edit, Operation, UndoLog, MAX_UNDO_HISTORY};
pub use input::{EditorInput, InputMapper, KeyEvent, Modifiers, PointerEvent};
pub use raster::LineRasterizer;
pub use tools::{CursorIcon, ToolKind, ToolManager, ToolOutcome, ToolState};
