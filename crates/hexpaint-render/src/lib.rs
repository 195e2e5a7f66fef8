//! HexPaint Render Library
//!
//! Renderer abstraction for HexPaint and a display-list implementation
//! that turns the editor state into hexagon paths.

mod renderer;
mod scene;

pub use renderer::{RenderContext, RenderPalette, RenderResult, Renderer, RendererError};
pub use scene::{ItemKind, Scene, SceneItem, SceneRenderer};
