//! Renderer trait abstraction.

use hexpaint_core::{EditorState, Rgb};
use kurbo::Size;
use peniko::Color;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Invalid viewport: {0}x{1}")]
    InvalidViewport(f64, f64),
    #[error("No scene has been built yet")]
    NoScene,
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Colors used to draw the lattice.
#[derive(Debug, Clone, Copy)]
pub struct RenderPalette {
    /// Clear color behind the lattice.
    pub background: Color,
    /// Hexagon outline color.
    pub grid: Color,
    /// Fill of provisional line cells.
    pub preview: Color,
}

impl Default for RenderPalette {
    fn default() -> Self {
        Self {
            background: Color::from_rgba8(204, 204, 204, 255),
            grid: Color::from_rgba8(0, 0, 0, 255),
            preview: Color::from_rgba8(128, 128, 128, 255),
        }
    }
}

impl RenderPalette {
    /// Fill color for a painted cell.
    pub fn paint(&self, color: Rgb) -> Color {
        let [r, g, b] = color.to_channels();
        Color::from_rgba8(r, g, b, 255)
    }
}

/// Context for a single render frame.
pub struct RenderContext<'a> {
    /// The editor to render.
    pub editor: &'a EditorState,
    /// Viewport size in physical pixels.
    pub viewport_size: Size,
    /// Colors for background, outlines and preview.
    pub palette: RenderPalette,
    /// Whether to draw hexagon outlines.
    pub show_grid: bool,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context sized to the editor's viewport.
    pub fn new(editor: &'a EditorState) -> Self {
        Self {
            editor,
            viewport_size: editor.viewport(),
            palette: RenderPalette::default(),
            show_grid: true,
        }
    }

    /// Override the viewport size.
    pub fn with_viewport(mut self, size: Size) -> Self {
        self.viewport_size = size;
        self
    }

    /// Set the palette.
    pub fn with_palette(mut self, palette: RenderPalette) -> Self {
        self.palette = palette;
        self
    }

    /// Toggle hexagon outlines.
    pub fn with_grid(mut self, show: bool) -> Self {
        self.show_grid = show;
        self
    }

    pub(crate) fn validate(&self) -> RenderResult<()> {
        let Size { width, height } = self.viewport_size;
        if width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0 {
            Ok(())
        } else {
            Err(RendererError::InvalidViewport(width, height))
        }
    }
}

/// Trait for rendering backends.
///
/// The editor reports when a redraw is needed; the caller then builds a
/// fresh frame from the full lattice and the provisional line cells.
pub trait Renderer {
    /// Build the scene/command buffer for a frame.
    fn build_scene(&mut self, ctx: &RenderContext) -> RenderResult<()>;

    /// Get the background color (for clearing).
    fn background_color(&self, ctx: &RenderContext) -> Color {
        ctx.palette.background
    }
}
