//! Camera module for the zoom toggle and screen/world transforms.

use kurbo::{Affine, Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Default view scale while zoomed in.
pub const DEFAULT_ZOOM_FACTOR: f64 = 0.2;

/// View state of the canvas.
///
/// World coordinates coincide with normalized device coordinates when not
/// zoomed in. While zoomed in, the visible region is `zoom_factor` wide on
/// each side of `-offset`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Whether the zoomed-in view is active.
    pub zoomed_in: bool,
    /// View scale applied while zoomed in.
    pub zoom_factor: f64,
    /// Current translation offset.
    pub offset: Vec2,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(DEFAULT_ZOOM_FACTOR)
    }
}

impl Camera {
    pub fn new(zoom_factor: f64) -> Self {
        Self {
            zoomed_in: false,
            zoom_factor,
            offset: Vec2::ZERO,
        }
    }

    /// Half-extent of the visible region in world units.
    pub fn scale(&self) -> f64 {
        if self.zoomed_in { self.zoom_factor } else { 1.0 }
    }

    /// Orthographic view bounds (left, bottom, right, top) in world units.
    pub fn view_bounds(&self) -> Rect {
        let s = self.scale();
        Rect::new(
            -s - self.offset.x,
            -s - self.offset.y,
            s - self.offset.x,
            s - self.offset.y,
        )
    }

    /// World to normalized device coordinates.
    pub fn transform(&self) -> Affine {
        Affine::scale(1.0 / self.scale()) * Affine::translate(self.offset)
    }

    /// Normalized device coordinates to world.
    pub fn inverse_transform(&self) -> Affine {
        Affine::translate(-self.offset) * Affine::scale(self.scale())
    }

    /// Convert a pointer position in pixels (origin top-left) to normalized
    /// device coordinates (origin center, +y up).
    pub fn screen_to_ndc(screen_point: Point, viewport: Size) -> Point {
        Point::new(
            screen_point.x / viewport.width * 2.0 - 1.0,
            (viewport.height - screen_point.y) / viewport.height * 2.0 - 1.0,
        )
    }

    /// Convert a pointer position in pixels to world coordinates.
    pub fn screen_to_world(&self, screen_point: Point, viewport: Size) -> Point {
        self.inverse_transform() * Self::screen_to_ndc(screen_point, viewport)
    }

    /// Convert a world point to a pointer position in pixels.
    pub fn world_to_screen(&self, world_point: Point, viewport: Size) -> Point {
        let ndc = self.transform() * world_point;
        Point::new(
            (ndc.x + 1.0) / 2.0 * viewport.width,
            viewport.height - (ndc.y + 1.0) / 2.0 * viewport.height,
        )
    }

    /// Toggle between the full view and the zoomed-in view.
    ///
    /// Zooming in keeps `world_point` under the pointer; zooming out resets
    /// the offset. Returns the new zoom state.
    pub fn toggle_zoom(&mut self, world_point: Point) -> bool {
        if self.zoomed_in {
            self.reset();
        } else {
            self.zoomed_in = true;
            self.offset = world_point.to_vec2() * (self.zoom_factor - 1.0);
        }
        self.zoomed_in
    }

    /// Return to the unzoomed, untranslated view.
    pub fn reset(&mut self) {
        self.zoomed_in = false;
        self.offset = Vec2::ZERO;
    }
}
