//! Display-list renderer: hexagon paths in draw order.

use crate::renderer::{RenderContext, RenderResult, Renderer, RendererError};
use hexpaint_core::{CellIndex, HexGrid, Rgb};
use kurbo::{Affine, BezPath, Point, Rect};
use peniko::Color;

/// What a scene item draws.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ItemKind {
    /// Hexagon outline.
    Outline,
    /// Filled painted cell.
    Painted(Rgb),
    /// Filled provisional line cell.
    Preview,
}

/// One path to stroke or fill, in world coordinates.
#[derive(Debug, Clone)]
pub struct SceneItem {
    pub cell: CellIndex,
    pub kind: ItemKind,
    pub path: BezPath,
    pub color: Color,
}

/// A built frame.
#[derive(Debug, Clone)]
pub struct Scene {
    /// World to viewport pixels.
    pub transform: Affine,
    /// Visible world region.
    pub view_bounds: Rect,
    pub background: Color,
    /// Items back to front: outlines, painted fills, preview fills.
    pub items: Vec<SceneItem>,
}

impl Scene {
    pub fn count(&self, pred: impl Fn(&ItemKind) -> bool) -> usize {
        self.items.iter().filter(|item| pred(&item.kind)).count()
    }
}

fn hexagon_path(vertices: &[Point; 6]) -> BezPath {
    let mut path = BezPath::new();
    path.move_to(vertices[0]);
    for v in &vertices[1..] {
        path.line_to(*v);
    }
    path.close_path();
    path
}

/// Whether any part of the cell's circumscribed square is visible.
fn is_visible(grid: &HexGrid, cell: CellIndex, view: Rect) -> bool {
    grid.center_of(cell).is_some_and(|c| {
        let r = grid.radius();
        let bounds = Rect::new(c.x - r, c.y - r, c.x + r, c.y + r);
        !bounds.intersect(view).is_zero_area()
    })
}

/// Renderer that records a [`Scene`] instead of drawing.
#[derive(Debug, Default)]
pub struct SceneRenderer {
    scene: Option<Scene>,
    frames: u64,
}

impl SceneRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently built scene.
    pub fn scene(&self) -> RenderResult<&Scene> {
        self.scene.as_ref().ok_or(RendererError::NoScene)
    }

    /// Number of frames built so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Renderer for SceneRenderer {
    fn build_scene(&mut self, ctx: &RenderContext) -> RenderResult<()> {
        ctx.validate()?;

        let editor = ctx.editor;
        let grid = editor.grid();
        let camera = editor.camera();
        let view = camera.view_bounds();
        let size = ctx.viewport_size;
        let transform = Affine::translate((size.width / 2.0, size.height / 2.0))
            * Affine::scale_non_uniform(size.width / 2.0, -size.height / 2.0)
            * camera.transform();

        let mut items = Vec::new();
        let mut push = |cell: CellIndex, kind: ItemKind, color: Color| {
            if !is_visible(grid, cell, view) {
                return;
            }
            if let Some(vertices) = grid.hexagon_vertices(cell) {
                items.push(SceneItem {
                    cell,
                    kind,
                    path: hexagon_path(&vertices),
                    color,
                });
            }
        };

        if ctx.show_grid {
            for (cell, _) in grid.iter() {
                push(cell, ItemKind::Outline, ctx.palette.grid);
            }
        }
        for (cell, color) in grid.painted() {
            push(cell, ItemKind::Painted(color), ctx.palette.paint(color));
        }
        for &cell in editor.preview() {
            push(cell, ItemKind::Preview, ctx.palette.preview);
        }

        self.frames += 1;
        log::debug!("Built frame {} with {} items", self.frames, items.len());
        self.scene = Some(Scene {
            transform,
            view_bounds: view,
            background: self.background_color(ctx),
            items,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexpaint_core::{EditorInput, EditorState, PointerEvent, ToolKind};
    use std::time::Duration;

    fn press(editor: &mut EditorState, row: usize, col: usize, ms: u64) -> Point {
        let center = editor.grid().center_of(CellIndex::new(row, col)).unwrap();
        let position = editor.camera().world_to_screen(center, editor.viewport());
        editor.handle(EditorInput::Pointer(PointerEvent::Down {
            position,
            time: Duration::from_millis(ms),
        }));
        position
    }

    #[test]
    fn test_no_scene_before_build() {
        let renderer = SceneRenderer::new();
        assert!(matches!(renderer.scene(), Err(RendererError::NoScene)));
    }

    #[test]
    fn test_blank_grid_has_only_outlines() {
        let editor = EditorState::default();
        let mut renderer = SceneRenderer::new();
        renderer.build_scene(&RenderContext::new(&editor)).unwrap();

        let scene = renderer.scene().unwrap();
        assert_eq!(scene.items.len(), 900);
        assert_eq!(scene.count(|k| *k == ItemKind::Outline), 900);
        assert_eq!(renderer.frames(), 1);
    }

    #[test]
    fn test_painted_and_preview_items() {
        let mut editor = EditorState::default();
        let position = press(&mut editor, 5, 5, 0);
        editor.handle(EditorInput::Pointer(PointerEvent::Up {
            position,
            time: Duration::from_millis(1),
        }));

        editor.handle(EditorInput::SelectTool(ToolKind::Line));
        press(&mut editor, 0, 0, 10);
        let end = editor.grid().center_of(CellIndex::new(0, 4)).unwrap();
        let position = editor.camera().world_to_screen(end, editor.viewport());
        editor.handle(EditorInput::Pointer(PointerEvent::Move {
            position,
            time: Duration::from_millis(20),
        }));

        let mut renderer = SceneRenderer::new();
        renderer
            .build_scene(&RenderContext::new(&editor).with_grid(false))
            .unwrap();
        let scene = renderer.scene().unwrap();

        assert_eq!(scene.count(|k| *k == ItemKind::Outline), 0);
        assert_eq!(scene.count(|k| matches!(k, ItemKind::Painted(_))), 1);
        assert_eq!(scene.count(|k| *k == ItemKind::Preview), editor.preview().len());
        // Preview is drawn last.
        assert_eq!(scene.items.last().map(|i| i.kind), Some(ItemKind::Preview));
    }

    #[test]
    fn test_zoomed_scene_culls_offscreen_cells() {
        let mut editor = EditorState::default();
        editor.handle(EditorInput::SelectTool(ToolKind::Zoom));
        press(&mut editor, 15, 15, 0);

        let mut renderer = SceneRenderer::new();
        renderer.build_scene(&RenderContext::new(&editor)).unwrap();
        let scene = renderer.scene().unwrap();
        assert!(scene.items.len() < 900);
        assert!(scene.items.iter().any(|i| i.cell == CellIndex::new(15, 15)));
    }

    #[test]
    fn test_transform_maps_view_to_viewport() {
        let editor = EditorState::default();
        let mut renderer = SceneRenderer::new();
        renderer.build_scene(&RenderContext::new(&editor)).unwrap();
        let scene = renderer.scene().unwrap();

        let top_left = scene.transform * Point::new(-1.0, 1.0);
        assert!(top_left.x.abs() < 1e-9);
        assert!(top_left.y.abs() < 1e-9);
        let bottom_right = scene.transform * Point::new(1.0, -1.0);
        assert!((bottom_right.x - 512.0).abs() < 1e-9);
        assert!((bottom_right.y - 512.0).abs() < 1e-9);
    }
}
