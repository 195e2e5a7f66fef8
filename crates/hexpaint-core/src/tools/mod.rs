//! Tool system: routes pointer input to the active tool.

use crate::camera::Camera;
use crate::config::ToolConfig;
use crate::grid::{CellIndex, CellState, HexGrid, Rgb};
use crate::history::{Operation, UndoLog};
use crate::raster::LineRasterizer;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ToolKind {
    #[default]
    Brush,
    Eraser,
    Line,
    Zoom,
}

impl ToolKind {
    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Brush => "Brush",
            ToolKind::Eraser => "Eraser",
            ToolKind::Line => "Line",
            ToolKind::Zoom => "Zoom",
        }
    }

    /// Cursor shown over the canvas for this tool.
    pub fn cursor(self, zoomed_in: bool) -> CursorIcon {
        match self {
            ToolKind::Brush => CursorIcon::Crosshair,
            ToolKind::Eraser => CursorIcon::NoDrop,
            ToolKind::Line => CursorIcon::Pointer,
            ToolKind::Zoom if zoomed_in => CursorIcon::ZoomOut,
            ToolKind::Zoom => CursorIcon::ZoomIn,
        }
    }
}

/// Cursor hint for the UI layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CursorIcon {
    Crosshair,
    NoDrop,
    Pointer,
    ZoomIn,
    ZoomOut,
}

impl CursorIcon {
    /// CSS cursor keyword.
    pub fn css_name(self) -> &'static str {
        match self {
            CursorIcon::Crosshair => "crosshair",
            CursorIcon::NoDrop => "no-drop",
            CursorIcon::Pointer => "pointer",
            CursorIcon::ZoomIn => "zoom-in",
            CursorIcon::ZoomOut => "zoom-out",
        }
    }
}

/// State of a tool interaction.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ToolState {
    /// Waiting for a pointer press.
    #[default]
    Idle,
    /// Brush or eraser drag; edits accumulate in `operation`.
    Painting {
        operation: Operation,
        /// Time of the last accepted drag sample.
        last_sample: Option<Duration>,
    },
    /// Line drag; `preview` holds the provisional cells.
    LineDragging {
        anchor: Point,
        /// Pointer position of the last preview rebuild.
        last_sample: Option<Point>,
        preview: Vec<CellIndex>,
    },
}

/// What a dispatched pointer event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolOutcome {
    /// Nothing visible changed.
    #[default]
    None,
    /// A brush or eraser sample changed a cell.
    Painted,
    /// The provisional line was recomputed.
    PreviewUpdated,
    /// A brush/eraser drag ended.
    StrokeFinished { edits: usize },
    /// A line drag ended and its cells were painted.
    LineCommitted { edits: usize },
    /// The zoom tool was clicked.
    ZoomToggled { zoomed_in: bool },
}

impl ToolOutcome {
    /// Whether the renderer has to repaint.
    pub fn needs_redraw(&self) -> bool {
        matches!(
            self,
            ToolOutcome::Painted
                | ToolOutcome::PreviewUpdated
                | ToolOutcome::LineCommitted { .. }
                | ToolOutcome::ZoomToggled { .. }
        )
    }
}

/// Mutable editor data a tool operates on.
pub struct ToolContext<'a> {
    pub grid: &'a mut HexGrid,
    pub camera: &'a mut Camera,
    pub history: &'a mut UndoLog,
    pub brush: Rgb,
}

/// Apply the operation's tool to one cell, recording the change.
/// Returns false when the cell already holds the target state.
fn apply_paint(
    grid: &mut HexGrid,
    operation: &mut Operation,
    cell: CellIndex,
    brush: Rgb,
) -> bool {
    let target = match operation.tool() {
        ToolKind::Eraser => CellState::Unpainted,
        _ => CellState::Painted(brush),
    };
    match grid.set_paint(cell, target) {
        Some(previous) if previous != target => {
            operation.record(cell, previous);
            true
        }
        _ => false,
    }
}

/// Manages the current tool and its state.
#[derive(Debug, Clone)]
pub struct ToolManager {
    /// Currently selected tool.
    pub current_tool: ToolKind,
    state: ToolState,
    paint_interval: Duration,
    line_resample_distance: f64,
    rasterizer: LineRasterizer,
}

impl Default for ToolManager {
    fn default() -> Self {
        Self::from_config(&ToolConfig::default())
    }
}

impl ToolManager {
    /// Create a new tool manager.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &ToolConfig) -> Self {
        Self {
            current_tool: ToolKind::default(),
            state: ToolState::Idle,
            paint_interval: config.paint_interval(),
            line_resample_distance: config.line_resample_distance,
            rasterizer: LineRasterizer::from(config),
        }
    }

    /// Set the current tool.
    ///
    /// An interaction already in progress keeps running with the tool it
    /// started with and finishes on the next pointer release.
    pub fn set_tool(&mut self, tool: ToolKind) {
        if self.is_active() && tool != self.current_tool {
            log::debug!(
                "Switched to {} while a {} interaction is in progress",
                tool.name(),
                self.current_tool.name()
            );
        }
        self.current_tool = tool;
    }

    pub fn state(&self) -> &ToolState {
        &self.state
    }

    /// Check if a tool interaction is active.
    pub fn is_active(&self) -> bool {
        !matches!(self.state, ToolState::Idle)
    }

    /// Provisional line cells; empty outside a line drag.
    pub fn preview(&self) -> &[CellIndex] {
        match &self.state {
            ToolState::LineDragging { preview, .. } => preview,
            _ => &[],
        }
    }

    /// Begin an interaction at a world point.
    pub fn pointer_down(&mut self, ctx: &mut ToolContext<'_>, point: Point) -> ToolOutcome {
        // A press without a matching release still finalises the old drag.
        let finished = if self.is_active() {
            self.pointer_up(ctx)
        } else {
            ToolOutcome::None
        };

        let outcome = match self.current_tool {
            tool @ (ToolKind::Brush | ToolKind::Eraser) => {
                let mut operation = Operation::new(tool);
                let painted = ctx
                    .grid
                    .hit_test(point)
                    .is_some_and(|cell| apply_paint(ctx.grid, &mut operation, cell, ctx.brush));
                self.state = ToolState::Painting {
                    operation,
                    last_sample: None,
                };
                if painted { ToolOutcome::Painted } else { ToolOutcome::None }
            }
            ToolKind::Line => {
                self.state = ToolState::LineDragging {
                    anchor: point,
                    last_sample: None,
                    preview: Vec::new(),
                };
                ToolOutcome::None
            }
            ToolKind::Zoom => {
                let zoomed_in = ctx.camera.toggle_zoom(point);
                log::info!(
                    "Zoom {} at ({:.3}, {:.3})",
                    if zoomed_in { "in" } else { "out" },
                    point.x,
                    point.y
                );
                ToolOutcome::ZoomToggled { zoomed_in }
            }
        };

        if outcome == ToolOutcome::None { finished } else { outcome }
    }

    /// Update the current interaction.
    pub fn pointer_move(
        &mut self,
        ctx: &mut ToolContext<'_>,
        point: Point,
        time: Duration,
    ) -> ToolOutcome {
        match &mut self.state {
            ToolState::Idle => ToolOutcome::None,
            ToolState::Painting {
                operation,
                last_sample,
            } => {
                if let Some(last) = *last_sample {
                    if time.saturating_sub(last) < self.paint_interval {
                        return ToolOutcome::None;
                    }
                }
                *last_sample = Some(time);
                let painted = ctx
                    .grid
                    .hit_test(point)
                    .is_some_and(|cell| apply_paint(ctx.grid, operation, cell, ctx.brush));
                if painted { ToolOutcome::Painted } else { ToolOutcome::None }
            }
            ToolState::LineDragging {
                anchor,
                last_sample,
                preview,
            } => {
                if let Some(last) = *last_sample {
                    if last.distance(point) < self.line_resample_distance {
                        return ToolOutcome::None;
                    }
                }
                *last_sample = Some(point);
                *preview = self.rasterizer.rasterize(ctx.grid, *anchor, point);
                ToolOutcome::PreviewUpdated
            }
        }
    }

    /// End the current interaction, committing its edits to the undo log.
    pub fn pointer_up(&mut self, ctx: &mut ToolContext<'_>) -> ToolOutcome {
        match std::mem::take(&mut self.state) {
            ToolState::Idle => ToolOutcome::None,
            ToolState::Painting { operation, .. } => {
                let edits = operation.len();
                let tool = operation.tool();
                if ctx.history.push(operation) {
                    log::info!("Committed {} stroke ({} edits)", tool.name(), edits);
                }
                ToolOutcome::StrokeFinished { edits }
            }
            ToolState::LineDragging { preview, .. } => {
                let mut operation = Operation::new(ToolKind::Line);
                for cell in preview {
                    apply_paint(ctx.grid, &mut operation, cell, ctx.brush);
                }
                let edits = operation.len();
                if ctx.history.push(operation) {
                    log::info!("Committed line ({} edits)", edits);
                }
                ToolOutcome::LineCommitted { edits }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixture {
        grid: HexGrid,
        camera: Camera,
        history: UndoLog,
        brush: Rgb,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                grid: HexGrid::default(),
                camera: Camera::default(),
                history: UndoLog::default(),
                brush: Rgb::RED,
            }
        }

        fn ctx(&mut self) -> ToolContext<'_> {
            ToolContext {
                grid: &mut self.grid,
                camera: &mut self.camera,
                history: &mut self.history,
                brush: self.brush,
            }
        }

        fn center(&self, row: usize, col: usize) -> Point {
            self.grid.center_of(CellIndex::new(row, col)).unwrap()
        }
    }

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn test_tool_selection() {
        let mut tm = ToolManager::new();
        assert_eq!(tm.current_tool, ToolKind::Brush);

        tm.set_tool(ToolKind::Line);
        assert_eq!(tm.current_tool, ToolKind::Line);
        assert!(!tm.is_active());
    }

    #[test]
    fn test_brush_click_paints_and_commits() {
        let mut f = Fixture::new();
        let mut tm = ToolManager::new();
        let p = f.center(5, 5);

        assert_eq!(tm.pointer_down(&mut f.ctx(), p), ToolOutcome::Painted);
        assert!(tm.is_active());
        assert_eq!(
            tm.pointer_up(&mut f.ctx()),
            ToolOutcome::StrokeFinished { edits: 1 }
        );
        assert!(!tm.is_active());
        assert_eq!(f.grid.state(CellIndex::new(5, 5)), CellState::Painted(Rgb::RED));
        assert_eq!(f.history.len(), 1);
    }

    #[test]
    fn test_repainting_same_cell_records_once() {
        let mut f = Fixture::new();
        let mut tm = ToolManager::new();
        let p = f.center(2, 2);

        tm.pointer_down(&mut f.ctx(), p);
        assert_eq!(tm.pointer_move(&mut f.ctx(), p, ms(100)), ToolOutcome::None);
        assert_eq!(tm.pointer_move(&mut f.ctx(), p, ms(200)), ToolOutcome::None);
        tm.pointer_up(&mut f.ctx());

        assert_eq!(f.history.peek().map(Operation::len), Some(1));
    }

    #[test]
    fn test_drag_is_throttled() {
        let mut f = Fixture::new();
        let mut tm = ToolManager::new();
        let (a, b, c) = (f.center(1, 1), f.center(1, 2), f.center(1, 3));

        tm.pointer_down(&mut f.ctx(), a);
        assert_eq!(tm.pointer_move(&mut f.ctx(), b, ms(10)), ToolOutcome::Painted);
        // Only 20ms after the last accepted sample.
        assert_eq!(tm.pointer_move(&mut f.ctx(), c, ms(30)), ToolOutcome::None);
        assert_eq!(f.grid.state(CellIndex::new(1, 3)), CellState::Unpainted);
        assert_eq!(tm.pointer_move(&mut f.ctx(), c, ms(40)), ToolOutcome::Painted);
        tm.pointer_up(&mut f.ctx());

        assert_eq!(f.history.len(), 1);
        assert_eq!(f.history.peek().map(Operation::len), Some(3));
    }

    #[test]
    fn test_eraser_skips_empty_cells() {
        let mut f = Fixture::new();
        let mut tm = ToolManager::new();
        let p = f.center(3, 4);
        f.grid.set_paint(CellIndex::new(3, 4), CellState::Painted(Rgb::BLUE));

        let start = f.center(0, 0);
        tm.set_tool(ToolKind::Eraser);
        tm.pointer_down(&mut f.ctx(), start);
        assert_eq!(tm.pointer_move(&mut f.ctx(), p, ms(50)), ToolOutcome::Painted);
        assert_eq!(
            tm.pointer_up(&mut f.ctx()),
            ToolOutcome::StrokeFinished { edits: 1 }
        );
        assert!(f.grid.is_blank());
    }

    #[test]
    fn test_miss_records_nothing() {
        let mut f = Fixture::new();
        let mut tm = ToolManager::new();

        assert_eq!(
            tm.pointer_down(&mut f.ctx(), Point::new(0.99, -0.99)),
            ToolOutcome::None
        );
        tm.pointer_up(&mut f.ctx());
        assert!(f.history.is_empty());
    }

    #[test]
    fn test_line_drag_preview_and_commit() {
        let mut f = Fixture::new();
        f.brush = Rgb::GREEN;
        let mut tm = ToolManager::new();
        tm.set_tool(ToolKind::Line);
        let (start, end) = (f.center(0, 0), f.center(3, 3));

        assert_eq!(tm.pointer_down(&mut f.ctx(), start), ToolOutcome::None);
        assert!(tm.preview().is_empty());
        assert_eq!(
            tm.pointer_move(&mut f.ctx(), end, ms(5)),
            ToolOutcome::PreviewUpdated
        );
        let preview = tm.preview().to_vec();
        assert!(preview.contains(&CellIndex::new(0, 0)));
        assert!(preview.contains(&CellIndex::new(3, 3)));
        // Preview does not touch the grid.
        assert!(f.grid.is_blank());

        let outcome = tm.pointer_up(&mut f.ctx());
        assert_eq!(outcome, ToolOutcome::LineCommitted { edits: preview.len() });
        assert!(tm.preview().is_empty());
        for cell in &preview {
            assert_eq!(f.grid.state(*cell), CellState::Painted(Rgb::GREEN));
        }
        assert_eq!(f.grid.painted_count(), preview.len());
    }

    #[test]
    fn test_line_resample_distance() {
        let mut f = Fixture::new();
        let mut tm = ToolManager::new();
        tm.set_tool(ToolKind::Line);
        let start = f.center(0, 0);
        let end = f.center(4, 0);

        tm.pointer_down(&mut f.ctx(), start);
        tm.pointer_move(&mut f.ctx(), end, ms(1));
        let nudged = Point::new(end.x + 0.005, end.y);
        assert_eq!(tm.pointer_move(&mut f.ctx(), nudged, ms(2)), ToolOutcome::None);
    }

    #[test]
    fn test_line_click_without_move_commits_nothing() {
        let mut f = Fixture::new();
        let mut tm = ToolManager::new();
        tm.set_tool(ToolKind::Line);
        let p = f.center(1, 1);
        tm.pointer_down(&mut f.ctx(), p);
        assert_eq!(
            tm.pointer_up(&mut f.ctx()),
            ToolOutcome::LineCommitted { edits: 0 }
        );
        assert!(f.history.is_empty());
    }

    #[test]
    fn test_zoom_toggles() {
        let mut f = Fixture::new();
        let mut tm = ToolManager::new();
        tm.set_tool(ToolKind::Zoom);

        let outcome = tm.pointer_down(&mut f.ctx(), Point::new(0.5, 0.5));
        assert_eq!(outcome, ToolOutcome::ZoomToggled { zoomed_in: true });
        assert!(!tm.is_active());
        assert!(f.camera.zoomed_in);
        assert_eq!(tm.current_tool.cursor(f.camera.zoomed_in), CursorIcon::ZoomOut);

        let outcome = tm.pointer_down(&mut f.ctx(), Point::new(0.1, 0.1));
        assert_eq!(outcome, ToolOutcome::ZoomToggled { zoomed_in: false });
        assert_eq!(f.camera.offset, kurbo::Vec2::ZERO);
    }

    #[test]
    fn test_switch_mid_drag_keeps_started_tool() {
        let mut f = Fixture::new();
        let mut tm = ToolManager::new();
        let (a, b) = (f.center(6, 6), f.center(6, 7));

        tm.pointer_down(&mut f.ctx(), a);
        tm.set_tool(ToolKind::Eraser);
        assert!(tm.is_active());
        tm.pointer_move(&mut f.ctx(), b, ms(50));
        tm.pointer_up(&mut f.ctx());

        assert_eq!(f.grid.state(CellIndex::new(6, 7)), CellState::Painted(Rgb::RED));
        assert_eq!(f.history.peek().map(Operation::tool), Some(ToolKind::Brush));
    }

    #[test]
    fn test_press_while_active_finalises_previous() {
        let mut f = Fixture::new();
        let mut tm = ToolManager::new();
        let (a, b) = (f.center(1, 1), f.center(2, 2));

        tm.pointer_down(&mut f.ctx(), a);
        tm.pointer_down(&mut f.ctx(), b);
        tm.pointer_up(&mut f.ctx());
        assert_eq!(f.history.len(), 2);
    }

    #[test]
    fn test_cursor_names() {
        assert_eq!(ToolKind::Brush.cursor(false).css_name(), "crosshair");
        assert_eq!(ToolKind::Eraser.cursor(true).css_name(), "no-drop");
        assert_eq!(ToolKind::Zoom.cursor(false).css_name(), "zoom-in");
        assert_eq!(ToolKind::Line.cursor(false).css_name(), "pointer");
    }
}
