//! Editor state: owns the lattice, view, tools and undo log.

use crate::camera::Camera;
use crate::config::EditorConfig;
use crate::grid::{CellIndex, HexGrid, Rgb};
use crate::history::UndoLog;
use crate::input::{EditorInput, InputMapper, KeyAction, KeyEvent, PointerEvent};
use crate::tools::{CursorIcon, ToolContext, ToolKind, ToolManager, ToolOutcome};
use kurbo::Size;

/// Result of handling one input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Response {
    /// The renderer must repaint the lattice and preview.
    pub redraw: bool,
}

impl Response {
    fn redraw_if(redraw: bool) -> Self {
        Self { redraw }
    }
}

/// All editing state of one canvas.
///
/// Constructed once from an [`EditorConfig`]; every mutation goes through
/// [`EditorState::handle`] or the methods it dispatches to.
#[derive(Debug, Clone)]
pub struct EditorState {
    grid: HexGrid,
    camera: Camera,
    tools: ToolManager,
    history: UndoLog,
    mapper: InputMapper,
    brush: Rgb,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new(&EditorConfig::default())
    }
}

impl EditorState {
    pub fn new(config: &EditorConfig) -> Self {
        let [r, g, b] = config.brush;
        Self {
            grid: HexGrid::from_config(&config.grid),
            camera: Camera::new(config.zoom_factor),
            tools: ToolManager::from_config(&config.tools),
            history: UndoLog::new(config.undo_capacity),
            mapper: InputMapper::new(config.viewport),
            brush: Rgb::from_channels(r, g, b),
        }
    }

    /// Apply one input and report whether a redraw is needed.
    pub fn handle(&mut self, input: EditorInput) -> Response {
        match input {
            EditorInput::Pointer(event) => Response::redraw_if(self.pointer(event).needs_redraw()),
            EditorInput::Key(event) => Response::redraw_if(self.key(&event)),
            EditorInput::SelectTool(tool) => {
                self.set_tool(tool);
                Response::default()
            }
            EditorInput::SetBrushChannels([r, g, b]) => {
                self.brush = Rgb::from_channels(r, g, b);
                Response::default()
            }
            EditorInput::Resize(size) => {
                self.mapper.viewport = size;
                Response::redraw_if(true)
            }
        }
    }

    /// Dispatch a pointer event to the tool manager.
    pub fn pointer(&mut self, event: PointerEvent) -> ToolOutcome {
        let world = event
            .position()
            .map(|p| self.mapper.screen_to_world(&self.camera, p));
        let mut ctx = ToolContext {
            grid: &mut self.grid,
            camera: &mut self.camera,
            history: &mut self.history,
            brush: self.brush,
        };
        match (event, world) {
            (PointerEvent::Down { .. }, Some(point)) => self.tools.pointer_down(&mut ctx, point),
            (PointerEvent::Move { time, .. }, Some(point)) => {
                self.tools.pointer_move(&mut ctx, point, time)
            }
            (PointerEvent::Up { .. } | PointerEvent::Leave { .. }, _) => {
                self.tools.pointer_up(&mut ctx)
            }
            _ => ToolOutcome::None,
        }
    }

    /// Handle a key event. Returns true if the grid changed.
    pub fn key(&mut self, event: &KeyEvent) -> bool {
        match event.action() {
            Some(KeyAction::Undo) => self.undo(),
            None => false,
        }
    }

    /// Revert the most recent operation. Returns true if anything changed.
    ///
    /// A drag still in progress is committed first, so the operation it
    /// opened never records state that the undo is about to replace.
    pub fn undo(&mut self) -> bool {
        let finished = self.finish_interaction().needs_redraw();
        self.history.undo(&mut self.grid) || finished
    }

    /// Commit the active brush, eraser or line drag, if any.
    fn finish_interaction(&mut self) -> ToolOutcome {
        if !self.tools.is_active() {
            return ToolOutcome::None;
        }
        log::debug!("Committing active interaction before undo");
        let mut ctx = ToolContext {
            grid: &mut self.grid,
            camera: &mut self.camera,
            history: &mut self.history,
            brush: self.brush,
        };
        self.tools.pointer_up(&mut ctx)
    }

    pub fn set_tool(&mut self, tool: ToolKind) {
        self.tools.set_tool(tool);
    }

    pub fn set_brush_color(&mut self, color: Rgb) {
        self.brush = color;
    }

    pub fn brush_color(&self) -> Rgb {
        self.brush
    }

    pub fn current_tool(&self) -> ToolKind {
        self.tools.current_tool
    }

    pub fn cursor(&self) -> CursorIcon {
        self.tools.current_tool.cursor(self.camera.zoomed_in)
    }

    pub fn grid(&self) -> &HexGrid {
        &self.grid
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn tools(&self) -> &ToolManager {
        &self.tools
    }

    pub fn history(&self) -> &UndoLog {
        &self.history
    }

    pub fn mapper(&self) -> &InputMapper {
        &self.mapper
    }

    pub fn viewport(&self) -> Size {
        self.mapper.viewport
    }

    /// Provisional line cells to draw on top of the lattice.
    pub fn preview(&self) -> &[CellIndex] {
        self.tools.preview()
    }
}
