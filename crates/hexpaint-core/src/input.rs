//! Input events and pointer-to-lattice mapping.

use crate::camera::Camera;
use crate::grid::{CellIndex, HexGrid};
use crate::tools::ToolKind;
use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const CTRL: Modifiers = Modifiers {
        shift: false,
        ctrl: true,
        alt: false,
        meta: false,
    };
}

/// Pointer event in canvas pixels (origin top-left).
///
/// `time` is measured from an arbitrary fixed epoch chosen by the caller and
/// only ever compared against other event times.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down { position: Point, time: Duration },
    Move { position: Point, time: Duration },
    Up { position: Point, time: Duration },
    /// Pointer left the canvas; finalises like `Up`.
    Leave { time: Duration },
}

impl PointerEvent {
    pub fn time(&self) -> Duration {
        match self {
            PointerEvent::Down { time, .. }
            | PointerEvent::Move { time, .. }
            | PointerEvent::Up { time, .. }
            | PointerEvent::Leave { time } => *time,
        }
    }

    pub fn position(&self) -> Option<Point> {
        match self {
            PointerEvent::Down { position, .. }
            | PointerEvent::Move { position, .. }
            | PointerEvent::Up { position, .. } => Some(*position),
            PointerEvent::Leave { .. } => None,
        }
    }
}

/// Keyboard event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyEvent {
    Pressed { key: String, modifiers: Modifiers },
    Released { key: String },
}

/// Editor commands bound to keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Undo,
}

impl KeyEvent {
    /// Resolve the shortcut bound to this event, if any.
    pub fn action(&self) -> Option<KeyAction> {
        match self {
            KeyEvent::Pressed { key, modifiers } if modifiers.ctrl && key == "z" => {
                Some(KeyAction::Undo)
            }
            _ => None,
        }
    }
}

/// Everything the editor reacts to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EditorInput {
    Pointer(PointerEvent),
    Key(KeyEvent),
    /// Mode-select button.
    SelectTool(ToolKind),
    /// Color sliders, each channel in 0..=255.
    SetBrushChannels([u8; 3]),
    /// Canvas resized (pixels).
    Resize(Size),
}

/// Maps raw pointer positions to world points and lattice cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputMapper {
    /// Canvas size in pixels.
    pub viewport: Size,
}

impl InputMapper {
    pub fn new(viewport: Size) -> Self {
        Self { viewport }
    }

    /// Pointer pixels to world coordinates under the current view.
    pub fn screen_to_world(&self, camera: &Camera, pointer: Point) -> Point {
        camera.screen_to_world(pointer, self.viewport)
    }

    /// World point to the cell it hits, if any.
    pub fn world_to_cell(&self, grid: &HexGrid, point: Point) -> Option<CellIndex> {
        grid.hit_test(point)
    }

    /// Pointer pixels straight to a cell.
    pub fn screen_to_cell(
        &self,
        camera: &Camera,
        grid: &HexGrid,
        pointer: Point,
    ) -> Option<CellIndex> {
        self.world_to_cell(grid, self.screen_to_world(camera, pointer))
    }
}
