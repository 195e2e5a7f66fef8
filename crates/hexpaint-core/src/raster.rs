//! Line rasterization over the hex lattice.

use crate::config::ToolConfig;
use crate::grid::{CellIndex, HexGrid};
use kurbo::Point;

/// Distance to the endpoint at which stepping stops.
pub const STEP_TOLERANCE: f64 = 0.01;

/// Hard cap on stepping iterations.
pub const MAX_STEPS: usize = 1000;

/// Walks a straight segment in hex-radius increments and collects the cells
/// it passes through.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineRasterizer {
    pub tolerance: f64,
    pub max_steps: usize,
}

impl Default for LineRasterizer {
    fn default() -> Self {
        Self {
            tolerance: STEP_TOLERANCE,
            max_steps: MAX_STEPS,
        }
    }
}

impl From<&ToolConfig> for LineRasterizer {
    fn from(config: &ToolConfig) -> Self {
        Self {
            tolerance: config.line_step_tolerance,
            max_steps: config.line_max_steps,
        }
    }
}

/// Move `value` one `step` toward `target` without passing it.
fn approach(value: f64, target: f64, step: f64) -> f64 {
    let remaining = target - value;
    if remaining.abs() <= step {
        target
    } else {
        value + step * remaining.signum()
    }
}

impl LineRasterizer {
    /// Ordered, deduplicated cells between `from` and `to`.
    ///
    /// Uses error-accumulating stepping: each iteration advances by one hex
    /// radius along whichever axes have fallen behind the ideal line. Points
    /// that hit no cell are skipped. The cell under `to` closes the sequence
    /// unless the step cap was reached first, in which case the cells found
    /// so far are returned.
    pub fn rasterize(&self, grid: &HexGrid, from: Point, to: Point) -> Vec<CellIndex> {
        let mut cells = Vec::new();
        let push = |cells: &mut Vec<CellIndex>, p: Point| {
            if let Some(cell) = grid.hit_test(p) {
                if !cells.contains(&cell) {
                    cells.push(cell);
                }
            }
        };

        let step = grid.radius();
        let dx = (to.x - from.x).abs();
        let dy = (to.y - from.y).abs();
        let mut err = dx - dy;
        let (mut x, mut y) = (from.x, from.y);
        let mut steps = 0;

        while (x - to.x).abs() > self.tolerance || (y - to.y).abs() > self.tolerance {
            if steps >= self.max_steps {
                log::debug!(
                    "Line rasterization capped after {} steps, returning {} cells",
                    steps,
                    cells.len()
                );
                return cells;
            }
            push(&mut cells, Point::new(x, y));

            let e2 = 2.0 * err;
            if e2 > -dy {
                err -= dy;
                x = approach(x, to.x, step);
            }
            if e2 < dx {
                err += dx;
                y = approach(y, to.y, step);
            }
            steps += 1;
        }

        push(&mut cells, to);
        cells
    }
}

/// Rasterize with the default tolerance and step cap.
pub fn rasterize(grid: &HexGrid, from: Point, to: Point) -> Vec<CellIndex> {
    LineRasterizer::default().rasterize(grid, from, to)
}
