//! Hexagonal lattice geometry and per-cell paint state.

use crate::config::GridConfig;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Square root of three, the vertical stride factor of the lattice.
const SQRT_3: f64 = 1.732_050_807_568_877_2;

/// An RGB color with channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const RED: Rgb = Rgb::new(1.0, 0.0, 0.0);
    pub const GREEN: Rgb = Rgb::new(0.0, 1.0, 0.0);
    pub const BLUE: Rgb = Rgb::new(0.0, 0.0, 1.0);
    pub const BLACK: Rgb = Rgb::new(0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build a color from three 0..=255 slider channels.
    pub fn from_channels(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    /// Convert back to 0..=255 channels (rounded).
    pub fn to_channels(self) -> [u8; 3] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b)]
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::RED
    }
}

/// Paint state of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum CellState {
    #[default]
    Unpainted,
    Painted(Rgb),
}

impl CellState {
    pub fn is_painted(&self) -> bool {
        matches!(self, CellState::Painted(_))
    }

    pub fn color(&self) -> Option<Rgb> {
        match self {
            CellState::Painted(color) => Some(*color),
            CellState::Unpainted => None,
        }
    }
}

/// Lattice coordinates of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellIndex {
    pub row: usize,
    pub col: usize,
}

impl CellIndex {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl From<(usize, usize)> for CellIndex {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

/// One hexagon slot of the lattice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    center: Point,
    /// Current paint state.
    pub state: CellState,
}

impl Cell {
    /// Center of the hexagon in world coordinates.
    pub fn center(&self) -> Point {
        self.center
    }
}

/// Fixed-size offset ("brick") hexagonal lattice.
///
/// Rows advance along +x by `1.5 * radius`, columns advance along -y by
/// `sqrt(3) * radius`, and odd rows are shifted down by half a column stride.
/// Dimensions and centers are fixed at construction; only paint state mutates.
#[derive(Debug, Clone)]
pub struct HexGrid {
    rows: usize,
    cols: usize,
    radius: f64,
    origin: Point,
    cells: Vec<Cell>,
}

impl HexGrid {
    /// Create an unpainted lattice with the first cell centered at `origin`.
    pub fn new(rows: usize, cols: usize, radius: f64, origin: Point) -> Self {
        let mut cells = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                cells.push(Cell {
                    center: Self::compute_center(origin, radius, row, col),
                    state: CellState::Unpainted,
                });
            }
        }
        Self {
            rows,
            cols,
            radius,
            origin,
            cells,
        }
    }

    pub fn from_config(config: &GridConfig) -> Self {
        Self::new(config.rows, config.cols, config.hex_radius, config.origin)
    }

    fn compute_center(origin: Point, radius: f64, row: usize, col: usize) -> Point {
        let x = origin.x + 1.5 * row as f64 * radius;
        let mut y = origin.y - SQRT_3 * col as f64 * radius;
        if row % 2 != 0 {
            y -= SQRT_3 * radius / 2.0;
        }
        Point::new(x, y)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Circumradius of every hexagon.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn contains(&self, index: CellIndex) -> bool {
        index.row < self.rows && index.col < self.cols
    }

    fn offset(&self, index: CellIndex) -> Option<usize> {
        self.contains(index).then(|| index.row * self.cols + index.col)
    }

    pub fn cell_at(&self, index: CellIndex) -> Option<&Cell> {
        self.offset(index).map(|i| &self.cells[i])
    }

    pub fn center_of(&self, index: CellIndex) -> Option<Point> {
        self.cell_at(index).map(Cell::center)
    }

    /// Paint state of a cell; out-of-range indices read as unpainted.
    pub fn state(&self, index: CellIndex) -> CellState {
        self.cell_at(index).map(|c| c.state).unwrap_or_default()
    }

    /// Replace the paint state of a cell, returning the previous state.
    ///
    /// Returns `None` (and changes nothing) for an out-of-range index.
    pub fn set_paint(&mut self, index: CellIndex, state: CellState) -> Option<CellState> {
        let i = self.offset(index)?;
        Some(std::mem::replace(&mut self.cells[i].state, state))
    }

    /// Hit-test a world point against the lattice.
    ///
    /// A point belongs to a cell when its distance to the cell center is at
    /// most the hex radius. This is a circumscribed-circle approximation, so
    /// neighbouring circles overlap near hexagon corners; the first cell in
    /// row-major order wins.
    pub fn hit_test(&self, point: Point) -> Option<CellIndex> {
        let r2 = self.radius * self.radius;
        self.cells
            .iter()
            .position(|cell| {
                let dx = point.x - cell.center.x;
                let dy = point.y - cell.center.y;
                dx * dx + dy * dy <= r2
            })
            .map(|i| CellIndex::new(i / self.cols, i % self.cols))
    }

    /// Iterate over all cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (CellIndex, &Cell)> {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (CellIndex::new(i / cols, i % cols), cell))
    }

    /// Iterate over painted cells and their colors.
    pub fn painted(&self) -> impl Iterator<Item = (CellIndex, Rgb)> + '_ {
        self.iter()
            .filter_map(|(index, cell)| cell.state.color().map(|color| (index, color)))
    }

    pub fn painted_count(&self) -> usize {
        self.cells.iter().filter(|c| c.state.is_painted()).count()
    }

    /// Whether no cell is painted.
    pub fn is_blank(&self) -> bool {
        self.painted_count() == 0
    }

    /// The six corners of a hexagon, starting at angle 0 and turning by 60°.
    pub fn hexagon_vertices(&self, index: CellIndex) -> Option<[Point; 6]> {
        let center = self.center_of(index)?;
        Some(std::array::from_fn(|i| {
            let angle = i as f64 * PI / 3.0;
            Point::new(
                center.x + self.radius * angle.cos(),
                center.y + self.radius * angle.sin(),
            )
        }))
    }

    /// Bounding box of every hexagon in world coordinates.
    pub fn bounds(&self) -> Rect {
        let mut bounds: Option<Rect> = None;
        for cell in &self.cells {
            let c = cell.center;
            let r = Rect::new(
                c.x - self.radius,
                c.y - self.radius,
                c.x + self.radius,
                c.y + self.radius,
            );
            bounds = Some(bounds.map_or(r, |b| b.union(r)));
        }
        bounds.unwrap_or_else(|| Rect::from_origin_size(self.origin, (0.0, 0.0)))
    }
}

impl Default for HexGrid {
    fn default() -> Self {
        Self::from_config(&GridConfig::default())
    }
}
