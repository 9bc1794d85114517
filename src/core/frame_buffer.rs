use std::ops::{Index, IndexMut};

use rayon::prelude::*;

use crate::color::TerminalColor;
use crate::renderer::cell::Cell;

/// Row-major grid of cells: `index = y * width + x`.
///
/// Linear writes through [`FrameBuffer::set`] are bounds-checked no-ops when
/// out of range. Indexing by `(x, y)` or by a float point is not: an
/// out-of-range coordinate is the caller's bug and may panic or land on the
/// wrong cell. The rasterizer checks bounds itself before writing.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameBuffer<C> {
    width: usize,
    height: usize,
    cells: Vec<Cell<C>>,
}

impl<C: TerminalColor> FrameBuffer<C> {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); width * height],
        }
    }

    /// Wraps existing cells; `cells.len()` must equal `width * height`.
    pub fn from_cells(width: usize, height: usize, cells: Vec<Cell<C>>) -> Option<Self> {
        (cells.len() == width * height).then_some(Self {
            width,
            height,
            cells,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn cells(&self) -> &[Cell<C>] {
        &self.cells
    }

    #[inline]
    pub fn cells_mut(&mut self) -> &mut [Cell<C>] {
        &mut self.cells
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell<C>]> {
        self.cells.chunks(self.width.max(1))
    }

    #[inline]
    pub fn index_of(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Rounds half away from zero, like `f32::round`.
    #[inline]
    pub fn point_index(&self, x: f32, y: f32) -> usize {
        self.index_of(x.round() as usize, y.round() as usize)
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    pub fn get(&self, x: i32, y: i32) -> Option<&Cell<C>> {
        if self.in_bounds(x, y) {
            Some(&self.cells[self.index_of(x as usize, y as usize)])
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, x: i32, y: i32) -> Option<&mut Cell<C>> {
        if self.in_bounds(x, y) {
            let idx = self.index_of(x as usize, y as usize);
            Some(&mut self.cells[idx])
        } else {
            None
        }
    }

    /// Unchecked float-coordinate access.
    pub fn at_mut(&mut self, x: f32, y: f32) -> &mut Cell<C> {
        let idx = self.point_index(x, y);
        &mut self.cells[idx]
    }

    /// Out-of-range indices are ignored.
    pub fn set(&mut self, index: usize, cell: Cell<C>) {
        if let Some(slot) = self.cells.get_mut(index) {
            *slot = cell;
        }
    }

    pub fn clear(&mut self) {
        self.fill(Cell::default());
    }

    pub fn fill(&mut self, cell: Cell<C>) {
        self.cells.fill(cell);
    }

    /// Reallocates (and clears) only when the cell count changes.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        if self.cells.len() != width * height {
            self.cells = vec![Cell::default(); width * height];
        }
    }

    /// Copies this buffer into another color tier.
    pub fn convert<T: TerminalColor>(&self) -> FrameBuffer<T> {
        FrameBuffer {
            width: self.width,
            height: self.height,
            cells: self.cells.par_iter().map(|c| c.convert()).collect(),
        }
    }
}

impl<C> Index<usize> for FrameBuffer<C> {
    type Output = Cell<C>;

    fn index(&self, index: usize) -> &Cell<C> {
        &self.cells[index]
    }
}

impl<C> IndexMut<usize> for FrameBuffer<C> {
    fn index_mut(&mut self, index: usize) -> &mut Cell<C> {
        &mut self.cells[index]
    }
}

impl<C> Index<(usize, usize)> for FrameBuffer<C> {
    type Output = Cell<C>;

    fn index(&self, (x, y): (usize, usize)) -> &Cell<C> {
        &self.cells[y * self.width + x]
    }
}

impl<C> IndexMut<(usize, usize)> for FrameBuffer<C> {
    fn index_mut(&mut self, (x, y): (usize, usize)) -> &mut Cell<C> {
        &mut self.cells[y * self.width + x]
    }
}
