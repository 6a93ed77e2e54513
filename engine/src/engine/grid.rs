// engine/src/engine/grid.rs
#![forbid(unsafe_code)]

use crate::engine::geometry::Cell;

/// Occupancy grid mirroring the actor path.
///
/// Row-major, `0` = free, `1` = actor. Kept in lockstep with the path by `Game`,
/// so collision and free-cell queries never walk the path.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<u8>,
    occupied: usize,
}

impl Board {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![0u8; width * height],
            occupied: 0,
        }
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
    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }

    #[inline]
    pub fn occupied_count(&self) -> usize {
        self.occupied
    }

    #[inline]
    pub fn free_count(&self) -> usize {
        self.cell_count() - self.occupied
    }

    #[inline]
    pub fn in_bounds(&self, c: Cell) -> bool {
        c.x >= 0 && c.y >= 0 && (c.x as usize) < self.width && (c.y as usize) < self.height
    }

    #[inline]
    fn idx(&self, c: Cell) -> Option<usize> {
        self.in_bounds(c).then(|| (c.y as usize) * self.width + (c.x as usize))
    }

    /// Out-of-bounds cells report as free; bounds are checked separately by the kernel.
    #[inline]
    pub fn is_occupied(&self, c: Cell) -> bool {
        self.idx(c).is_some_and(|i| self.cells[i] != 0)
    }

    /// No-op for out-of-bounds cells.
    pub fn occupy(&mut self, c: Cell) {
        let Some(i) = self.idx(c) else {
            return;
        };
        if self.cells[i] == 0 {
            self.cells[i] = 1;
            self.occupied += 1;
        }
    }

    /// No-op for out-of-bounds cells.
    pub fn vacate(&mut self, c: Cell) {
        let Some(i) = self.idx(c) else {
            return;
        };
        if self.cells[i] != 0 {
            self.cells[i] = 0;
            self.occupied -= 1;
        }
    }

    pub fn clear(&mut self) {
        self.cells.fill(0);
        self.occupied = 0;
    }

    /// Every free cell in row-major order.
    pub fn free_cells(&self) -> Vec<Cell> {
        let mut out = Vec::with_capacity(self.free_count());
        for (i, &v) in self.cells.iter().enumerate() {
            if v == 0 {
                out.push(Cell::new((i % self.width) as i32, (i / self.width) as i32));
            }
        }
        out
    }
}
