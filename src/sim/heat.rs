//! Per-cell heat field
//!
//! One scalar per grid cell. Heat diffuses toward the average of the four
//! toroidal neighbors each step and is spent by bond formation. The field is
//! double-buffered so a diffusion step never reads values it already wrote.

use crate::consts::DIFFUSION_RATE;
use crate::lerp;

#[derive(Debug, Clone)]
pub struct HeatField {
    width: usize,
    height: usize,
    cells: Vec<f32>,
    back: Vec<f32>,
}

impl HeatField {
    /// Build a field with per-cell values produced by `init(cell_index)`
    pub fn new(width: u32, height: u32, mut init: impl FnMut(usize) -> f32) -> Self {
        let (width, height) = (width as usize, height as usize);
        let n = width * height;
        Self {
            width,
            height,
            cells: (0..n).map(&mut init).collect(),
            back: vec![0.0; n],
        }
    }

    #[inline]
    pub fn get(&self, cell: usize) -> f32 {
        self.cells[cell]
    }

    /// Spend bond energy from a cell. May drive the cell slightly negative
    /// when the formed bond is a double/triple; diffusion pulls it back up.
    #[inline]
    pub fn consume(&mut self, cell: usize, energy: f32) {
        self.cells[cell] -= energy;
    }

    /// Raw field values, row-major, for a texture-like consumer
    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.cells
    }

    pub fn total(&self) -> f32 {
        self.cells.iter().sum()
    }

    /// One diffusion step: blend each cell toward the average of its four
    /// toroidal neighbors, then swap buffers. The rate is per step, not per
    /// second; callers step once per frame.
    pub fn diffuse(&mut self) {
        let (w, h) = (self.width, self.height);
        for y in 0..h {
            let yp = if y == 0 { h - 1 } else { y - 1 };
            let yn = if y == h - 1 { 0 } else { y + 1 };
            for x in 0..w {
                let xp = if x == 0 { w - 1 } else { x - 1 };
                let xn = if x == w - 1 { 0 } else { x + 1 };

                let center = self.cells[y * w + x];
                let neighbors = self.cells[yn * w + x]
                    + self.cells[yp * w + x]
                    + self.cells[y * w + xn]
                    + self.cells[y * w + xp];
                self.back[y * w + x] = lerp(DIFFUSION_RATE, center, 0.25 * neighbors);
            }
        }
        std::mem::swap(&mut self.cells, &mut self.back);
    }
}
