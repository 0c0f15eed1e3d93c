//! Conway's Game of Life on a toroidal grid.
//!
//! The grid is double-buffered: a generation is computed entirely from
//! `grid` into `next`, then the two are swapped. Edges wrap in both axes.

use anyhow::Result;

use crate::effect::{Effect, Flow};
use crate::rng::SimpleRng;
use crate::term::ScreenBuffer;
use crate::types::Color;

/// Fraction of cells alive after `reset`.
pub const LIFE_DENSITY: f64 = 0.2;

pub const LIFE_DESCRIPTION: &str = "Conway's Game of Life on a wrap-around grid";

const ALIVE_GLYPH: char = 'O';

#[derive(Debug, Clone)]
pub struct ConwayLife {
    width: usize,
    height: usize,
    grid: Vec<bool>,
    next: Vec<bool>,
    generation: u64,
    density: f64,
}

impl ConwayLife {
    pub fn new() -> Self {
        Self::with_density(LIFE_DENSITY)
    }

    pub fn with_density(density: f64) -> Self {
        Self {
            width: 0,
            height: 0,
            grid: Vec::new(),
            next: Vec::new(),
            generation: 0,
            density: density.clamp(0.0, 1.0),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn density(&self) -> f64 {
        self.density
    }

    /// Generations computed since the last reset.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Row-major cell states.
    pub fn grid(&self) -> &[bool] {
        &self.grid
    }

    pub fn population(&self) -> usize {
        self.grid.iter().filter(|&&alive| alive).count()
    }

    pub fn is_alive(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.grid[y * self.width + x]
    }

    pub fn set_alive(&mut self, x: usize, y: usize, alive: bool) {
        if x < self.width && y < self.height {
            self.grid[y * self.width + x] = alive;
        }
    }

    /// Kill every cell.
    pub fn clear(&mut self) {
        self.grid.fill(false);
    }

    /// Live neighbours among the eight surrounding cells, wrapping at edges.
    pub fn neighbor_count(&self, x: usize, y: usize) -> u8 {
        let (w, h) = (self.width, self.height);
        let mut count = 0;
        for dy in [h - 1, 0, 1] {
            for dx in [w - 1, 0, 1] {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let nx = (x + dx) % w;
                let ny = (y + dy) % h;
                if self.grid[ny * w + nx] {
                    count += 1;
                }
            }
        }
        count
    }

    /// Compute one generation.
    pub fn evolve(&mut self) {
        for y in 0..self.height {
            for x in 0..self.width {
                let i = y * self.width + x;
                let n = self.neighbor_count(x, y);
                self.next[i] = if self.grid[i] { n == 2 || n == 3 } else { n == 3 };
            }
        }
        std::mem::swap(&mut self.grid, &mut self.next);
        self.generation += 1;
    }

    fn paint(&self, buf: &mut ScreenBuffer) {
        for y in 0..self.height {
            for x in 0..self.width {
                if self.grid[y * self.width + x] {
                    buf.put_char(x as i32, y as i32, ALIVE_GLYPH, Color::Green);
                }
            }
        }
    }
}

impl Default for ConwayLife {
    fn default() -> Self {
        Self::new()
    }
}

impl Effect for ConwayLife {
    fn name(&self) -> &'static str {
        "life"
    }

    fn description(&self) -> &'static str {
        LIFE_DESCRIPTION
    }

    fn default_interval_ms(&self) -> u32 {
        100
    }

    fn reset(&mut self, width: u16, height: u16, seed: u64) {
        self.width = width as usize;
        self.height = height as usize;
        let len = self.width * self.height;
        let mut rng = SimpleRng::new(seed);

        self.grid.clear();
        self.grid.extend((0..len).map(|_| rng.chance(self.density)));
        self.next.clear();
        self.next.resize(len, false);
        self.generation = 0;
    }

    fn step(&mut self, buf: &mut ScreenBuffer, _dt_ms: u32, _frame: u64) -> Result<Flow> {
        buf.clear();
        self.paint(buf);
        self.evolve();
        Ok(Flow::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty(w: u16, h: u16) -> ConwayLife {
        let mut life = ConwayLife::with_density(0.0);
        life.reset(w, h, 1);
        life
    }

    #[test]
    fn test_block_is_still_life() {
        let mut life = empty(6, 6);
        for (x, y) in [(2, 2), (3, 2), (2, 3), (3, 3)] {
            life.set_alive(x, y, true);
        }
        let before = life.grid().to_vec();
        life.evolve();
        assert_eq!(life.grid(), before.as_slice());
    }

    #[test]
    fn test_blinker_oscillates_with_period_two() {
        let mut life = empty(5, 5);
        for x in 1..=3 {
            life.set_alive(x, 2, true);
        }
        let horizontal = life.grid().to_vec();

        life.evolve();
        assert!(life.is_alive(2, 1) && life.is_alive(2, 2) && life.is_alive(2, 3));
        assert!(!life.is_alive(1, 2) && !life.is_alive(3, 2));

        life.evolve();
        assert_eq!(life.grid(), horizontal.as_slice());
    }

    #[test]
    fn test_density_zero_and_one() {
        let mut dead = ConwayLife::with_density(0.0);
        dead.reset(10, 10, 3);
        assert_eq!(dead.population(), 0);

        let mut full = ConwayLife::with_density(1.0);
        full.reset(10, 10, 3);
        assert_eq!(full.population(), 100);
    }

    #[test]
    fn test_zero_sized_grid_steps() {
        let mut life = ConwayLife::new();
        life.reset(0, 0, 9);
        let mut buf = ScreenBuffer::new(0, 0);
        assert_eq!(life.step(&mut buf, 100, 0).unwrap(), Flow::Continue);
    }
}
