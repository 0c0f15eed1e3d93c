//! A travelling sine line.

use anyhow::Result;

use crate::effect::{Effect, Flow};
use crate::term::ScreenBuffer;
use crate::types::Color;

pub const WAVE_DESCRIPTION: &str = "Travelling sine wave (optional colour argument)";

pub const FREQUENCY: f64 = 0.1;
pub const AMPLITUDE: f64 = 3.0;
/// Phase advance per frame.
pub const SPEED: f64 = 0.2;

const WAVE_GLYPH: char = '~';

#[derive(Debug, Clone)]
pub struct ParametricWave {
    color: Color,
    background: Color,
    phase: f64,
    width: u16,
    height: u16,
}

impl ParametricWave {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            background: Color::Black,
            phase: 0.0,
            width: 0,
            height: 0,
        }
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Row of the wave at column `x` for the current phase.
    pub fn row_at(&self, x: u16) -> i32 {
        let offset = (x as f64 * FREQUENCY + self.phase).sin() * AMPLITUDE;
        (self.height as f64 / 2.0 + offset) as i32
    }
}

impl Default for ParametricWave {
    fn default() -> Self {
        Self::new(Color::Cyan)
    }
}

impl Effect for ParametricWave {
    fn name(&self) -> &'static str {
        "wave"
    }

    fn description(&self) -> &'static str {
        WAVE_DESCRIPTION
    }

    fn default_interval_ms(&self) -> u32 {
        100
    }

    fn background(&self) -> Color {
        self.background
    }

    fn reset(&mut self, width: u16, height: u16, _seed: u64) {
        self.phase = 0.0;
        self.width = width;
        self.height = height;
    }

    fn step(&mut self, buf: &mut ScreenBuffer, _dt_ms: u32, _frame: u64) -> Result<Flow> {
        buf.clear();
        for x in 0..self.width {
            buf.put_char(x as i32, self.row_at(x), WAVE_GLYPH, self.color);
        }
        self.phase += SPEED;
        Ok(Flow::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_glyph_per_column_within_amplitude() {
        let mut wave = ParametricWave::new(Color::Yellow);
        wave.reset(30, 20, 0);
        let mut buf = ScreenBuffer::new(30, 20);
        wave.step(&mut buf, 100, 0).unwrap();
        for x in 0..30 {
            let rows: Vec<i32> = (0..20)
                .filter(|&y| buf.get(x, y).map(|c| c.ch) == Some(WAVE_GLYPH))
                .collect();
            assert_eq!(rows.len(), 1, "column {x}");
            assert!((rows[0] - 10).abs() <= AMPLITUDE as i32);
            assert_eq!(buf.get(x, rows[0]).map(|c| c.fg), Some(Color::Yellow));
        }
    }
}
