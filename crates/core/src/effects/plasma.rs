//! Plasma: four interfering sine fields mapped onto a glyph density ramp.

use anyhow::Result;

use crate::effect::{Effect, Flow};
use crate::term::ScreenBuffer;
use crate::types::Color;

pub const PLASMA_DESCRIPTION: &str = "Shifting sine-interference plasma";

/// Time advance per frame.
pub const TIME_STEP: f64 = 0.1;

const DENSITY: [char; 10] = [' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];
const FREQ: f64 = 0.05;

#[derive(Debug, Clone, Default)]
pub struct Plasma {
    t: f64,
    width: u16,
    height: u16,
}

impl Plasma {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn time(&self) -> f64 {
        self.t
    }
}

/// Field value in [-1, 1] at a cell for time `t`.
pub fn plasma_value(x: f64, y: f64, t: f64) -> f64 {
    let v1 = (x * FREQ + t).sin();
    let v2 = (y * FREQ + t).sin();
    let v3 = ((x + y) * FREQ + t).sin();
    let v4 = ((x * x + y * y).sqrt() * FREQ + t).sin();
    (v1 + v2 + v3 + v4) / 4.0
}

/// Index into the density ramp for a field value.
pub fn density_index(v: f64) -> usize {
    let last = DENSITY.len() - 1;
    let idx = ((v + 1.0) / 2.0 * last as f64) as isize;
    idx.clamp(0, last as isize) as usize
}

fn ramp_color(index: usize) -> Color {
    match index {
        0..=1 => Color::DarkBlue,
        2..=3 => Color::Blue,
        4..=5 => Color::Cyan,
        6..=7 => Color::DarkCyan,
        _ => Color::White,
    }
}

impl Effect for Plasma {
    fn name(&self) -> &'static str {
        "plasma"
    }

    fn description(&self) -> &'static str {
        PLASMA_DESCRIPTION
    }

    fn default_interval_ms(&self) -> u32 {
        30
    }

    fn reset(&mut self, width: u16, height: u16, _seed: u64) {
        self.t = 0.0;
        self.width = width;
        self.height = height;
    }

    fn step(&mut self, buf: &mut ScreenBuffer, _dt_ms: u32, _frame: u64) -> Result<Flow> {
        for y in 0..self.height {
            for x in 0..self.width {
                let idx = density_index(plasma_value(x as f64, y as f64, self.t));
                buf.put_char(x as i32, y as i32, DENSITY[idx], ramp_color(idx));
            }
        }
        self.t += TIME_STEP;
        Ok(Flow::Continue)
    }
}
