//! Lorenz attractor traced with explicit Euler steps.
//!
//! Each step integrates the system once, projects the new point through a
//! rotation that advances with elapsed time, and appends it to a bounded
//! trail. When the trail is full the oldest point is dropped and is no longer
//! painted, so it disappears from the screen on the next flush.

use std::collections::VecDeque;

use anyhow::Result;

use crate::effect::{Effect, Flow};
use crate::term::ScreenBuffer;
use crate::types::Color;

pub const SIGMA: f64 = 10.0;
pub const RHO: f64 = 28.0;
pub const BETA: f64 = 8.0 / 3.0;
pub const DT: f64 = 0.01;

/// Points kept on screen.
pub const TRAIL_CAPACITY: usize = 200;

pub const LORENZ_DESCRIPTION: &str = "Rotating trail of the Lorenz chaotic attractor";

const SCALE: f64 = 1.5;
/// Terminal glyphs are roughly twice as tall as wide.
const ASPECT: f64 = 2.0;
const Z_CENTER: f64 = 25.0;
const HUE_STEP: f64 = 0.05;
const HUE_WRAP: f64 = 6.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrailPoint {
    pub x: i32,
    pub y: i32,
    pub color: Color,
}

#[derive(Debug, Clone)]
pub struct LorenzAttractor {
    x: f64,
    y: f64,
    z: f64,
    trail: VecDeque<TrailPoint>,
    hue: f64,
    elapsed_ms: u64,
    width: u16,
    height: u16,
}

impl LorenzAttractor {
    pub fn new() -> Self {
        Self {
            x: 0.1,
            y: 0.0,
            z: 0.0,
            trail: VecDeque::with_capacity(TRAIL_CAPACITY + 1),
            hue: 0.0,
            elapsed_ms: 0,
            width: 0,
            height: 0,
        }
    }

    pub fn position(&self) -> (f64, f64, f64) {
        (self.x, self.y, self.z)
    }

    /// One Euler step of the Lorenz system.
    pub fn integrate(&mut self) -> (f64, f64, f64) {
        let dx = SIGMA * (self.y - self.x) * DT;
        let dy = (self.x * (RHO - self.z) - self.y) * DT;
        let dz = (self.x * self.y - BETA * self.z) * DT;
        self.x += dx;
        self.y += dy;
        self.z += dz;
        self.position()
    }

    pub fn trail(&self) -> impl Iterator<Item = &TrailPoint> {
        self.trail.iter()
    }

    pub fn trail_len(&self) -> usize {
        self.trail.len()
    }

    /// Screen position of the current point for a view angle in radians.
    pub fn project(&self, angle: f64) -> (i32, i32) {
        let center_x = (self.width / 2) as i32;
        let center_y = (self.height / 2) as i32;
        let rot_x = self.x * angle.cos() - self.z * angle.sin();
        // Offsets truncate toward zero on both sides of the centre.
        let sx = center_x + (rot_x * SCALE * ASPECT) as i32;
        let sy = center_y + ((self.z - Z_CENTER) * SCALE * -1.0) as i32;
        (sx, sy)
    }

    fn next_color(&mut self) -> Color {
        self.hue += HUE_STEP;
        if self.hue > HUE_WRAP {
            self.hue = 0.0;
        }
        hue_color(self.hue)
    }
}

impl Default for LorenzAttractor {
    fn default() -> Self {
        Self::new()
    }
}

fn hue_color(hue: f64) -> Color {
    match hue as u32 {
        0 => Color::Red,
        1 => Color::Yellow,
        2 => Color::Green,
        3 => Color::Cyan,
        4 => Color::Blue,
        5 => Color::Magenta,
        _ => Color::White,
    }
}

impl Effect for LorenzAttractor {
    fn name(&self) -> &'static str {
        "lorenz"
    }

    fn description(&self) -> &'static str {
        LORENZ_DESCRIPTION
    }

    fn default_interval_ms(&self) -> u32 {
        10
    }

    fn reset(&mut self, width: u16, height: u16, _seed: u64) {
        self.x = 0.1;
        self.y = 0.0;
        self.z = 0.0;
        self.trail.clear();
        self.hue = 0.0;
        self.elapsed_ms = 0;
        self.width = width;
        self.height = height;
    }

    fn step(&mut self, buf: &mut ScreenBuffer, dt_ms: u32, _frame: u64) -> Result<Flow> {
        self.elapsed_ms += dt_ms as u64;
        self.integrate();

        let angle = self.elapsed_ms as f64 / 1000.0;
        let (x, y) = self.project(angle);
        let color = self.next_color();
        self.trail.push_back(TrailPoint { x, y, color });
        if self.trail.len() > TRAIL_CAPACITY {
            self.trail.pop_front();
        }

        buf.clear();
        for p in &self.trail {
            buf.put_char(p.x, p.y, '*', p.color);
        }
        let hud = format!("X: {:.2} Y: {:.2} Z: {:.2}", self.x, self.y, self.z);
        buf.put_str(0, 0, &hud, Color::White);

        Ok(Flow::Continue)
    }
}
