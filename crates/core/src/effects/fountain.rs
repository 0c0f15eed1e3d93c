//! Particle fountain: a spray of glyphs launched upward under gravity.

use anyhow::Result;

use crate::effect::{Effect, Flow};
use crate::rng::SimpleRng;
use crate::term::ScreenBuffer;
use crate::types::Color;

pub const SPAWN_PER_FRAME: usize = 5;
pub const GRAVITY: f64 = 0.2;
/// Frames a particle lives if it never leaves the screen.
pub const PARTICLE_LIFE: u32 = 120;

pub const FOUNTAIN_DESCRIPTION: &str = "Particle fountain under gravity";

const COLORS: [Color; 5] = [
    Color::DarkBlue,
    Color::Blue,
    Color::Cyan,
    Color::White,
    Color::Magenta,
];
const SYMBOLS: [char; 6] = ['.', 'o', '*', '+', 'x', '°'];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub life: u32,
    pub symbol: char,
    pub color: Color,
}

#[derive(Debug, Clone)]
pub struct ParticleFountain {
    particles: Vec<Particle>,
    rng: SimpleRng,
    width: u16,
    height: u16,
    spawn_per_frame: usize,
}

impl ParticleFountain {
    pub fn new() -> Self {
        Self {
            particles: Vec::new(),
            rng: SimpleRng::new(0),
            width: 0,
            height: 0,
            spawn_per_frame: SPAWN_PER_FRAME,
        }
    }

    pub fn with_spawn_rate(mut self, per_frame: usize) -> Self {
        self.spawn_per_frame = per_frame;
        self
    }

    /// Live particles, in no meaningful order.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Spawn, integrate and cull one frame's worth of particles.
    pub fn update(&mut self) {
        let (w, h) = (self.width as f64, self.height as f64);
        if self.width == 0 || self.height == 0 {
            self.particles.clear();
            return;
        }

        for _ in 0..self.spawn_per_frame {
            let vx = (self.rng.next_f64() - 0.5) * 4.0;
            let vy = -2.0 - self.rng.next_f64() * 1.5;
            let color = self.rng.pick(&COLORS);
            let symbol = self.rng.pick(&SYMBOLS);
            self.particles.push(Particle {
                x: w / 2.0,
                y: h - 1.0,
                vx,
                vy,
                life: PARTICLE_LIFE,
                symbol,
                color,
            });
        }

        for p in &mut self.particles {
            p.x += p.vx;
            p.y += p.vy;
            p.vy += GRAVITY;
            p.life = p.life.saturating_sub(1);
        }

        self.particles
            .retain(|p| p.life > 0 && p.y < h && p.x >= 0.0 && p.x < w);
    }
}

impl Default for ParticleFountain {
    fn default() -> Self {
        Self::new()
    }
}

impl Effect for ParticleFountain {
    fn name(&self) -> &'static str {
        "fountain"
    }

    fn description(&self) -> &'static str {
        FOUNTAIN_DESCRIPTION
    }

    fn reset(&mut self, width: u16, height: u16, seed: u64) {
        self.width = width;
        self.height = height;
        self.rng = SimpleRng::new(seed);
        self.particles.clear();
    }

    fn step(&mut self, buf: &mut ScreenBuffer, _dt_ms: u32, _frame: u64) -> Result<Flow> {
        self.update();

        buf.clear();
        for p in &self.particles {
            buf.put_char(p.x.floor() as i32, p.y.floor() as i32, p.symbol, p.color);
        }
        Ok(Flow::Continue)
    }
}
