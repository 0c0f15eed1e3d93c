//! Flame particles rising from the bottom row.

use anyhow::Result;

use crate::effect::{Effect, Flow};
use crate::rng::SimpleRng;
use crate::term::ScreenBuffer;
use crate::types::{Color, FireScheme};

pub const FIRE_DESCRIPTION: &str = "Flickering flames (schemes: red, blue, green)";

/// Spawn probability per source column, scaled by the scheme's intensity.
const SPAWN_CHANCE: f64 = 0.3;

const FIRE_CHARS: [char; 13] = [
    '▲', '▼', '◆', '♦', '█', '▓', '▒', '░', '*', '•', '∴', ':', '.',
];

#[derive(Debug, Clone, Copy, PartialEq)]
struct Flame {
    x: f64,
    y: f64,
    vx: f64,
    vy: f64,
    intensity: usize,
    life: u32,
    max_life: u32,
    ch: char,
}

impl Flame {
    fn spawn(x: f64, y: f64, rng: &mut SimpleRng) -> Self {
        let max_life = 10 + rng.next_range(20);
        Self {
            x,
            y,
            vx: (rng.next_f64() - 0.5) * 0.3,
            vy: -(0.2 + rng.next_f64() * 0.4),
            intensity: rng.next_range(5) as usize,
            life: max_life,
            max_life,
            ch: rng.pick(&FIRE_CHARS),
        }
    }

    /// Move, flicker and age. Returns false once the flame is spent.
    fn update(&mut self, rng: &mut SimpleRng) -> bool {
        self.x += self.vx;
        self.y += self.vy;
        self.vx += (rng.next_f64() - 0.5) * 0.02;
        self.vy += rng.next_f64() * 0.01;
        self.life = self.life.saturating_sub(1);
        self.intensity = (self.life as f64 / self.max_life as f64 * 4.0) as usize;
        self.life > 0 && self.y >= 0.0 && self.intensity > 0
    }
}

#[derive(Debug, Clone)]
pub struct FireSimulation {
    scheme: FireScheme,
    background: Color,
    flames: Vec<Flame>,
    rng: SimpleRng,
    width: u16,
    height: u16,
}

impl FireSimulation {
    pub fn new(scheme: FireScheme) -> Self {
        Self {
            scheme,
            background: Color::Black,
            flames: Vec::new(),
            rng: SimpleRng::new(0),
            width: 0,
            height: 0,
        }
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    pub fn scheme(&self) -> FireScheme {
        self.scheme
    }

    pub fn flame_count(&self) -> usize {
        self.flames.len()
    }

    /// Colour for a flame's remaining intensity: fresh flames burn at the
    /// hot end of the palette and cool as they age.
    pub fn color_for(&self, intensity: usize) -> Color {
        let palette = self.scheme.palette();
        let last = palette.len() - 1;
        palette[last - intensity.min(last)]
    }

    pub fn update(&mut self) {
        if self.width == 0 || self.height == 0 {
            self.flames.clear();
            return;
        }

        let source_y = (self.height - 1) as f64;
        let chance = SPAWN_CHANCE * self.scheme.intensity();
        for x in (0..self.width).step_by(2) {
            if self.rng.chance(chance) {
                let fx = x as f64 + self.rng.next_f64();
                self.flames.push(Flame::spawn(fx, source_y, &mut self.rng));
            }
        }

        let rng = &mut self.rng;
        self.flames.retain_mut(|flame| flame.update(rng));
    }
}

impl Default for FireSimulation {
    fn default() -> Self {
        Self::new(FireScheme::default())
    }
}

impl Effect for FireSimulation {
    fn name(&self) -> &'static str {
        "fire"
    }

    fn description(&self) -> &'static str {
        FIRE_DESCRIPTION
    }

    fn default_interval_ms(&self) -> u32 {
        self.scheme.frame_interval_ms()
    }

    fn background(&self) -> Color {
        self.background
    }

    fn reset(&mut self, width: u16, height: u16, seed: u64) {
        self.width = width;
        self.height = height;
        self.rng = SimpleRng::new(seed);
        self.flames.clear();
    }

    fn step(&mut self, buf: &mut ScreenBuffer, _dt_ms: u32, _frame: u64) -> Result<Flow> {
        self.update();

        buf.clear();
        for flame in &self.flames {
            let color = self.color_for(flame.intensity);
            buf.put_char(flame.x.round() as i32, flame.y.round() as i32, flame.ch, color);
        }
        Ok(Flow::Continue)
    }
}
