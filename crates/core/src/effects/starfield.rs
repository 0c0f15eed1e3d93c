//! Stars flying toward the viewer with a simple perspective divide.

use anyhow::Result;

use crate::effect::{Effect, Flow};
use crate::rng::SimpleRng;
use crate::term::ScreenBuffer;
use crate::types::Color;

pub const MAX_STARS: usize = 100;
/// Depth a recycled star restarts at.
pub const FAR_PLANE: f64 = 100.0;

pub const STARFIELD_DESCRIPTION: &str = "Warp-speed starfield with twinkling stars";

const STAR_CHARS: [char; 9] = ['*', '·', '•', '∘', '○', '◦', '⋆', '✦', '✧'];
const STAR_COLORS: [Color; 6] = [
    Color::White,
    Color::Yellow,
    Color::Cyan,
    Color::Blue,
    Color::Magenta,
    Color::Red,
];
const TWINKLE_PERIOD: u32 = 20;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub speed: f64,
    pub ch: char,
    pub color: Color,
    pub brightness: f64,
    pub twinkling: bool,
    pub twinkle_phase: u32,
}

impl Star {
    fn spawn(width: f64, height: f64, rng: &mut SimpleRng) -> Self {
        Self {
            x: rng.next_f64() * width,
            y: rng.next_f64() * height,
            z: rng.next_f64() * 100.0 + 1.0,
            speed: 0.1 + rng.next_f64() * 0.5,
            ch: rng.pick(&STAR_CHARS),
            color: rng.pick(&STAR_COLORS),
            brightness: rng.next_f64(),
            twinkling: rng.chance(0.3),
            twinkle_phase: rng.next_range(TWINKLE_PERIOD),
        }
    }

    /// Screen cell and glyph; nearer stars get the larger glyphs.
    pub fn project(&self, center_x: f64, center_y: f64) -> (i32, i32, char) {
        let perspective = 50.0 / self.z;
        let sx = center_x + (self.x - center_x) * perspective;
        let sy = center_y + (self.y - center_y) * perspective;
        let ch = if self.z > 80.0 {
            '.'
        } else if self.z > 50.0 {
            '•'
        } else if self.z > 20.0 {
            '*'
        } else {
            self.ch
        };
        (sx as i32, sy as i32, ch)
    }
}

#[derive(Debug, Clone)]
pub struct StarfieldProjection {
    stars: Vec<Star>,
    rng: SimpleRng,
    speed: f64,
    star_count: usize,
    width: u16,
    height: u16,
}

impl StarfieldProjection {
    pub fn new() -> Self {
        Self::with_speed(1.0)
    }

    pub fn with_speed(speed: f64) -> Self {
        Self {
            stars: Vec::new(),
            rng: SimpleRng::new(0),
            speed,
            star_count: MAX_STARS,
            width: 0,
            height: 0,
        }
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn update(&mut self) {
        let (w, h) = (self.width as f64, self.height as f64);
        for star in &mut self.stars {
            star.z -= star.speed * self.speed;

            if star.twinkling {
                star.twinkle_phase = (star.twinkle_phase + 1) % TWINKLE_PERIOD;
                let wave = (star.twinkle_phase as f64 * std::f64::consts::PI / 10.0).sin();
                star.brightness = 0.3 + 0.7 * (wave + 1.0) / 2.0;
            }

            if star.z <= 0.0 {
                *star = Star::spawn(w, h, &mut self.rng);
                star.z = FAR_PLANE;
            }
        }
    }
}

impl Default for StarfieldProjection {
    fn default() -> Self {
        Self::new()
    }
}

impl Effect for StarfieldProjection {
    fn name(&self) -> &'static str {
        "starfield"
    }

    fn description(&self) -> &'static str {
        STARFIELD_DESCRIPTION
    }

    fn reset(&mut self, width: u16, height: u16, seed: u64) {
        self.width = width;
        self.height = height;
        self.rng = SimpleRng::new(seed);
        let (w, h) = (width as f64, height as f64);
        self.stars.clear();
        for _ in 0..self.star_count {
            let star = Star::spawn(w, h, &mut self.rng);
            self.stars.push(star);
        }
    }

    fn step(&mut self, buf: &mut ScreenBuffer, _dt_ms: u32, _frame: u64) -> Result<Flow> {
        self.update();

        buf.clear();
        let center_x = (self.width / 2) as f64;
        let center_y = (self.height / 2) as f64;
        for star in &self.stars {
            let (x, y, ch) = star.project(center_x, center_y);
            let color = if star.brightness < 0.5 {
                Color::DarkGray
            } else {
                star.color
            };
            buf.put_char(x, y, ch, color);
        }
        Ok(Flow::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_fills_star_pool() {
        let mut field = StarfieldProjection::new();
        field.reset(80, 24, 11);
        assert_eq!(field.stars().len(), MAX_STARS);
        for star in field.stars() {
            assert!(star.z >= 1.0 && star.z <= 101.0);
        }
    }

    #[test]
    fn test_stars_recycle_at_far_plane() {
        let mut field = StarfieldProjection::with_speed(50.0);
        field.reset(80, 24, 11);
        for _ in 0..10 {
            field.update();
            assert_eq!(field.stars().len(), MAX_STARS);
            assert!(field.stars().iter().all(|s| s.z > -1.0 && s.z <= FAR_PLANE + 1.0));
        }
    }

    #[test]
    fn test_projection_spreads_from_center() {
        let star = Star {
            x: 50.0,
            y: 12.0,
            z: 10.0,
            speed: 0.1,
            ch: '✦',
            color: Color::White,
            brightness: 1.0,
            twinkling: false,
            twinkle_phase: 0,
        };
        let (x, y, ch) = star.project(40.0, 12.0);
        assert_eq!((x, y), (90, 12));
        assert_eq!(ch, '✦');
    }
}
