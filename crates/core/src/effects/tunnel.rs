//! Polar "tunnel" illusion.
//!
//! Each row is a depth slice whose radius shrinks toward the bottom of the
//! screen; a column is wall when its distance from the centre falls inside a
//! band around that radius, bent by a sine of the column's angle and a phase
//! that advances every frame. Nothing here is real 3D.

use anyhow::Result;

use crate::effect::{Effect, Flow};
use crate::term::ScreenBuffer;
use crate::types::Color;

/// Frames in one pass through the tunnel.
pub const TUNNEL_FRAMES: u64 = 200;
/// Phase advance per frame.
pub const PHASE_STEP: f64 = 0.15;

pub const TUNNEL_DESCRIPTION: &str = "Marching through a rippling polar tunnel";

#[derive(Debug, Clone)]
pub struct TunnelMarch {
    frame_limit: Option<u64>,
    width: u16,
    height: u16,
}

impl TunnelMarch {
    pub fn new() -> Self {
        Self::with_frame_limit(Some(TUNNEL_FRAMES))
    }

    /// Run until cancelled.
    pub fn endless() -> Self {
        Self::with_frame_limit(None)
    }

    pub fn with_frame_limit(frame_limit: Option<u64>) -> Self {
        Self {
            frame_limit,
            width: 0,
            height: 0,
        }
    }

    pub fn frame_limit(&self) -> Option<u64> {
        self.frame_limit
    }
}

impl Default for TunnelMarch {
    fn default() -> Self {
        Self::new()
    }
}

/// Wall glyph and colour for a depth in [0, 1).
pub fn wall_style(depth: f64) -> (char, Color) {
    if depth > 0.95 {
        ('@', Color::White)
    } else if depth > 0.85 {
        ('#', Color::Cyan)
    } else if depth > 0.7 {
        ('*', Color::Cyan)
    } else if depth > 0.5 {
        ('+', Color::DarkCyan)
    } else {
        ('.', Color::DarkBlue)
    }
}

/// Whether a column `dx` from the centre is wall for the given ring.
pub fn is_wall(dx: f64, radius: f64, phase: f64) -> bool {
    let angle = dx.atan2(radius);
    let wave = (phase + angle * 3.0).sin();
    let r = dx.abs();
    r < radius + wave * 2.0 && r > radius - 2.0 + wave * 2.0
}

impl Effect for TunnelMarch {
    fn name(&self) -> &'static str {
        "tunnel"
    }

    fn description(&self) -> &'static str {
        TUNNEL_DESCRIPTION
    }

    fn reset(&mut self, width: u16, height: u16, _seed: u64) {
        self.width = width;
        self.height = height;
    }

    fn step(&mut self, buf: &mut ScreenBuffer, _dt_ms: u32, frame: u64) -> Result<Flow> {
        buf.clear();

        let (w, h) = (self.width as f64, self.height as f64);
        let cx = (self.width / 2) as f64;
        for y in 0..self.height {
            let depth = y as f64 / h;
            let radius = (1.0 - depth) * (w / 2.0) * 0.9;
            let phase = frame as f64 * PHASE_STEP + depth * 8.0;
            let (ch, color) = wall_style(depth);
            for x in 0..self.width {
                if is_wall(x as f64 - cx, radius, phase) {
                    buf.put_char(x as i32, y as i32, ch, color);
                }
            }
        }

        match self.frame_limit {
            Some(limit) if frame + 1 >= limit => Ok(Flow::Finished),
            _ => Ok(Flow::Continue),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wall_band_straddles_radius() {
        // With zero wave the band is (radius - 2, radius).
        let radius = 10.0;
        // phase chosen so sin(phase + 3 * atan2(dx, r)) is ~0 at dx = 9.
        let phase = -3.0 * 9.0f64.atan2(radius);
        assert!(is_wall(9.0, radius, phase));
        assert!(!is_wall(0.0, radius, phase));
        assert!(!is_wall(15.0, radius, phase));
    }

    #[test]
    fn test_glyph_thresholds() {
        assert_eq!(wall_style(0.1).0, '.');
        assert_eq!(wall_style(0.6).0, '+');
        assert_eq!(wall_style(0.8).0, '*');
        assert_eq!(wall_style(0.9).0, '#');
        assert_eq!(wall_style(0.97).0, '@');
    }

    #[test]
    fn test_finishes_after_frame_limit() {
        let mut tunnel = TunnelMarch::with_frame_limit(Some(3));
        tunnel.reset(20, 10, 0);
        let mut buf = ScreenBuffer::new(20, 10);
        assert_eq!(tunnel.step(&mut buf, 50, 0).unwrap(), Flow::Continue);
        assert_eq!(tunnel.step(&mut buf, 50, 1).unwrap(), Flow::Continue);
        assert_eq!(tunnel.step(&mut buf, 50, 2).unwrap(), Flow::Finished);
    }

    #[test]
    fn test_endless_never_finishes() {
        let mut tunnel = TunnelMarch::endless();
        tunnel.reset(20, 10, 0);
        let mut buf = ScreenBuffer::new(20, 10);
        for frame in 0..500 {
            assert_eq!(tunnel.step(&mut buf, 50, frame).unwrap(), Flow::Continue);
        }
    }
}
