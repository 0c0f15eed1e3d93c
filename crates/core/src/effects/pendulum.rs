//! Damped double pendulum with a fading trail behind the lower bob.

use anyhow::Result;

use crate::effect::{Effect, Flow};
use crate::term::ScreenBuffer;
use crate::types::Color;

pub const PENDULUM_DESCRIPTION: &str = "Chaotic double pendulum";

const G: f64 = 1.0;
const L1: f64 = 10.0;
const L2: f64 = 10.0;
const M1: f64 = 10.0;
const M2: f64 = 10.0;
const DT: f64 = 0.2;
const DAMPING: f64 = 0.999;
const ASPECT: f64 = 2.0;

pub const TRAIL_LENGTH: usize = 50;

#[derive(Debug, Clone)]
pub struct DoublePendulum {
    theta1: f64,
    theta2: f64,
    omega1: f64,
    omega2: f64,
    trail: [Option<(i32, i32)>; TRAIL_LENGTH],
    trail_index: usize,
    width: u16,
    height: u16,
}

impl DoublePendulum {
    pub fn new() -> Self {
        Self {
            theta1: std::f64::consts::FRAC_PI_2,
            theta2: std::f64::consts::FRAC_PI_2,
            omega1: 0.0,
            omega2: 0.0,
            trail: [None; TRAIL_LENGTH],
            trail_index: 0,
            width: 0,
            height: 0,
        }
    }

    /// (theta1, theta2, omega1, omega2)
    pub fn state(&self) -> (f64, f64, f64, f64) {
        (self.theta1, self.theta2, self.omega1, self.omega2)
    }

    pub fn trail_points(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.trail.iter().flatten().copied()
    }

    /// Advance the equations of motion by one damped time step.
    pub fn integrate(&mut self) {
        let (t1, t2, w1, w2) = (self.theta1, self.theta2, self.omega1, self.omega2);
        let den_common = 2.0 * M1 + M2 - M2 * (2.0 * t1 - 2.0 * t2).cos();

        let num1 = -G * (2.0 * M1 + M2) * t1.sin();
        let num2 = -M2 * G * (t1 - 2.0 * t2).sin();
        let num3 = -2.0 * (t1 - t2).sin() * M2;
        let num4 = w2 * w2 * L2 + w1 * w1 * L1 * (t1 - t2).cos();
        let alpha1 = (num1 + num2 + num3 * num4) / (L1 * den_common);

        let num1 = 2.0 * (t1 - t2).sin();
        let num2 = w1 * w1 * L1 * (M1 + M2);
        let num3 = G * (M1 + M2) * t1.cos();
        let num4 = w2 * w2 * L2 * M2 * (t1 - t2).cos();
        let alpha2 = (num1 * (num2 + num3 + num4)) / (L2 * den_common);

        self.omega1 += alpha1 * DT;
        self.omega2 += alpha2 * DT;
        self.theta1 += self.omega1 * DT;
        self.theta2 += self.omega2 * DT;

        self.omega1 *= DAMPING;
        self.omega2 *= DAMPING;
    }

    fn pivot(&self) -> (i32, i32) {
        ((self.width / 2) as i32, (self.height / 3) as i32)
    }

    /// Screen positions of the two bobs.
    pub fn bobs(&self) -> ((i32, i32), (i32, i32)) {
        let (cx, cy) = self.pivot();
        let x1 = cx + (L1 * self.theta1.sin() * ASPECT) as i32;
        let y1 = cy + (L1 * self.theta1.cos()) as i32;
        let x2 = x1 + (L2 * self.theta2.sin() * ASPECT) as i32;
        let y2 = y1 + (L2 * self.theta2.cos()) as i32;
        ((x1, y1), (x2, y2))
    }
}

impl Default for DoublePendulum {
    fn default() -> Self {
        Self::new()
    }
}

impl Effect for DoublePendulum {
    fn name(&self) -> &'static str {
        "pendulum"
    }

    fn description(&self) -> &'static str {
        PENDULUM_DESCRIPTION
    }

    fn default_interval_ms(&self) -> u32 {
        30
    }

    fn reset(&mut self, width: u16, height: u16, _seed: u64) {
        *self = Self {
            width,
            height,
            ..Self::new()
        };
    }

    fn step(&mut self, buf: &mut ScreenBuffer, _dt_ms: u32, _frame: u64) -> Result<Flow> {
        self.integrate();
        let (b1, b2) = self.bobs();
        self.trail[self.trail_index] = Some(b2);
        self.trail_index = (self.trail_index + 1) % TRAIL_LENGTH;

        buf.clear();
        for (x, y) in self.trail_points() {
            buf.put_char(x, y, '·', Color::DarkGray);
        }
        let pivot = self.pivot();
        buf.draw_line(pivot, b1, '.', Color::Gray);
        buf.draw_line(b1, b2, '.', Color::Gray);
        buf.put_char(pivot.0, pivot.1, '+', Color::White);
        buf.put_char(b1.0, b1.1, 'O', Color::Cyan);
        buf.put_char(b2.0, b2.1, '@', Color::Yellow);
        Ok(Flow::Continue)
    }
}
