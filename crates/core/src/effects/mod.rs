//! Built-in effects.
//!
//! | Effect                | Name        | Default interval | Finite |
//! |-----------------------|-------------|------------------|--------|
//! | [`ConwayLife`]        | `life`      | 100 ms           | no     |
//! | [`LorenzAttractor`]   | `lorenz`    | 10 ms            | no     |
//! | [`ParticleFountain`]  | `fountain`  | 50 ms            | no     |
//! | [`TunnelMarch`]       | `tunnel`    | 50 ms            | 200 frames |
//! | [`FireSimulation`]    | `fire`      | 40-50 ms         | no     |
//! | [`StarfieldProjection`] | `starfield` | 50 ms          | no     |
//! | [`Plasma`]            | `plasma`    | 30 ms            | no     |
//! | [`ParametricWave`]    | `wave`      | 100 ms           | no     |
//! | [`DoublePendulum`]    | `pendulum`  | 30 ms            | no     |

pub mod fire;
pub mod fountain;
pub mod life;
pub mod lorenz;
pub mod pendulum;
pub mod plasma;
pub mod starfield;
pub mod tunnel;
pub mod wave;

pub use fire::FireSimulation;
pub use fountain::{Particle, ParticleFountain};
pub use life::ConwayLife;
pub use lorenz::{LorenzAttractor, TrailPoint};
pub use pendulum::DoublePendulum;
pub use plasma::Plasma;
pub use starfield::{Star, StarfieldProjection};
pub use tunnel::TunnelMarch;
pub use wave::ParametricWave;
