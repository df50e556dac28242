//! Lorenz system integration.
//!
//! The attractor is advanced with one explicit (forward) Euler sub-step per
//! call:
//!
//! ```text
//! dx/dt = σ(y - x)
//! dy/dt = x(ρ - z) - y
//! dz/dt = xy - βz
//! ```
//!
//! There is no clamping and no NaN/Inf guard. Parameters that make the
//! discretization unstable let the trajectory diverge silently.
//!
//! # Example
//!
//! ```
//! use lorenz_trail::attractor::{step, AttractorState, LorenzParams};
//!
//! let next = step(AttractorState::INITIAL, &LorenzParams::default());
//! assert!((next.x - 0.09).abs() < 1e-12);
//! ```

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Parameters of the discretized Lorenz system.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LorenzParams {
    /// σ, the Prandtl number.
    pub sigma: f64,
    /// ρ, the Rayleigh number.
    pub rho: f64,
    /// β, the geometric factor.
    pub beta: f64,
    /// Integration time step.
    pub dt: f64,
}

impl LorenzParams {
    /// The classic chaotic configuration: σ=10, ρ=28, β=8/3, dt=0.01.
    pub const CLASSIC: Self = Self {
        sigma: 10.0,
        rho: 28.0,
        beta: 8.0 / 3.0,
        dt: 0.01,
    };
}

impl Default for LorenzParams {
    fn default() -> Self {
        Self::CLASSIC
    }
}

/// A point in the attractor's phase space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttractorState {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl AttractorState {
    /// Near-origin seed. Starting exactly at the origin would stay on the
    /// fixed point forever.
    pub const INITIAL: Self = Self {
        x: 0.1,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// True when every coordinate is finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Single-precision position for GPU upload.
    pub fn to_vec3(&self) -> Vec3 {
        Vec3::new(self.x as f32, self.y as f32, self.z as f32)
    }
}

impl Default for AttractorState {
    fn default() -> Self {
        Self::INITIAL
    }
}

/// Advance `state` by one Euler step of `params.dt`.
#[inline]
pub fn step(state: AttractorState, params: &LorenzParams) -> AttractorState {
    let AttractorState { x, y, z } = state;
    let dx = params.sigma * (y - x) * params.dt;
    let dy = (x * (params.rho - z) - y) * params.dt;
    let dz = (x * y - params.beta * z) * params.dt;
    AttractorState {
        x: x + dx,
        y: y + dy,
        z: z + dz,
    }
}
