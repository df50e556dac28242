//! # lorenz-trail
//!
//! Real-time Lorenz attractor visualization: the trajectory is integrated one
//! Euler step per frame and drawn as a hue-swept line trail, with a glowing
//! marker at its head and an orbit camera.
//!
//! ## Quick Start
//!
//! ```no_run
//! use lorenz_trail::Viewer;
//!
//! fn main() -> Result<(), lorenz_trail::ViewerError> {
//!     Viewer::new().with_capacity(20_000).run()
//! }
//! ```
//!
//! ## Core Concepts
//!
//! The animation core has no GPU dependency and can be driven by hand:
//!
//! ```
//! use lorenz_trail::Session;
//!
//! let mut session = Session::new(1_000);
//! for _ in 0..1_000 {
//!     let frame = session.tick();
//!     assert!(frame.draw_count >= 1);
//! }
//! // The trail restarts from index 0 once the buffer is full.
//! assert_eq!(session.tick().draw_count, 1);
//! ```
//!
//! | Module | Role |
//! |--------|------|
//! | [`attractor`] | Lorenz parameters, state, and the Euler [`step`](attractor::step) |
//! | [`color`] | HSV→RGB conversion and the per-tick [`HueSweep`] |
//! | [`trail`] | Fixed-capacity [`TrailBuffer`] feeding the line strip |
//! | [`session`] | The per-frame driver, [`Session::tick`] |
//! | [`time`] | Frame clock for FPS logging |
//!
//! ## Controls
//!
//! - Left drag: orbit
//! - Right drag: pan
//! - Wheel: zoom

pub mod attractor;
pub mod color;
mod error;
mod gpu;
pub mod session;
pub mod time;
pub mod trail;
mod viewer;

pub use attractor::{AttractorState, LorenzParams};
pub use color::{hsv_to_rgb, hue_to_rgb, HueSweep};
pub use error::{GpuError, TrailError, ViewerError};
pub use glam::Vec3;
pub use gpu::Camera;
pub use session::{Frame, Session};
pub use trail::TrailBuffer;
pub use viewer::Viewer;
