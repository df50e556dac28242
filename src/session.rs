//! The per-frame driver.
//!
//! A [`Session`] owns the attractor state, the hue sweep, and the trail.
//! Whatever schedules frames (the winit redraw loop, a benchmark, a test)
//! calls [`Session::tick`] once per frame and hands the returned [`Frame`] to
//! the renderer.

use crate::attractor::{step, AttractorState, LorenzParams};
use crate::color::HueSweep;
use crate::trail::TrailBuffer;

/// What the renderer needs after a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// Number of trail vertices to draw, starting at index 0.
    pub draw_count: usize,
    /// Where to place the marker.
    pub marker: AttractorState,
}

/// All mutable state of one running animation.
#[derive(Debug, Clone)]
pub struct Session {
    params: LorenzParams,
    state: AttractorState,
    hue: HueSweep,
    trail: TrailBuffer,
    ticks: u64,
    diverged: bool,
}

impl Session {
    /// Start from the classic parameters and the near-origin seed.
    pub fn new(capacity: usize) -> Self {
        Self::from_parts(
            LorenzParams::default(),
            AttractorState::INITIAL,
            HueSweep::new(),
            TrailBuffer::new(capacity),
        )
    }

    /// Resume from previously captured parts.
    pub fn from_parts(
        params: LorenzParams,
        state: AttractorState,
        hue: HueSweep,
        trail: TrailBuffer,
    ) -> Self {
        Self {
            params,
            state,
            hue,
            trail,
            ticks: 0,
            diverged: false,
        }
    }

    /// Advance the animation by one frame.
    pub fn tick(&mut self) -> Frame {
        self.state = step(self.state, &self.params);

        let color = self.hue.color();
        self.hue.advance();

        let draw_count = self.trail.push(self.state.to_vec3(), color);
        self.ticks += 1;

        if self.trail.write_cursor() == 0 {
            log::debug!("Trail wrapped after {} ticks", self.ticks);
        }
        if !self.diverged && !self.state.is_finite() {
            self.diverged = true;
            log::warn!(
                "Attractor state became non-finite at tick {}: {:?}",
                self.ticks,
                self.state
            );
        }

        Frame {
            draw_count,
            marker: self.state,
        }
    }

    #[inline]
    pub fn state(&self) -> AttractorState {
        self.state
    }

    #[inline]
    pub fn params(&self) -> &LorenzParams {
        &self.params
    }

    #[inline]
    pub fn hue(&self) -> &HueSweep {
        &self.hue
    }

    #[inline]
    pub fn trail(&self) -> &TrailBuffer {
        &self.trail
    }

    /// Mutable access for the renderer to drain the dirty span.
    #[inline]
    pub fn trail_mut(&mut self) -> &mut TrailBuffer {
        &mut self.trail
    }

    /// Ticks run since this session was created.
    #[inline]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(crate::trail::DEFAULT_CAPACITY)
    }
}
