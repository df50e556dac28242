//! Fixed-capacity trail buffer feeding the line-strip renderer.
//!
//! Positions and colors live in two parallel, pre-allocated arrays laid out
//! exactly as the GPU vertex buffers expect them (`Float32x3` each). Every
//! push writes both arrays at the write cursor and advances it modulo the
//! capacity.
//!
//! The trail does not slide. When the cursor wraps, the reported draw range
//! restarts at `[0, 1)` and the line is redrawn from the beginning of the
//! buffer, overwriting the previous pass.

use std::ops::Range;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::TrailError;

/// Default number of trail vertices.
pub const DEFAULT_CAPACITY: usize = 20_000;

/// Circular buffer of (position, color) vertex pairs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "TrailSnapshot")]
pub struct TrailBuffer {
    capacity: usize,
    positions: Vec<Vec3>,
    colors: Vec<Vec3>,
    write_cursor: usize,
    valid_count: usize,
    /// Indices written since the last upload.
    #[serde(skip_serializing)]
    dirty: Option<Range<usize>>,
}

/// Wire form of a [`TrailBuffer`], checked before it becomes one.
#[derive(Deserialize)]
struct TrailSnapshot {
    capacity: usize,
    positions: Vec<Vec3>,
    colors: Vec<Vec3>,
    write_cursor: usize,
    valid_count: usize,
}

impl TryFrom<TrailSnapshot> for TrailBuffer {
    type Error = TrailError;

    fn try_from(snapshot: TrailSnapshot) -> Result<Self, Self::Error> {
        let TrailSnapshot {
            capacity,
            positions,
            colors,
            write_cursor,
            valid_count,
        } = snapshot;

        if capacity == 0 {
            return Err(TrailError::ZeroCapacity);
        }
        if positions.len() != capacity || colors.len() != capacity {
            return Err(TrailError::LengthMismatch {
                capacity,
                positions: positions.len(),
                colors: colors.len(),
            });
        }
        if write_cursor >= capacity {
            return Err(TrailError::CursorOutOfRange {
                cursor: write_cursor,
                capacity,
            });
        }
        if valid_count > capacity {
            return Err(TrailError::CountOutOfRange {
                count: valid_count,
                capacity,
            });
        }
        // Only count == cursor, or a full/empty buffer with the cursor at 0,
        // can come out of `push`.
        let consistent = valid_count == write_cursor
            || (write_cursor == 0 && valid_count == capacity);
        if !consistent {
            return Err(TrailError::CountMismatch {
                count: valid_count,
                cursor: write_cursor,
            });
        }

        // A restored buffer has never been uploaded.
        Ok(Self {
            capacity,
            positions,
            colors,
            write_cursor,
            valid_count,
            dirty: Some(0..capacity),
        })
    }
}

// The dirty span only tracks uploads and is not part of the trail's value.
impl PartialEq for TrailBuffer {
    fn eq(&self, other: &Self) -> bool {
        self.capacity == other.capacity
            && self.write_cursor == other.write_cursor
            && self.valid_count == other.valid_count
            && self.positions == other.positions
            && self.colors == other.colors
    }
}

impl TrailBuffer {
    /// Create an empty trail holding up to `capacity` vertices.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "trail capacity must be positive");
        Self {
            capacity,
            positions: vec![Vec3::ZERO; capacity],
            colors: vec![Vec3::ZERO; capacity],
            write_cursor: 0,
            valid_count: 0,
            dirty: None,
        }
    }

    /// Write one vertex and return the new draw count.
    ///
    /// The count grows with each push, reaches `capacity` on the push that
    /// wraps the cursor, and restarts at 1 on the push after that.
    pub fn push(&mut self, position: Vec3, color: Vec3) -> usize {
        let index = self.write_cursor;
        self.positions[index] = position;
        self.colors[index] = color;

        self.write_cursor = (index + 1) % self.capacity;
        self.valid_count = if self.write_cursor == 0 {
            self.capacity
        } else {
            self.write_cursor
        };

        self.dirty = Some(match self.dirty.take() {
            Some(span) => span.start.min(index)..span.end.max(index + 1),
            None => index..index + 1,
        });

        self.valid_count
    }

    /// Range of vertices to draw. Always starts at 0.
    #[inline]
    pub fn draw_range(&self) -> Range<usize> {
        0..self.valid_count
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Index the next push writes to.
    #[inline]
    pub fn write_cursor(&self) -> usize {
        self.write_cursor
    }

    /// Number of vertices currently drawable.
    #[inline]
    pub fn valid_count(&self) -> usize {
        self.valid_count
    }

    /// All `capacity` positions, including stale ones past the draw range.
    #[inline]
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// All `capacity` colors, parallel to [`positions`](Self::positions).
    #[inline]
    pub fn colors(&self) -> &[Vec3] {
        &self.colors
    }

    /// Whether anything was written since the last [`take_dirty`](Self::take_dirty).
    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty.is_some()
    }

    /// Return and clear the span of indices that need re-uploading.
    pub fn take_dirty(&mut self) -> Option<Range<usize>> {
        self.dirty.take()
    }
}

impl Default for TrailBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
