//! Error types for lorenz-trail.
//!
//! This module provides error types for GPU initialization, viewer startup,
//! and restoring serialized trail buffers.

use std::fmt;

/// Errors that can occur during GPU initialization.
#[derive(Debug)]
pub enum GpuError {
    /// Failed to create a surface for rendering.
    SurfaceCreation(wgpu::CreateSurfaceError),
    /// No compatible GPU adapter found.
    NoAdapter,
    /// Failed to create GPU device.
    DeviceCreation(wgpu::RequestDeviceError),
    /// The trail needs more vertices than one device buffer can hold.
    TrailTooLarge { capacity: usize, max_vertices: usize },
}

impl fmt::Display for GpuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpuError::SurfaceCreation(e) => write!(f, "Failed to create GPU surface: {}", e),
            GpuError::NoAdapter => write!(f, "No compatible GPU adapter found. Ensure your system has a GPU with WebGPU/Vulkan/Metal/DX12 support."),
            GpuError::DeviceCreation(e) => write!(f, "Failed to create GPU device: {}", e),
            GpuError::TrailTooLarge {
                capacity,
                max_vertices,
            } => write!(
                f,
                "Trail capacity {} exceeds the device limit of {} vertices",
                capacity, max_vertices
            ),
        }
    }
}

impl std::error::Error for GpuError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GpuError::SurfaceCreation(e) => Some(e),
            GpuError::DeviceCreation(e) => Some(e),
            GpuError::NoAdapter | GpuError::TrailTooLarge { .. } => None,
        }
    }
}

impl From<wgpu::CreateSurfaceError> for GpuError {
    fn from(e: wgpu::CreateSurfaceError) -> Self {
        GpuError::SurfaceCreation(e)
    }
}

impl From<wgpu::RequestDeviceError> for GpuError {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        GpuError::DeviceCreation(e)
    }
}

/// Errors that can occur when running the viewer.
#[derive(Debug)]
pub enum ViewerError {
    /// Failed to create or run the event loop.
    EventLoop(winit::error::EventLoopError),
    /// Failed to create window.
    Window(winit::error::OsError),
    /// GPU initialization failed.
    Gpu(GpuError),
}

impl fmt::Display for ViewerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewerError::EventLoop(e) => write!(f, "Event loop error: {}", e),
            ViewerError::Window(e) => write!(f, "Failed to create window: {}", e),
            ViewerError::Gpu(e) => write!(f, "GPU error: {}", e),
        }
    }
}

impl std::error::Error for ViewerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ViewerError::EventLoop(e) => Some(e),
            ViewerError::Window(e) => Some(e),
            ViewerError::Gpu(e) => Some(e),
        }
    }
}

impl From<winit::error::EventLoopError> for ViewerError {
    fn from(e: winit::error::EventLoopError) -> Self {
        ViewerError::EventLoop(e)
    }
}

impl From<winit::error::OsError> for ViewerError {
    fn from(e: winit::error::OsError) -> Self {
        ViewerError::Window(e)
    }
}

impl From<GpuError> for ViewerError {
    fn from(e: GpuError) -> Self {
        ViewerError::Gpu(e)
    }
}

/// Errors that can occur when restoring a serialized trail buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrailError {
    /// The snapshot declares a capacity of zero.
    ZeroCapacity,
    /// The position or color array does not match the capacity.
    LengthMismatch {
        capacity: usize,
        positions: usize,
        colors: usize,
    },
    /// The write cursor is not below the capacity.
    CursorOutOfRange { cursor: usize, capacity: usize },
    /// The valid count exceeds the capacity.
    CountOutOfRange { count: usize, capacity: usize },
    /// The valid count does not agree with the write cursor.
    CountMismatch { count: usize, cursor: usize },
}

impl fmt::Display for TrailError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrailError::ZeroCapacity => write!(f, "Trail capacity must be positive"),
            TrailError::LengthMismatch {
                capacity,
                positions,
                colors,
            } => write!(
                f,
                "Trail arrays do not match capacity {}: {} positions, {} colors",
                capacity, positions, colors
            ),
            TrailError::CursorOutOfRange { cursor, capacity } => {
                write!(f, "Write cursor {} out of range for capacity {}", cursor, capacity)
            }
            TrailError::CountOutOfRange { count, capacity } => {
                write!(f, "Valid count {} exceeds capacity {}", count, capacity)
            }
            TrailError::CountMismatch { count, cursor } => {
                write!(f, "Valid count {} does not match write cursor {}", count, cursor)
            }
        }
    }
}

impl std::error::Error for TrailError {}
