//! WebGPU rendering module
//!
//! Orthographic view of the floor, memory blocks and player.

pub mod mesh;
pub mod scene_pipeline;

pub use scene_pipeline::{SceneRenderState, pick_surface_format};

/// Failures while bringing up the GPU
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
    #[error("no suitable GPU adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),
    #[error("failed to create device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    #[error("surface is not compatible with the adapter")]
    IncompatibleSurface,
}
