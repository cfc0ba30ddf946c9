//! Error types shared by the viewer core and the wgpu renderer.

use std::path::PathBuf;

/// Errors that abort an operation on the image set or the GPU context.
#[derive(Debug, thiserror::Error)]
pub enum ViewerError {
    #[error("cannot read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot decode '{path}': {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("invalid config file '{path}': {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("no compatible GPU adapter found")]
    NoAdapter,

    #[error("cannot create render surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    #[error("cannot open GPU device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),
}

/// Reasons a navigation request is refused or abandoned.
#[derive(Debug, thiserror::Error)]
pub enum TransitionError {
    #[error("index {target} out of range (0..{count})")]
    OutOfRange { target: isize, count: usize },

    #[error("a transition is already in progress")]
    Busy,

    #[error(transparent)]
    Decode(#[from] ViewerError),
}
