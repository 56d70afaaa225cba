//! Error type shared by window, GPU and asset setup.

/// Everything that can go wrong while bringing the demo up or drawing a frame.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to create event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    #[error("no suitable GPU adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to create device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("surface does not support this adapter")]
    UnsupportedSurface,

    #[error("failed to acquire surface texture: {0}")]
    Surface(#[from] wgpu::SurfaceError),

    #[error("failed to load texture {path}: {source}")]
    Texture {
        path: String,
        #[source]
        source: image::ImageError,
    },

    #[error("texture loader for {path} stopped without a result")]
    LoaderGone { path: String },
}

pub type Result<T> = std::result::Result<T, Error>;
