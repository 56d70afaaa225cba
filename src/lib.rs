//! # Sphere Glow
//!
//! A dark metallic sphere, normal-mapped and lit by three colored point
//! lights. The sphere spins, leans towards the pointer, rises as the page
//! scrolls and exposes two of its lights on a live tuning panel.
//!
//! ```no_run
//! use sphere_glow::AppConfig;
//!
//! fn main() -> sphere_glow::Result<()> {
//!     sphere_glow::run(AppConfig::default())
//! }
//! ```
//!
//! Everything between the window and the GPU is a plain model. Host events
//! flow through [`EventDispatcher`] into an [`AppState`], and each frame
//! [`FrameLoop::tick`] eases the sphere and hands the state to a
//! [`SceneRenderer`]. Both ends can be driven without a window.

mod app;
mod camera;
mod color;
mod config;
mod debug_panel;
mod debug_ui;
mod error;
mod events;
mod frame_loop;
mod gpu;
mod input;
mod light;
mod material;
mod mesh;
mod render_target;
mod renderer;
mod scene;
mod scroll;
mod standard_pass;
mod state;
mod texture;
mod viewport;

pub use app::run;
pub use camera::PerspectiveCamera;
pub use color::Color;
pub use config::AppConfig;
pub use debug_panel::{
    ColorBinding, DebugPanel, LightField, LightFolder, NumberBinding, PanelChange,
};
pub use error::{Error, Result};
pub use events::{
    EventDispatcher, EventQueue, EventSource, HostEvent, Listener, WindowEventTranslator,
};
pub use frame_loop::{Clock, FrameLoop, FrameScheduler, SceneRenderer};
pub use gpu::GpuContext;
pub use input::{AimTarget, PointerSampler};
pub use light::{MAX_LIGHTS, PointLight, sphere_lights};
pub use material::StandardMaterial;
pub use mesh::{Mesh, SphereGeometry, Transform, Vertex3d};
pub use renderer::WgpuRenderer;
pub use scene::{Scene, Sphere};
pub use scroll::ScrollHandler;
pub use state::AppState;
pub use texture::{DecodedImage, LoadStatus, Texture, TextureLoader};
pub use viewport::{ResizeHandler, Viewport};

// Re-export glam math types for convenience
pub use glam::{Mat4, Quat, Vec2, Vec3};
