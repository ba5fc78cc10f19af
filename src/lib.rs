//! A CPU-only software rasterizer for textured triangle meshes.
//!
//! Vertices are transformed by a single MVP matrix, scan-converted with an
//! incremental edge walker and textured into a depth-tested framebuffer.
//! Presenting the framebuffer is left to the caller.
//!
//! # Quick Start
//!
//! ```ignore
//! use soft3d::prelude::*;
//!
//! let texture = ColorBuffer::checkerboard(64, 8, Color::WHITE, Color::BLACK)?;
//! let mut engine = Engine::new(RenderConfig::default(), soft3d::mesh::cube(1.0), texture)?;
//! let mut ctx = RenderContext::new();
//! let report = engine.render_frame(&mut ctx);
//! let bgra = engine.frame_bytes();
//! ```

pub mod color;
pub mod config;
pub mod engine;
pub mod error;
pub mod math;
pub mod mesh;
pub mod projection;
pub mod render;
pub mod texture;
pub mod transform;
pub mod vertex;

pub use color::Color;
pub use config::RenderConfig;
pub use engine::{Engine, RenderContext};
pub use error::{AssetError, BufferError, ConfigError, RasterError};
pub use projection::Projection;
pub use render::{DepthColorBuffer, PassReport};
pub use texture::{ColorBuffer, TextureAddress};
pub use transform::{AxisAngle, Transform};
pub use vertex::{Vertex, VertexBuffer};

/// Prelude module for convenient imports.
///
/// # Example
/// ```ignore
/// use soft3d::prelude::*;
/// ```
pub mod prelude {
    // Engine
    pub use crate::config::RenderConfig;
    pub use crate::engine::{Engine, RenderContext};
    pub use crate::render::PassReport;

    // Data
    pub use crate::color::Color;
    pub use crate::texture::{ColorBuffer, TextureAddress};
    pub use crate::vertex::{Vertex, VertexBuffer};

    // Transforms
    pub use crate::projection::Projection;
    pub use crate::transform::{AxisAngle, Transform};

    // Math
    pub use crate::math::mat4::Mat4;
    pub use crate::math::vec2::Vec2;
    pub use crate::math::vec3::Vec3;
    pub use crate::math::vec4::Vec4;
}

/// Module exposing internals for benchmarking. Not part of the stable API.
pub mod bench {
    pub use crate::render::{
        DepthColorBuffer, PixelSink, RasterizedTriangle, RasterizedVertex, Rasterizer,
        ScanlineRasterizer, TexturedPixelStage,
    };
}
