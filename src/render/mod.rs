//! Rendering pipeline: transform, rasterization and the pixel stage.

pub mod framebuffer;
pub mod pipeline;
pub mod pixel;
pub mod rasterizer;

pub use framebuffer::DepthColorBuffer;
pub use pipeline::{
    assemble_triangle, rasterize_vertices, rasterize_with, transform_vertex, PassReport,
};
pub use pixel::TexturedPixelStage;
pub use rasterizer::{
    Corner, PixelSink, RasterizedTriangle, RasterizedVertex, Rasterizer, ScanlineRasterizer,
};
