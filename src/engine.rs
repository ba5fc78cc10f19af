//! Frame driver.
//!
//! The [`Engine`] owns the framebuffer, the mesh and the texture for the
//! lifetime of the render core. Each call to [`Engine::render_frame`] clears
//! the framebuffer, advances the animation held in a caller-owned
//! [`RenderContext`] and rasterizes the whole mesh once.

use crate::color::Color;
use crate::config::RenderConfig;
use crate::error::ConfigError;
use crate::math::mat4::Mat4;
use crate::render::{rasterize_vertices, DepthColorBuffer, PassReport};
use crate::texture::ColorBuffer;
use crate::transform::Transform;
use crate::vertex::VertexBuffer;

/// Per-tick animation state, threaded into [`Engine::render_frame`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RenderContext {
    /// Spin angle in radians used for the most recent frame.
    pub angle: f32,
    /// Number of frames rendered.
    pub frame: u64,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move to the next frame.
    pub fn advance(&mut self, increment: f32) {
        self.angle += increment;
        self.frame += 1;
    }
}

pub struct Engine {
    config: RenderConfig,
    framebuffer: DepthColorBuffer,
    mesh: VertexBuffer,
    texture: ColorBuffer,
    model: Transform,
    view: Mat4,
    projection: Mat4,
    background: Color,
    reported_skips: bool,
}

impl Engine {
    /// Validates `config` and allocates the framebuffer.
    pub fn new(
        config: RenderConfig,
        mesh: VertexBuffer,
        texture: ColorBuffer,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let framebuffer = DepthColorBuffer::new(config.viewport_width, config.viewport_height)
            .map_err(|err| ConfigError::Invalid {
                field: "viewport",
                reason: err.to_string(),
            })?;
        let t = config.camera_translation;

        log::debug!(
            "engine: {}x{} viewport, {} triangles, {}x{} texture",
            config.viewport_width,
            config.viewport_height,
            mesh.triangle_count(),
            texture.width(),
            texture.height()
        );

        Ok(Self {
            model: config.model_transform(),
            view: Mat4::translation(t.x, t.y, t.z),
            projection: config.projection().matrix(),
            background: config.background_color(),
            framebuffer,
            mesh,
            texture,
            config,
            reported_skips: false,
        })
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn framebuffer(&self) -> &DepthColorBuffer {
        &self.framebuffer
    }

    /// The rendered frame as packed BGRA bytes, top row first.
    pub fn frame_bytes(&self) -> &[u8] {
        self.framebuffer.as_bytes()
    }

    /// The combined `model * view * projection` matrix for a spin angle.
    pub fn mvp(&self, angle: f32) -> Mat4 {
        self.model.to_matrix(angle) * self.view * self.projection
    }

    /// Render one frame.
    ///
    /// Clears color and depth, advances `ctx` by the configured increment,
    /// then rasterizes the mesh with the resulting MVP. Skipped triangles are
    /// counted in the returned report and never fail the frame.
    pub fn render_frame(&mut self, ctx: &mut RenderContext) -> PassReport {
        self.framebuffer
            .clear(self.background, self.config.clear_depth);
        ctx.advance(self.config.rotation_increment_per_frame);

        let mvp = self.mvp(ctx.angle);
        let report = rasterize_vertices(
            &self.mesh,
            &mvp,
            &self.texture,
            &mut self.framebuffer,
            self.config.texture_address,
        );

        log::debug!(
            "frame {}: angle {:.3}, {}/{} triangles drawn, {} pixels",
            ctx.frame,
            ctx.angle,
            report.drawn,
            report.triangles,
            report.pixels_written
        );
        if report.skipped() > 0 {
            if self.reported_skips {
                log::debug!(
                    "frame {}: skipped {} degenerate transforms, {} degenerate triangles",
                    ctx.frame,
                    report.degenerate_transforms,
                    report.degenerate_triangles
                );
            } else {
                log::warn!(
                    "frame {}: skipped {} degenerate transforms, {} degenerate triangles",
                    ctx.frame,
                    report.degenerate_transforms,
                    report.degenerate_triangles
                );
                self.reported_skips = true;
            }
        }
        report
    }
}
