//! Render configuration.
//!
//! Everything the Frame Driver needs that is not mesh or texture data lives
//! in [`RenderConfig`]. Configs are stored as RON; any field left out of a
//! file takes its default.

use std::f32::consts::FRAC_PI_2;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::ConfigError;
use crate::math::Vec3;
use crate::projection::Projection;
use crate::render::DepthColorBuffer;
use crate::texture::TextureAddress;
use crate::transform::{AxisAngle, Transform};

/// Tolerance on the length of configured rotation axes.
const AXIS_UNIT_TOLERANCE: f32 = 1e-3;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub viewport_width: u32,
    pub viewport_height: u32,
    /// Vertical field of view in radians.
    pub fov_radians: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    /// Fixed view translation applied after the model transform.
    pub camera_translation: Vec3,
    /// Radians added to the spin angle every frame.
    pub rotation_increment_per_frame: f32,
    /// Clear color as 0xAARRGGBB.
    pub background: u32,
    /// Depth the buffer is cleared to. Must be below every reachable depth.
    pub clear_depth: f32,
    pub model_scale: f32,
    pub texture_address: TextureAddress,
    /// Fixed rotations orienting the mesh, applied in order.
    pub axis_correction: Vec<AxisAngle>,
    pub spin_axis: Vec3,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            viewport_width: 800,
            viewport_height: 600,
            fov_radians: 0.942478,
            aspect: 800.0 / 600.0,
            near: 0.01,
            far: 100.0,
            camera_translation: Vec3::new(0.0, -0.25, 2.0),
            rotation_increment_per_frame: 0.02,
            background: 0xFF30_3030,
            clear_depth: DepthColorBuffer::EMPTY_DEPTH,
            model_scale: 0.2,
            texture_address: TextureAddress::Wrap,
            axis_correction: vec![
                AxisAngle::new(Vec3::UNIT_Y, FRAC_PI_2),
                AxisAngle::new(Vec3::UNIT_Z, FRAC_PI_2),
            ],
            spin_axis: Vec3::UNIT_Y,
        }
    }
}

impl RenderConfig {
    /// Load and validate a config from a RON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_ron_str(&contents)?;
        log::info!("loaded render config from {}", path.display());
        Ok(config)
    }

    /// Parse and validate a config from a RON string.
    pub fn from_ron_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .indentor("  ".to_string());
        Ok(ron::ser::to_string_pretty(self, pretty)?)
    }

    /// Write the config as pretty RON.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        fs::write(path, self.to_ron_string()?).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.viewport_width == 0 || self.viewport_height == 0 {
            return Err(invalid(
                "viewport",
                format!(
                    "must be non-zero, got {}x{}",
                    self.viewport_width, self.viewport_height
                ),
            ));
        }
        if !(self.fov_radians > 0.0 && self.fov_radians < std::f32::consts::PI) {
            return Err(invalid(
                "fov_radians",
                format!("must be in (0, pi), got {}", self.fov_radians),
            ));
        }
        if !(self.aspect > 0.0 && self.aspect.is_finite()) {
            return Err(invalid("aspect", format!("must be positive, got {}", self.aspect)));
        }
        if !(self.near > 0.0) {
            return Err(invalid("near", format!("must be positive, got {}", self.near)));
        }
        if !(self.far > self.near && self.far.is_finite()) {
            return Err(invalid(
                "far",
                format!("must be greater than near ({}), got {}", self.near, self.far),
            ));
        }
        if !self.rotation_increment_per_frame.is_finite() {
            return Err(invalid(
                "rotation_increment_per_frame",
                "must be finite".to_string(),
            ));
        }
        if !unit_length(self.spin_axis) {
            return Err(invalid(
                "spin_axis",
                format!("must be unit length, got {:?}", self.spin_axis),
            ));
        }
        if let Some(bad) = self.axis_correction.iter().find(|r| !unit_length(r.axis)) {
            return Err(invalid(
                "axis_correction",
                format!("axes must be unit length, got {:?}", bad.axis),
            ));
        }
        Ok(())
    }

    pub fn projection(&self) -> Projection {
        Projection::new(self.fov_radians, self.aspect, self.near, self.far)
    }

    /// The model transform: uniform scale, the axis correction and the spin axis.
    pub fn model_transform(&self) -> Transform {
        let mut transform = Transform::new();
        transform
            .set_scale_uniform(self.model_scale)
            .set_spin_axis(self.spin_axis);
        for rotation in &self.axis_correction {
            transform.correct(*rotation);
        }
        transform
    }

    pub fn background_color(&self) -> Color {
        Color::from_argb(self.background)
    }
}

fn invalid(field: &'static str, reason: String) -> ConfigError {
    ConfigError::Invalid { field, reason }
}

fn unit_length(axis: Vec3) -> bool {
    (axis.magnitude() - 1.0).abs() <= AXIS_UNIT_TOLERANCE
}
