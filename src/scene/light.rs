use std::f32::consts::PI;

use crate::math::Color;

/// Renderer-wide shadow filtering algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShadowMapKind {
    Basic,
    #[default]
    Pcf,
    PcfSoft,
    Vsm,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowConfig {
    pub map_width: u32,
    pub map_height: u32,
    /// Blur radius, honoured by the soft filtering modes
    pub radius: f32,
}

impl Default for ShadowConfig {
    fn default() -> Self {
        Self {
            map_width: 512,
            map_height: 512,
            radius: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightKind {
    Ambient,
    /// Shines from the node position toward the origin
    Directional,
    Point { distance: f32, decay: f32 },
    Spot { distance: f32, angle: f32, penumbra: f32, decay: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub kind: LightKind,
    pub color: Color,
    pub intensity: f32,
    pub cast_shadow: bool,
    pub shadow: ShadowConfig,
}

impl Light {
    fn new(kind: LightKind, color: impl Into<Color>, intensity: f32) -> Self {
        Self {
            kind,
            color: color.into(),
            intensity,
            cast_shadow: false,
            shadow: ShadowConfig::default(),
        }
    }

    pub fn ambient(color: impl Into<Color>, intensity: f32) -> Self {
        Self::new(LightKind::Ambient, color, intensity)
    }

    pub fn directional(color: impl Into<Color>, intensity: f32) -> Self {
        Self::new(LightKind::Directional, color, intensity)
    }

    /// `distance` 0 means no cutoff
    pub fn point(color: impl Into<Color>, intensity: f32, distance: f32) -> Self {
        Self::new(LightKind::Point { distance, decay: 2.0 }, color, intensity)
    }

    pub fn spot(color: impl Into<Color>, intensity: f32, distance: f32, angle: f32) -> Self {
        Self::new(
            LightKind::Spot {
                distance,
                angle: angle.min(PI / 2.0),
                penumbra: 0.0,
                decay: 2.0,
            },
            color,
            intensity,
        )
    }

    pub fn with_shadow(mut self, shadow: ShadowConfig) -> Self {
        self.cast_shadow = true;
        self.shadow = shadow;
        self
    }

    pub fn casts_shadow(mut self) -> Self {
        self.cast_shadow = true;
        self
    }

    pub fn is_ambient(&self) -> bool {
        matches!(self.kind, LightKind::Ambient)
    }
}
