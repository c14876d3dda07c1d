//! Studio light rig.

use nalgebra::Point3;

/// Kind of light source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightKind {
    /// Uniform light from every direction.
    Ambient,
    /// Parallel rays shining from `position` toward the origin.
    Directional,
}

/// A single light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    /// Light kind.
    pub kind: LightKind,
    /// Linear RGB color.
    pub color: [f32; 3],
    /// Intensity multiplier.
    pub intensity: f32,
    /// Position; ignored for ambient lights.
    pub position: Point3<f32>,
    /// Whether the light casts shadows.
    pub casts_shadow: bool,
}

impl Light {
    fn ambient(color: u32, intensity: f32) -> Self {
        Self {
            kind: LightKind::Ambient,
            color: rgb(color),
            intensity,
            position: Point3::origin(),
            casts_shadow: false,
        }
    }

    fn directional(color: u32, intensity: f32, position: [f32; 3]) -> Self {
        Self {
            kind: LightKind::Directional,
            color: rgb(color),
            intensity,
            position: Point3::from(position),
            casts_shadow: false,
        }
    }

    /// Unit direction the light travels in (toward the origin).
    pub fn direction(&self) -> nalgebra::Vector3<f32> {
        (-self.position.coords)
            .try_normalize(1e-6)
            .unwrap_or_else(|| -nalgebra::Vector3::y())
    }
}

/// Convert a `0xRRGGBB` color to `[r, g, b]` in `0..=1`.
pub fn rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}

/// Ambient + key + rim + fill lighting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightRig {
    /// Soft base illumination.
    pub ambient: Light,
    /// Main warm light from the front-right, casting shadows.
    pub key: Light,
    /// Cool back light outlining the silhouette.
    pub rim: Light,
    /// Frontal light softening the key's shadows.
    pub fill: Light,
}

impl Default for LightRig {
    fn default() -> Self {
        let mut key = Light::directional(0xffedd5, 1.2, [2.0, 5.0, 5.0]);
        key.casts_shadow = true;
        Self {
            ambient: Light::ambient(0xffffff, 0.7),
            key,
            rim: Light::directional(0x4f46e5, 0.8, [-5.0, 5.0, -5.0]),
            fill: Light::directional(0xffffff, 0.5, [0.0, 0.0, 5.0]),
        }
    }
}

impl LightRig {
    /// All four lights.
    pub fn lights(&self) -> [&Light; 4] {
        [&self.ambient, &self.key, &self.rim, &self.fill]
    }

    /// The directional lights (key, rim, fill).
    pub fn directional(&self) -> [&Light; 3] {
        [&self.key, &self.rim, &self.fill]
    }
}
