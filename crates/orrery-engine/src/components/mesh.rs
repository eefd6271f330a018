/// RGB color for mesh materials.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl MeshColor {
    pub const WHITE: Self = Self { r: 1.0, g: 1.0, b: 1.0 };

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build from a packed `0xRRGGBB` value.
    pub const fn hex(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xFF) as f32 / 255.0,
            g: ((rgb >> 8) & 0xFF) as f32 / 255.0,
            b: (rgb & 0xFF) as f32 / 255.0,
        }
    }
}

impl Default for MeshColor {
    fn default() -> Self {
        Self { r: 0.6, g: 0.6, b: 0.8 }
    }
}

/// Mesh primitive. Both are centered on the entity origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MeshShape {
    Sphere { radius: f32 },
    /// Flat annulus in the local XY plane (normal +Z).
    Ring { inner: f32, outer: f32 },
}

impl MeshShape {
    /// Wire tag for the renderer.
    pub fn kind(&self) -> f32 {
        match self {
            MeshShape::Sphere { .. } => 0.0,
            MeshShape::Ring { .. } => 1.0,
        }
    }

    /// Radius of a bounding sphere in local units.
    pub fn bounding_radius(&self) -> f32 {
        match *self {
            MeshShape::Sphere { radius } => radius,
            MeshShape::Ring { outer, .. } => outer,
        }
    }
}

/// Component for renderable meshes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshComponent {
    pub shape: MeshShape,
    pub color: MeshColor,
    /// 1.0 = opaque.
    pub opacity: f32,
    /// Phong specular exponent (default: 32.0).
    pub shininess: f32,
    /// Glow multiplier. Unlit meshes render at full color regardless.
    pub emissive: f32,
    /// Whether scene lights affect this mesh.
    pub lit: bool,
    pub double_sided: bool,
}

impl Default for MeshComponent {
    fn default() -> Self {
        Self {
            shape: MeshShape::Sphere { radius: 1.0 },
            color: MeshColor::default(),
            opacity: 1.0,
            shininess: 32.0,
            emissive: 0.0,
            lit: true,
            double_sided: false,
        }
    }
}

impl MeshComponent {
    pub fn new(shape: MeshShape, color: MeshColor) -> Self {
        Self {
            shape,
            color,
            ..Default::default()
        }
    }

    pub fn sphere(radius: f32, color: MeshColor) -> Self {
        Self::new(MeshShape::Sphere { radius }, color)
    }

    pub fn ring(inner: f32, outer: f32, color: MeshColor) -> Self {
        Self::new(MeshShape::Ring { inner, outer }, color)
    }

    pub fn with_shininess(mut self, shininess: f32) -> Self {
        self.shininess = shininess;
        self
    }

    pub fn with_emissive(mut self, emissive: f32) -> Self {
        self.emissive = emissive;
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    pub fn unlit(mut self) -> Self {
        self.lit = false;
        self
    }

    pub fn double_sided(mut self) -> Self {
        self.double_sided = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_unpacks_channels() {
        let c = MeshColor::hex(0xff8000);
        assert_eq!(c.r, 1.0);
        assert!((c.g - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(c.b, 0.0);
    }

    #[test]
    fn ring_bounds_by_outer_radius() {
        let ring = MeshShape::Ring { inner: 1.5, outer: 2.5 };
        assert_eq!(ring.bounding_radius(), 2.5);
        assert_eq!(ring.kind(), 1.0);
    }

    #[test]
    fn opacity_is_clamped() {
        let m = MeshComponent::default().with_opacity(3.0);
        assert_eq!(m.opacity, 1.0);
    }
}
