use bytemuck::{Pod, Zeroable};

/// Per-instance mesh data read by the JS renderer.
/// Must match the JS protocol: 28 floats = 112 bytes stride.
///
/// `model` is the column-major world matrix. `radius` is the sphere radius
/// or the ring's outer radius; `inner` is only meaningful for rings.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct MeshInstance {
    pub model: [f32; 16],
    /// RGBA; alpha is the mesh opacity.
    pub color: [f32; 4],
    pub emissive: f32,
    pub shininess: f32,
    /// 0 = sphere, 1 = ring.
    pub shape: f32,
    pub radius: f32,
    pub inner: f32,
    /// 1.0 when scene lights apply.
    pub lit: f32,
    pub double_sided: f32,
    /// Entity id, so the renderer can key its mesh cache.
    pub entity: f32,
}

impl MeshInstance {
    pub const FLOATS: usize = 28;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

impl Default for MeshInstance {
    fn default() -> Self {
        Self::zeroed()
    }
}

/// Mesh instances for one frame.
pub struct InstanceBuffer {
    /// Opaque instances first, then translucent ones from `transparent_split`.
    pub instances: Vec<MeshInstance>,
    pub transparent_split: u32,
}

impl InstanceBuffer {
    pub fn new() -> Self {
        Self::with_capacity(64)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            instances: Vec::with_capacity(capacity),
            transparent_split: 0,
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
        self.transparent_split = 0;
    }

    pub fn push(&mut self, instance: MeshInstance) {
        self.instances.push(instance);
    }

    pub fn set_transparent_split(&mut self, split: u32) {
        self.transparent_split = split;
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }
}

impl Default for InstanceBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mesh_instance_is_28_floats() {
        assert_eq!(std::mem::size_of::<MeshInstance>(), MeshInstance::STRIDE_BYTES);
        assert_eq!(MeshInstance::FLOATS, 28);
    }

    #[test]
    fn buffer_push_and_count() {
        let mut buf = InstanceBuffer::new();
        buf.push(MeshInstance::default());
        buf.push(MeshInstance::default());
        assert_eq!(buf.instance_count(), 2);
        let floats: &[f32] = bytemuck::cast_slice(&buf.instances);
        assert_eq!(floats.len(), 56);
        buf.clear();
        assert_eq!(buf.instance_count(), 0);
    }
}
