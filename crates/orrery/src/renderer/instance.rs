use bytemuck::{Pod, Zeroable};

/// Per-node render data read by the host renderer.
/// 24 floats = 96 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct NodeInstance {
    /// World matrix, column-major.
    pub model: [[f32; 4]; 4],
    /// RGB plus opacity.
    pub color: [f32; 4],
    /// Shape code: 0 sphere, 1 annulus, 2 cuboid, 3 points.
    pub shape: f32,
    /// Sphere: radius. Annulus: inner, outer. Cuboid: half extents.
    /// Points: point count, point size, cloud index.
    pub params: [f32; 3],
}

impl NodeInstance {
    pub const FLOATS: usize = 24;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Everything the host draws in one frame.
pub struct RenderBuffer {
    /// Opaque instances first, then translucent ones after `opaque_split`.
    pub instances: Vec<NodeInstance>,
    pub opaque_split: u32,
    /// Comet trail particles, all comets back to back: xyz per particle.
    pub trail_positions: Vec<f32>,
    /// rgb per particle.
    pub trail_colors: Vec<f32>,
    pub trail_sizes: Vec<f32>,
}

impl RenderBuffer {
    pub fn new() -> Self {
        Self {
            instances: Vec::with_capacity(256),
            opaque_split: 0,
            trail_positions: Vec::new(),
            trail_colors: Vec::new(),
            trail_sizes: Vec::new(),
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
        self.opaque_split = 0;
        self.trail_positions.clear();
        self.trail_colors.clear();
        self.trail_sizes.clear();
    }

    pub fn push(&mut self, instance: NodeInstance) {
        self.instances.push(instance);
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Raw pointer to instance data for host-side reads.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }

    pub fn trail_count(&self) -> u32 {
        self.trail_sizes.len() as u32
    }

    pub fn trail_positions_ptr(&self) -> *const f32 {
        self.trail_positions.as_ptr()
    }

    pub fn trail_colors_ptr(&self) -> *const f32 {
        self.trail_colors.as_ptr()
    }

    pub fn trail_sizes_ptr(&self) -> *const f32 {
        self.trail_sizes.as_ptr()
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instance_is_24_floats() {
        assert_eq!(std::mem::size_of::<NodeInstance>(), NodeInstance::STRIDE_BYTES);
        let inst = NodeInstance { shape: 2.0, ..Default::default() };
        let floats: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&inst));
        assert_eq!(floats.len(), NodeInstance::FLOATS);
        assert_eq!(floats[20], 2.0);
    }

    #[test]
    fn clear_resets_everything() {
        let mut buffer = RenderBuffer::new();
        buffer.push(NodeInstance::default());
        buffer.opaque_split = 1;
        buffer.trail_sizes.push(1.0);
        buffer.clear();
        assert_eq!(buffer.instance_count(), 0);
        assert_eq!(buffer.trail_count(), 0);
        assert_eq!(buffer.opaque_split, 0);
    }
}
