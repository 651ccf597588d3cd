#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct AnchorVertex {
    pub position: [f32; 2],
}

impl AnchorVertex {
    /// The buffer holds a single anchor point, read once per instance; the
    /// vertex index picks the quad corner in the shader stage.
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<AnchorVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &[
                // anchor position
                wgpu::VertexAttribute {
                    offset: std::mem::offset_of!(AnchorVertex, position) as wgpu::BufferAddress,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
            ],
        }
    }
}
