use crate::camera::CameraUniform;
use crate::error::GfxError;
use crate::texture::Texture;
use crate::vertex::AnchorVertex;

/// Bind group indices agreed between this module and the WGSL sources. The
/// shaders declare the same numbers literally; nothing is looked up by name
/// at runtime.
pub const GROUP_CAMERA: u32 = 0;
pub const GROUP_TEXTURE: u32 = 1;
pub const GROUP_SPRITE: u32 = 2;

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SpriteUniform {
    pub model: [[f32; 4]; 4],
    /// x holds the rasterized square's side in pixels; yzw pad the field to
    /// a 16-byte boundary.
    pub size: [f32; 4],
}

impl SpriteUniform {
    pub fn new(model: glam::Mat4, point_size: f32) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            size: [point_size, 0.0, 0.0, 0.0],
        }
    }
}

pub struct SpritePipeline {
    pub render_pipeline: wgpu::RenderPipeline,
    camera_layout: wgpu::BindGroupLayout,
    texture_layout: wgpu::BindGroupLayout,
    sprite_layout: wgpu::BindGroupLayout,
}

impl SpritePipeline {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        vert_module: &wgpu::ShaderModule,
        frag_module: &wgpu::ShaderModule,
    ) -> Result<Self, GfxError> {
        let camera_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("camera bind group layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: wgpu::BufferSize::new(
                        std::mem::size_of::<CameraUniform>() as u64
                    ),
                },
                count: None,
            }],
        });

        let texture_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("texture bind group layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let sprite_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("sprite bind group layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: wgpu::BufferSize::new(
                        std::mem::size_of::<SpriteUniform>() as u64
                    ),
                },
                count: None,
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("sprite pipeline layout"),
            bind_group_layouts: &[&camera_layout, &texture_layout, &sprite_layout],
            push_constant_ranges: &[],
        });

        // Pipeline creation is where the stage interfaces and layouts meet,
        // so it runs in its own error scope: a mismatch is a link failure,
        // distinct from a compile failure in either module.
        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("sprite pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: vert_module,
                entry_point: Some("vs_main"),
                buffers: &[AnchorVertex::layout()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: frag_module,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleStrip,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });
        if let Some(error) = pollster::block_on(device.pop_error_scope()) {
            return Err(GfxError::ShaderLink {
                log: error.to_string(),
            });
        }

        Ok(Self {
            render_pipeline,
            camera_layout,
            texture_layout,
            sprite_layout,
        })
    }

    pub fn create_camera_bind_group(
        &self,
        device: &wgpu::Device,
        buffer: &wgpu::Buffer,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("camera bind group"),
            layout: &self.camera_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        })
    }

    pub fn create_texture_bind_group(
        &self,
        device: &wgpu::Device,
        texture: &Texture,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("texture bind group"),
            layout: &self.texture_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&texture.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&texture.sampler),
                },
            ],
        })
    }

    pub fn create_sprite_bind_group(
        &self,
        device: &wgpu::Device,
        buffer: &wgpu::Buffer,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("sprite bind group"),
            layout: &self.sprite_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sprite_uniform_carries_model_and_point_size() {
        let model = glam::Mat4::from_translation(glam::Vec3::new(400.0, 300.0, 0.0));
        let uniform = SpriteUniform::new(model, 128.0);
        assert_eq!(uniform.model, model.to_cols_array_2d());
        assert_eq!(uniform.size, [128.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_sprite_uniform_is_tightly_packed() {
        // 4x4 model matrix plus one vec4: the WGSL struct mirrors this
        // layout, so any padding drift would skew the upload.
        assert_eq!(std::mem::size_of::<SpriteUniform>(), 64 + 16);
        assert_eq!(std::mem::size_of::<CameraUniform>(), 128);
    }

    #[test]
    fn test_bind_group_indices_are_stable() {
        assert_eq!(GROUP_CAMERA, 0);
        assert_eq!(GROUP_TEXTURE, 1);
        assert_eq!(GROUP_SPRITE, 2);
    }
}
