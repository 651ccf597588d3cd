use std::fs;
use std::path::Path;

use crate::error::GfxError;

pub struct Texture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
    pub size: (u32, u32),
}

#[derive(Debug)]
struct DecodedImage {
    pixels: Vec<u8>,
    width: u32,
    height: u32,
    format: wgpu::TextureFormat,
    bytes_per_pixel: u32,
}

/// Pixel format follows the source channel count: grayscale stays a single
/// channel; three-channel data gains an opaque alpha (there is no packed
/// 24-bit GPU format); anything else converts through RGBA as well.
fn decode_pixels(path: &Path, bytes: &[u8]) -> Result<DecodedImage, GfxError> {
    let image = image::load_from_memory(bytes).map_err(|e| GfxError::ImageLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let width = image.width();
    let height = image.height();

    let decoded = match image {
        image::DynamicImage::ImageLuma8(gray) => DecodedImage {
            pixels: gray.into_raw(),
            width,
            height,
            format: wgpu::TextureFormat::R8Unorm,
            bytes_per_pixel: 1,
        },
        other => DecodedImage {
            pixels: other.to_rgba8().into_raw(),
            width,
            height,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            bytes_per_pixel: 4,
        },
    };
    Ok(decoded)
}

impl Texture {
    pub fn from_file(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        path: &Path,
    ) -> Result<Self, GfxError> {
        let bytes = fs::read(path).map_err(|e| GfxError::File {
            path: path.to_path_buf(),
            source: e,
        })?;
        let decoded = decode_pixels(path, &bytes)?;
        log::info!(
            "Texture loaded: {} ({}x{}, {:?})",
            path.display(),
            decoded.width,
            decoded.height,
            decoded.format
        );
        Ok(Self::upload(device, queue, &decoded, path.to_str()))
    }

    /// Immutable storage: extent and format are fixed at creation and the
    /// pixels are written exactly once.
    fn upload(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        decoded: &DecodedImage,
        label: Option<&str>,
    ) -> Self {
        let size = wgpu::Extent3d {
            width: decoded.width,
            height: decoded.height,
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label,
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: decoded.format,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            texture.as_image_copy(),
            &decoded.pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(decoded.bytes_per_pixel * decoded.width),
                rows_per_image: Some(decoded.height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label,
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        Self {
            texture,
            view,
            sampler,
            size: (decoded.width, decoded.height),
        }
    }
}
