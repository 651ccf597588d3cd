use std::fs;
use std::path::Path;

use crate::error::GfxError;

/// Reads a WGSL source file and creates the module inside a validation error
/// scope, so a bad shader surfaces as a compile error naming the file rather
/// than an uncaptured device error later.
pub fn load_shader(device: &wgpu::Device, path: &Path) -> Result<wgpu::ShaderModule, GfxError> {
    let source = fs::read_to_string(path).map_err(|e| GfxError::File {
        path: path.to_path_buf(),
        source: e,
    })?;

    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: path.to_str(),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    });
    if let Some(error) = pollster::block_on(device.pop_error_scope()) {
        return Err(GfxError::ShaderCompile {
            path: path.to_path_buf(),
            log: error.to_string(),
        });
    }

    log::info!("Shader compiled: {}", path.display());
    Ok(module)
}
