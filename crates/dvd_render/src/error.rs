use std::fmt;
use std::io;
use std::path::PathBuf;

/// Fatal graphics-stack failures. Every variant aborts the startup sequence
/// (or, for `Device`, the run itself); nothing is retried.
#[derive(Debug)]
pub enum GfxError {
    /// Instance, surface, adapter or device could not be created.
    ContextCreation { reason: String },
    /// WGSL validation failed while creating a shader module.
    ShaderCompile { path: PathBuf, log: String },
    /// Validation failed while assembling the render pipeline, where the
    /// stage interfaces and layouts meet.
    ShaderLink { log: String },
    /// The image bytes could not be decoded.
    ImageLoad { path: PathBuf, reason: String },
    /// A source file could not be opened or read.
    File { path: PathBuf, source: io::Error },
    /// The device or surface was lost mid-run.
    Device { reason: String },
}

impl fmt::Display for GfxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GfxError::ContextCreation { reason } => {
                write!(f, "graphics context creation failed: {reason}")
            }
            GfxError::ShaderCompile { path, log } => {
                write!(f, "shader compilation failed for {}: {log}", path.display())
            }
            GfxError::ShaderLink { log } => {
                write!(f, "shader program link failed: {log}")
            }
            GfxError::ImageLoad { path, reason } => {
                write!(f, "image decode failed for {}: {reason}", path.display())
            }
            GfxError::File { path, source } => {
                write!(f, "cannot read {}: {source}", path.display())
            }
            GfxError::Device { reason } => {
                write!(f, "graphics device lost: {reason}")
            }
        }
    }
}

impl std::error::Error for GfxError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GfxError::File { source, .. } => Some(source),
            _ => None,
        }
    }
}
