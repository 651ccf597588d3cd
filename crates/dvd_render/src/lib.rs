pub mod camera;
pub mod error;
pub mod gpu_context;
pub mod pipeline;
pub mod shader;
pub mod texture;
pub mod vertex;

pub use camera::{CameraUniform, ScreenCamera};
pub use error::GfxError;
pub use gpu_context::GpuContext;
pub use pipeline::{SpritePipeline, SpriteUniform};
pub use shader::load_shader;
pub use texture::Texture;
pub use vertex::AnchorVertex;
