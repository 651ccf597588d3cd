use glam::{Mat4, Vec3};

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view: [[f32; 4]; 4],
    pub proj: [[f32; 4]; 4],
}

/// Fixed pixel-space camera: an orthographic projection over the window's
/// pixel rectangle (y grows downward) seen from an eye a few units up the
/// +Z axis. Built once at startup; nothing moves it afterwards.
pub struct ScreenCamera {
    pub eye: Vec3,
    pub forward: Vec3,
    pub viewport: (u32, u32),
}

impl ScreenCamera {
    pub fn new(viewport_width: u32, viewport_height: u32) -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, 3.0),
            forward: Vec3::new(0.0, 0.0, -1.0),
            viewport: (viewport_width, viewport_height),
        }
    }

    pub fn build_uniform(&self) -> CameraUniform {
        let view = Mat4::look_at_rh(self.eye, self.eye + self.forward, Vec3::Y);
        // Top maps to y = 0 and bottom to the viewport height, so world
        // coordinates are window pixels.
        let proj = Mat4::orthographic_rh(
            0.0,
            self.viewport.0 as f32,
            self.viewport.1 as f32,
            0.0,
            0.1,
            500.0,
        );

        CameraUniform {
            view: view.to_cols_array_2d(),
            proj: proj.to_cols_array_2d(),
        }
    }
}
