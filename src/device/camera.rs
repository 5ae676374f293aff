use crate::{Device, OrbitCamera};
use cgmath::{Matrix4, Vector4};
use js_sys::Error;
use zerocopy::{AsBytes, FromBytes};

#[repr(align(16), C)]
#[derive(AsBytes, FromBytes, Debug, Default)]
pub struct CameraData {
    view: [[f32; 4]; 4],
    proj: [[f32; 4]; 4],
    eye: [f32; 4],
}

impl Device {
    pub(crate) fn update_camera(&mut self, camera: &OrbitCamera) -> Result<(), Error> {
        let aspect = self.raster_width as f32 / self.raster_height as f32;

        let view = camera.view_matrix();
        let proj = camera.projection_matrix(aspect);
        let eye = camera.position();

        // the sky pass reuses the same matrices with the translation removed,
        // keeping the environment centered on the viewer
        let mut sky_view = view;
        sky_view.w = Vector4::unit_w();

        self.sky_capture = CaptureData::new(sky_view, proj);

        self.camera_buffer.write(&CameraData {
            view: view.into(),
            proj: proj.into(),
            eye: [eye.x, eye.y, eye.z, 1.0],
        })
    }
}

/// View and projection pair consumed by the cube-rendering vertex shaders.
#[repr(align(16), C)]
#[derive(AsBytes, FromBytes, Debug, Default)]
pub struct CaptureData {
    view: [[f32; 4]; 4],
    proj: [[f32; 4]; 4],
}

impl CaptureData {
    pub(crate) fn new(view: Matrix4<f32>, proj: Matrix4<f32>) -> Self {
        Self {
            view: view.into(),
            proj: proj.into(),
        }
    }
}
