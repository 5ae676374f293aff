#[allow(unused_imports)]
use log::{debug, info, warn};

use crate::{
    capture_projection, CaptureData, CubeFace, DepthFunction, Device, EquirectImage, CAPTURE_BASES,
};
use js_sys::Error;

/// Edge size of the specular environment cube map.
pub const SPECULAR_RESOLUTION: usize = 512;

/// Edge size of the convolved irradiance cube map.
pub const IRRADIANCE_RESOLUTION: usize = 32;

/// Step size of the hemisphere integration in the convolution pass.
pub const SAMPLE_DELTA: f32 = 0.025;

impl Device {
    /// Rebuilds the environment cube maps from a panorama, or releases them.
    ///
    /// On failure all environment resources are released, so a partially
    /// baked environment is never left behind.
    pub(crate) fn update_environment(
        &mut self,
        environment_map: Option<&EquirectImage>,
    ) -> Result<(), Error> {
        self.environment_ready = false;

        let image = match environment_map {
            Some(image) => image,
            None => {
                self.release_environment();
                return Ok(());
            }
        };

        if let Err(error) = self.bake_environment(image) {
            self.release_environment();
            return Err(error);
        }

        self.environment_ready = true;

        Ok(())
    }

    fn release_environment(&mut self) {
        self.panorama.reset();
        self.specular_map.reset();
        self.irradiance_map.reset();
    }

    fn bake_environment(&mut self, image: &EquirectImage) -> Result<(), Error> {
        if let Err(reason) = image.validate() {
            return Err(Error::new(reason));
        }

        info!(
            "baking environment from a {}x{} panorama",
            image.width, image.height
        );

        let mut pixels = Vec::with_capacity(4 * image.width * image.height);

        for rgb in image.pixels.chunks(3) {
            pixels.extend_from_slice(&[rgb[0], rgb[1], rgb[2], 1.0]);
        }

        self.panorama.upload(image.width, image.height, &pixels);

        self.specular_map.create(SPECULAR_RESOLUTION);
        self.irradiance_map.create(IRRADIANCE_RESOLUTION);
        self.capture_depth
            .create(SPECULAR_RESOLUTION, SPECULAR_RESOLUTION);

        for basis in &CAPTURE_BASES {
            self.write_capture_matrices(basis.face)?;

            self.capture_fbo.rebuild_cube(
                &self.specular_map,
                basis.face,
                Some(&self.capture_depth),
            )?;

            self.capture_fbo.clear(0, [0.0, 0.0, 0.0, 1.0]);
            self.capture_fbo.clear_depth_stencil(1.0, 0);

            let command = self.equirect_program.begin_draw();

            command.bind(&self.capture_buffer, "Capture");
            command.bind(&self.panorama, "equirect_map");
            command.set_framebuffer(&self.capture_fbo);
            command.set_viewport(0, 0, SPECULAR_RESOLUTION as i32, SPECULAR_RESOLUTION as i32);
            command.set_depth_test(DepthFunction::Less);
            command.set_vertex_array(&self.cube_vertices);
            command.draw_triangles(0, 12);
        }

        for basis in &CAPTURE_BASES {
            self.write_capture_matrices(basis.face)?;

            self.capture_fbo
                .rebuild_cube(&self.irradiance_map, basis.face, None)?;

            self.capture_fbo.clear(0, [0.0, 0.0, 0.0, 1.0]);

            let command = self.irradiance_program.begin_draw();

            command.bind(&self.capture_buffer, "Capture");
            command.bind(&self.specular_map, "environment_map");
            command.set_framebuffer(&self.capture_fbo);
            command.set_viewport(
                0,
                0,
                IRRADIANCE_RESOLUTION as i32,
                IRRADIANCE_RESOLUTION as i32,
            );
            command.set_vertex_array(&self.cube_vertices);
            command.draw_triangles(0, 12);
        }

        Ok(())
    }

    fn write_capture_matrices(&mut self, face: CubeFace) -> Result<(), Error> {
        let basis = &CAPTURE_BASES[face.index()];

        self.capture_buffer
            .write(&CaptureData::new(basis.view_matrix(), capture_projection()))
    }
}

