use crate::DepthFunction;
use crate::Device;
use js_sys::Error;
use web_sys::WebGl2RenderingContext as Context;

impl Device {
    /// Draws one frame into the context's canvas.
    ///
    /// The lit mesh is drawn first with ordinary depth testing; the sky is
    /// drawn last at the far plane so it only fills the remaining pixels.
    pub(crate) fn draw_frame(&mut self) -> Result<(), Error> {
        self.gl.bind_framebuffer(Context::DRAW_FRAMEBUFFER, None);

        self.gl.clear_color(0.0, 0.0, 0.0, 1.0);
        self.gl.clear_depth(1.0);
        self.gl
            .clear(Context::COLOR_BUFFER_BIT | Context::DEPTH_BUFFER_BIT);

        let command = self.pbr_program.begin_draw();

        command.bind(&self.camera_buffer, "Camera");
        command.bind(&self.instance_buffer, "Instance");
        command.bind(&self.material_buffer, "Material");
        command.bind(&self.light_buffer, "Lights");
        command.bind(&self.irradiance_map, "irradiance_map");
        command.set_canvas_framebuffer();
        command.set_viewport(0, 0, self.raster_width, self.raster_height);
        command.set_depth_test(DepthFunction::Less);
        command.set_vertex_array(&self.mesh_vertices);
        command.draw_indexed_triangles(self.mesh_vertices.index_count());

        if self.environment_ready {
            self.capture_buffer.write(&self.sky_capture)?;

            let command = self.skybox_program.begin_draw();

            command.bind(&self.capture_buffer, "Capture");
            command.bind(&self.specular_map, "environment_map");
            command.set_canvas_framebuffer();
            command.set_viewport(0, 0, self.raster_width, self.raster_height);

            // the sky sits exactly at the far plane, LESS would reject it
            command.set_depth_test(DepthFunction::LessOrEqual);
            command.set_vertex_array(&self.cube_vertices);
            command.draw_triangles(0, 12);
        }

        Ok(())
    }
}
