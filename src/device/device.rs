#[allow(unused_imports)]
use log::{debug, info, warn};

use js_sys::Error;
use web_sys::WebGl2RenderingContext as Context;

use crate::*;

#[derive(Debug)]
pub struct Device {
    pub(crate) gl: Context,

    pub(crate) equirect_program: Shader,
    pub(crate) irradiance_program: Shader,
    pub(crate) pbr_program: Shader,
    pub(crate) skybox_program: Shader,

    pub(crate) camera_buffer: UniformBuffer<CameraData>,
    pub(crate) capture_buffer: UniformBuffer<CaptureData>,
    pub(crate) instance_buffer: UniformBuffer<InstanceData>,
    pub(crate) material_buffer: UniformBuffer<MaterialData>,
    pub(crate) light_buffer: UniformBuffer<LightData>,

    pub(crate) panorama: Texture<RGBA32F>,
    pub(crate) specular_map: CubeMap<RGBA32F>,
    pub(crate) irradiance_map: CubeMap<RGBA32F>,
    pub(crate) capture_depth: Texture<D24S8>,
    pub(crate) capture_fbo: Framebuffer,

    pub(crate) cube_vertices: VertexArray<[CubeVertex]>,
    pub(crate) mesh_vertices: VertexArray<[MeshVertex]>,

    pub(crate) sky_capture: CaptureData,

    pub(crate) raster_width: i32,
    pub(crate) raster_height: i32,

    pub(crate) environment_ready: bool,

    device_lost: bool,
}

impl Device {
    /// Creates a new device using a WebGL2 context.
    pub fn new(gl: &Context) -> Result<Self, Error> {
        check_extensions(gl)?;

        let mut device = Self {
            gl: gl.clone(),

            equirect_program: Shader::new(gl.clone(), &shaders::VS_CUBE, &shaders::FS_EQUIRECT),
            irradiance_program: Shader::new(gl.clone(), &shaders::VS_CUBE, &shaders::FS_IRRADIANCE),
            pbr_program: Shader::new(gl.clone(), &shaders::VS_PBR, &shaders::FS_PBR),
            skybox_program: Shader::new(gl.clone(), &shaders::VS_SKYBOX, &shaders::FS_SKYBOX),

            camera_buffer: UniformBuffer::new(gl.clone()),
            capture_buffer: UniformBuffer::new(gl.clone()),
            instance_buffer: UniformBuffer::new(gl.clone()),
            material_buffer: UniformBuffer::new(gl.clone()),
            light_buffer: UniformBuffer::new(gl.clone()),

            panorama: Texture::new(gl.clone()),
            specular_map: CubeMap::new(gl.clone()),
            irradiance_map: CubeMap::new(gl.clone()),
            capture_depth: Texture::new(gl.clone()),
            capture_fbo: Framebuffer::new(gl.clone()),

            cube_vertices: VertexArray::new(gl.clone()),
            mesh_vertices: VertexArray::new(gl.clone()),

            sky_capture: CaptureData::default(),

            raster_width: 0,
            raster_height: 0,

            environment_ready: false,
            device_lost: true,
        };

        device
            .irradiance_program
            .set_define("SAMPLE_DELTA", format!("{:+e}", SAMPLE_DELTA));

        device.pbr_program.set_define("NR_LIGHTS", MAX_LIGHTS);

        Ok(device)
    }

    /// Signals the context was lost.
    pub fn context_lost(&mut self) {
        self.device_lost = true;
    }

    /// Updates this device to render a given scene or returns an error.
    pub fn update(&mut self, scene: &mut Scene) -> Result<bool, Error> {
        if self.device_lost && !self.try_restore(scene)? {
            return Ok(false); // context currently lost
        }

        scene.drain_camera_input();

        let mut invalidated = false;

        let camera = &mut scene.camera;

        invalidated |= Dirty::clean(&mut scene.raster, |raster| {
            if raster.width == 0 || raster.height == 0 {
                return Err(Error::new("raster dimensions must be nonzero"));
            }

            self.raster_width = raster.width as i32;
            self.raster_height = raster.height as i32;

            // the camera projection depends on the aspect ratio
            Dirty::dirty(camera);

            Ok(())
        })?;

        invalidated |= Dirty::clean(&mut scene.camera, |camera| self.update_camera(camera))?;

        invalidated |= Dirty::clean(&mut scene.geometry, |mesh| self.update_geometry(mesh))?;

        invalidated |=
            Dirty::clean(&mut scene.instance, |transform| self.update_instance(transform))?;

        invalidated |=
            Dirty::clean(&mut scene.material, |material| self.update_material(material))?;

        invalidated |= Dirty::clean(&mut scene.lights, |lights| self.update_lights(lights))?;

        // the bake passes run as soon as the panorama changes, so their
        // programs must be ready before the environment is cleaned
        self.equirect_program.rebuild()?;
        self.irradiance_program.rebuild()?;

        invalidated |= Dirty::clean(&mut scene.environment_map, |environment_map| {
            self.update_environment(environment_map.as_ref())
        })?;

        self.pbr_program.rebuild()?;
        self.skybox_program.rebuild()?;

        Ok(invalidated)
    }

    /// Renders the current scene state into the context's canvas.
    pub fn render(&mut self) -> Result<(), Error> {
        if self.device_lost {
            return Ok(());
        }

        self.draw_frame()
    }

    fn try_restore(&mut self, scene: &mut Scene) -> Result<bool, Error> {
        if self.gl.is_context_lost() {
            return Ok(false);
        }

        check_extensions(&self.gl)?;

        self.equirect_program.invalidate();
        self.irradiance_program.invalidate();
        self.pbr_program.invalidate();
        self.skybox_program.invalidate();

        self.camera_buffer.invalidate();
        self.capture_buffer.invalidate();
        self.instance_buffer.invalidate();
        self.material_buffer.invalidate();
        self.light_buffer.invalidate();

        self.panorama.invalidate();
        self.specular_map.invalidate();
        self.irradiance_map.invalidate();
        self.capture_depth.invalidate();
        self.capture_fbo.invalidate();

        self.cube_vertices.invalidate();
        self.mesh_vertices.invalidate();

        self.cube_vertices.upload(&CUBE_VERTICES);

        self.environment_ready = false;

        scene.dirty_all_fields();

        self.device_lost = false;

        Ok(true)
    }
}

fn check_extensions(gl: &Context) -> Result<(), Error> {
    if let Err(_) | Ok(None) = gl.get_extension("EXT_color_buffer_float") {
        return Err(Error::new("extension `EXT_color_buffer_float' missing"));
    }

    // required to sample the floating-point panorama with linear filtering
    if let Err(_) | Ok(None) = gl.get_extension("OES_texture_float_linear") {
        return Err(Error::new("extension `OES_texture_float_linear' missing"));
    }

    Ok(())
}
