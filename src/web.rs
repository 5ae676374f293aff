use crate::{CameraEvent, Device, EquirectImage, MeshData, Scene};
use js_sys::Error;
use serde::{de::DeserializeOwned, Serialize};
use wasm_bindgen::prelude::*;
use web_sys::WebGl2RenderingContext;

/// WASM binding for a scene.
#[wasm_bindgen]
#[derive(Debug, Default)]
pub struct WebScene {
    scene: Scene,
}

#[wasm_bindgen]
impl WebScene {
    /// Creates a scene with the default sphere, lights and camera.
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebScene {
        Self::default()
    }

    pub fn json(&self) -> Result<JsValue, JsValue> {
        as_json(&self.scene)
    }

    /// Reconfigures the scene using the provided scene JSON data.
    ///
    /// This method will attempt to dirty the least amount of scene data
    /// possible, so it won't necessarily always dirty the entire scene.
    pub fn set_json(&mut self, json: &JsValue) -> Result<(), JsValue> {
        self.scene.patch_from_other(from_json(json)?);

        Ok(())
    }

    pub fn raster_width(&self) -> u32 {
        self.scene.raster.width
    }

    pub fn raster_height(&self) -> u32 {
        self.scene.raster.height
    }

    pub fn set_raster_dimensions(&mut self, width: u32, height: u32) {
        if self.scene.raster.width != width {
            self.scene.raster.width = width;
        }

        if self.scene.raster.height != height {
            self.scene.raster.height = height;
        }
    }

    /// Replaces the environment map with an RGB panorama.
    ///
    /// The pixel data must hold `3 * width * height` floats of linear
    /// radiance, rows running top to bottom.
    pub fn set_environment_map(
        &mut self,
        width: usize,
        height: usize,
        pixels: &[f32],
    ) -> Result<(), JsValue> {
        let image = EquirectImage::new(width, height, pixels.to_vec());

        if let Err(reason) = image.validate() {
            return Err(Error::new(reason).into());
        }

        *self.scene.environment_map = Some(image);

        Ok(())
    }

    pub fn clear_environment_map(&mut self) {
        if self.scene.environment_map.is_some() {
            *self.scene.environment_map = None;
        }
    }

    /// Replaces the shaded mesh, given as indexed triangles.
    pub fn set_mesh(
        &mut self,
        positions: &[f32],
        normals: &[f32],
        uvs: &[f32],
        indices: &[u16],
    ) -> Result<(), JsValue> {
        if positions.len() % 3 != 0 || normals.len() % 3 != 0 || uvs.len() % 2 != 0 {
            return Err(Error::new("mesh attribute arrays have invalid lengths").into());
        }

        let mesh = MeshData {
            positions: positions.chunks(3).map(|p| [p[0], p[1], p[2]]).collect(),
            normals: normals.chunks(3).map(|n| [n[0], n[1], n[2]]).collect(),
            uvs: uvs.chunks(2).map(|uv| [uv[0], uv[1]]).collect(),
            indices: indices.to_vec(),
        };

        if let Err(reason) = mesh.validate() {
            return Err(Error::new(reason).into());
        }

        *self.scene.geometry = mesh;

        Ok(())
    }

    /// Queues an orbit of the camera around its target.
    pub fn orbit_camera(&mut self, azimuth: f32, elevation: f32) {
        self.scene
            .queue_camera_event(CameraEvent::Rotate { azimuth, elevation });
    }

    /// Queues a change of the camera's distance to its target.
    pub fn zoom_camera(&mut self, amount: f32) {
        self.scene.queue_camera_event(CameraEvent::Zoom { amount });
    }

    pub fn set_material(&mut self, r: f32, g: f32, b: f32, metallic: f32, roughness: f32) {
        self.scene.material.albedo = [r, g, b];
        self.scene.material.metallic = metallic;
        self.scene.material.roughness = roughness;
    }

    pub fn set_transform(&mut self, x: f32, y: f32, z: f32, rotation_y: f32, scale: f32) {
        self.scene.instance.translation = [x, y, z];
        self.scene.instance.rotation_y = rotation_y;
        self.scene.instance.scale = scale;
    }
}

fn as_json<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    Ok(JsValue::from_serde(value).map_err(|e| Error::new(&e.to_string()))?)
}

fn from_json<T: DeserializeOwned>(json: &JsValue) -> Result<T, JsValue> {
    Ok(json.into_serde().map_err(|e| Error::new(&e.to_string()))?)
}

/// WASM binding for a device.
#[wasm_bindgen]
#[derive(Debug)]
pub struct WebDevice {
    device: Device,
}

#[wasm_bindgen]
impl WebDevice {
    #[wasm_bindgen(constructor)]
    pub fn new(context: &WebGl2RenderingContext) -> Result<WebDevice, JsValue> {
        Ok(Self {
            device: Device::new(context)?,
        })
    }

    /// Updates the device with a scene, returning true if an update occurred.
    pub fn update(&mut self, scene: &mut WebScene) -> Result<bool, JsValue> {
        Ok(self.device.update(&mut scene.scene)?)
    }

    /// Renders the current scene state into the context's canvas.
    pub fn render(&mut self) -> Result<(), JsValue> {
        Ok(self.device.render()?)
    }

    /// Indicates to the device that its WebGL context has been lost.
    pub fn context_lost(&mut self) {
        self.device.context_lost();
    }
}

/// Returns a version string for the WASM module.
#[wasm_bindgen]
pub fn version() -> String {
    concat!("Solstice v", env!("CARGO_PKG_VERSION"), " (WebGL2)").to_owned()
}

/// Configures browser logging functionality.
///
/// This function is safe to call more than once and will do nothing should it
/// be called more than once; this lets it co-exist nicely with hot reloaders.
#[wasm_bindgen]
pub fn initialize_logging() {
    console_error_panic_hook::set_once();
    let _ = console_log::init();
}
