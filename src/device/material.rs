use crate::{Device, Material};
use js_sys::Error;
use zerocopy::{AsBytes, FromBytes};

#[repr(align(16), C)]
#[derive(AsBytes, FromBytes, Debug, Default)]
pub struct MaterialData {
    base_color: [f32; 4], // rgb = albedo, a = metallic
    surface: [f32; 4],    // x = roughness, y = ambient occlusion
}

impl Device {
    pub(crate) fn update_material(&mut self, material: &Material) -> Result<(), Error> {
        if material.albedo.iter().any(|&channel| channel < 0.0) {
            return Err(Error::new("material albedo must be non-negative"));
        }

        let metallic = material.metallic.max(0.0).min(1.0);

        // zero roughness degenerates the GGX distribution
        let roughness = material.roughness.max(1e-3).min(1.0);
        let ambient_occlusion = material.ambient_occlusion.max(0.0).min(1.0);

        self.material_buffer.write(&MaterialData {
            base_color: [
                material.albedo[0],
                material.albedo[1],
                material.albedo[2],
                metallic,
            ],
            surface: [roughness, ambient_occlusion, 0.0, 0.0],
        })
    }
}
