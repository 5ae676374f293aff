use crate::{Device, Lights, MAX_LIGHTS};
use js_sys::Error;
use zerocopy::{AsBytes, FromBytes};

#[repr(align(16), C)]
#[derive(AsBytes, FromBytes, Debug, Default)]
pub struct LightData {
    position: [[f32; 4]; MAX_LIGHTS], // w = 1 when the light is active
    color: [[f32; 4]; MAX_LIGHTS],
}

impl Device {
    pub(crate) fn update_lights(&mut self, lights: &Lights) -> Result<(), Error> {
        if lights.lights.len() > MAX_LIGHTS {
            return Err(Error::new("too many point lights in scene"));
        }

        let mut data = LightData::default();

        for (index, light) in lights.lights.iter().enumerate() {
            let [x, y, z] = light.position;
            let [r, g, b] = light.color;

            data.position[index] = [x, y, z, 1.0];
            data.color[index] = [r, g, b, 1.0];
        }

        self.light_buffer.write(&data)
    }
}
