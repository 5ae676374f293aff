use crate::{Device, Transform};
use cgmath::{Matrix, SquareMatrix};
use js_sys::Error;
use zerocopy::{AsBytes, FromBytes};

#[repr(align(16), C)]
#[derive(AsBytes, FromBytes, Debug, Default)]
pub struct InstanceData {
    model: [[f32; 4]; 4],
    normal_matrix: [[f32; 4]; 4],
}

impl Device {
    pub(crate) fn update_instance(&mut self, transform: &Transform) -> Result<(), Error> {
        let model = transform.matrix();

        // normals transform by the inverse transpose to stay perpendicular
        // under non-uniform scaling
        let normal_matrix = model
            .invert()
            .ok_or_else(|| Error::new("instance transform is singular"))?
            .transpose();

        self.instance_buffer.write(&InstanceData {
            model: model.into(),
            normal_matrix: normal_matrix.into(),
        })
    }
}
