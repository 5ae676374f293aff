use cgmath::{Matrix4, Rad, Vector3};
use serde::{Deserialize, Serialize};
use smart_default::SmartDefault;

/// Placement of the shaded mesh in world space.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize, SmartDefault)]
pub struct Transform {
    #[default([0.0, 0.0, 0.0])]
    pub translation: [f32; 3],
    #[default(0.0)]
    pub rotation_y: f32,
    #[default(1.0)]
    pub scale: f32,
}

impl Transform {
    pub fn matrix(&self) -> Matrix4<f32> {
        Matrix4::from_translation(Vector3::from(self.translation))
            * Matrix4::from_angle_y(Rad(self.rotation_y))
            * Matrix4::from_scale(self.scale)
    }
}
