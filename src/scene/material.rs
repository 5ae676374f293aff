use serde::{Deserialize, Serialize};
use smart_default::SmartDefault;

/// Metallic-roughness surface parameters, in linear color space.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize, SmartDefault)]
pub struct Material {
    #[default([1.0, 0.5, 0.5])]
    pub albedo: [f32; 3],
    #[default(0.0)]
    pub metallic: f32,
    #[default(0.2)]
    pub roughness: f32,
    #[default(1.0)]
    pub ambient_occlusion: f32,
}
