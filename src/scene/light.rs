use serde::{Deserialize, Serialize};
use smart_default::SmartDefault;

/// Highest number of point lights the shading pass supports.
pub const MAX_LIGHTS: usize = 4;

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize, SmartDefault)]
pub struct PointLight {
    pub position: [f32; 3],
    #[default([300.0, 300.0, 300.0])]
    pub color: [f32; 3],
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Lights {
    pub lights: Vec<PointLight>,
}

impl Default for Lights {
    fn default() -> Self {
        let color = [300.0, 300.0, 300.0];

        Self {
            lights: vec![
                PointLight {
                    position: [-10.0, 10.0, 10.0],
                    color,
                },
                PointLight {
                    position: [10.0, 10.0, 10.0],
                    color,
                },
                PointLight {
                    position: [-10.0, -10.0, 10.0],
                    color,
                },
                PointLight {
                    position: [10.0, -10.0, 10.0],
                    color,
                },
            ],
        }
    }
}
