use cgmath::{Matrix4, PerspectiveFov, Point3, Rad, Vector3};
use serde::{Deserialize, Serialize};
use smart_default::SmartDefault;

/// Smallest allowed angle between the view direction and the vertical axis.
///
/// Keeps the look-at basis well-defined when orbiting over the poles.
const ELEVATION_MARGIN: f32 = 0.001;

const MIN_ORBIT_RADIUS: f32 = 0.5;

/// A camera orbiting a fixed target point.
///
/// The position is derived from spherical coordinates around the target; the
/// camera always looks at the target with the world Y axis as up.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize, SmartDefault)]
pub struct OrbitCamera {
    #[default([0.0, 0.0, 0.0])]
    pub target: [f32; 3],
    #[default(7.0)]
    pub radius: f32,
    #[default(0.0)]
    pub azimuth: f32,
    #[default(0.0)]
    pub elevation: f32,
    #[default(std::f32::consts::FRAC_PI_4)]
    pub field_of_view: f32,
}

/// A camera manipulation event, queued up between frames.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum CameraEvent {
    Rotate { azimuth: f32, elevation: f32 },
    Zoom { amount: f32 },
}

impl OrbitCamera {
    pub fn apply(&mut self, event: CameraEvent) {
        match event {
            CameraEvent::Rotate { azimuth, elevation } => {
                let limit = std::f32::consts::FRAC_PI_2 - ELEVATION_MARGIN;

                self.azimuth += azimuth;
                self.elevation = (self.elevation + elevation).max(-limit).min(limit);
            }
            CameraEvent::Zoom { amount } => {
                self.radius = (self.radius + amount).max(MIN_ORBIT_RADIUS);
            }
        }
    }

    pub fn position(&self) -> Point3<f32> {
        let (sin_az, cos_az) = self.azimuth.sin_cos();
        let (sin_el, cos_el) = self.elevation.sin_cos();

        Point3::new(
            self.target[0] + self.radius * sin_az * cos_el,
            self.target[1] + self.radius * sin_el,
            self.target[2] + self.radius * cos_az * cos_el,
        )
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at(
            self.position(),
            Point3::from(self.target),
            Vector3::unit_y(),
        )
    }

    pub fn projection_matrix(&self, aspect: f32) -> Matrix4<f32> {
        PerspectiveFov {
            fovy: Rad(self.field_of_view),
            aspect,
            near: 0.1,
            far: 100.0,
        }
        .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elevation_is_clamped_below_the_poles() {
        let mut camera = OrbitCamera::default();

        camera.apply(CameraEvent::Rotate {
            azimuth: 0.0,
            elevation: 10.0,
        });

        assert!(camera.elevation < std::f32::consts::FRAC_PI_2);

        camera.apply(CameraEvent::Rotate {
            azimuth: 0.0,
            elevation: -20.0,
        });

        assert!(camera.elevation > -std::f32::consts::FRAC_PI_2);
    }

    #[test]
    fn zoom_never_reaches_the_target() {
        let mut camera = OrbitCamera::default();

        camera.apply(CameraEvent::Zoom { amount: -100.0 });

        assert!(camera.radius > 0.0);
    }

    #[test]
    fn default_camera_sits_on_the_positive_z_axis() {
        let camera = OrbitCamera::default();
        let position = camera.position();

        assert!((position.x).abs() < 1e-6);
        assert!((position.y).abs() < 1e-6);
        assert!((position.z - 7.0).abs() < 1e-6);
    }
}
