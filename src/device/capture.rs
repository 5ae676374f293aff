use crate::CubeFace;
use cgmath::{perspective, Deg, Matrix4, Point3, Vector3};

/// Look-at basis used to render one cube face from the origin.
///
/// The bases are plain data so the capture orientation for every face can be
/// inspected and tested without touching any matrix code.
#[derive(Clone, Copy, Debug)]
pub struct CaptureBasis {
    pub face: CubeFace,
    pub center: [f32; 3],
    pub up: [f32; 3],
}

pub static CAPTURE_BASES: [CaptureBasis; 6] = [
    CaptureBasis {
        face: CubeFace::PositiveX,
        center: [1.0, 0.0, 0.0],
        up: [0.0, -1.0, 0.0],
    },
    CaptureBasis {
        face: CubeFace::NegativeX,
        center: [-1.0, 0.0, 0.0],
        up: [0.0, -1.0, 0.0],
    },
    CaptureBasis {
        face: CubeFace::PositiveY,
        center: [0.0, 1.0, 0.0],
        up: [0.0, 0.0, 1.0],
    },
    CaptureBasis {
        face: CubeFace::NegativeY,
        center: [0.0, -1.0, 0.0],
        up: [0.0, 0.0, -1.0],
    },
    CaptureBasis {
        face: CubeFace::PositiveZ,
        center: [0.0, 0.0, 1.0],
        up: [0.0, -1.0, 0.0],
    },
    CaptureBasis {
        face: CubeFace::NegativeZ,
        center: [0.0, 0.0, -1.0],
        up: [0.0, -1.0, 0.0],
    },
];

impl CaptureBasis {
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at(
            Point3::new(0.0, 0.0, 0.0),
            Point3::from(self.center),
            Vector3::from(self.up),
        )
    }
}

/// Projection shared by all capture passes: a square 90 degree frustum, so the
/// six views exactly tile the sphere.
pub fn capture_projection() -> Matrix4<f32> {
    perspective(Deg(90.0), 1.0, 0.1, 10.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::prelude::*;

    fn dot(a: [f32; 3], b: [f32; 3]) -> f32 {
        a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
    }

    #[test]
    fn bases_cover_each_face_exactly_once() {
        for (index, basis) in CAPTURE_BASES.iter().enumerate() {
            assert_eq!(basis.face.index(), index);
        }
    }

    #[test]
    fn each_basis_forms_an_orthonormal_frame() {
        for basis in &CAPTURE_BASES {
            let forward = basis.center;
            let up = basis.up;
            let right = [
                forward[1] * up[2] - forward[2] * up[1],
                forward[2] * up[0] - forward[0] * up[2],
                forward[0] * up[1] - forward[1] * up[0],
            ];

            assert!((dot(forward, forward) - 1.0).abs() < 1e-5);
            assert!((dot(up, up) - 1.0).abs() < 1e-5);
            assert!((dot(right, right) - 1.0).abs() < 1e-5);

            assert!(dot(forward, up).abs() < 1e-5);
            assert!(dot(forward, right).abs() < 1e-5);
            assert!(dot(up, right).abs() < 1e-5);
        }
    }

    #[test]
    fn view_matrices_keep_the_origin_fixed() {
        for basis in &CAPTURE_BASES {
            let view = basis.view_matrix();
            let origin = view.transform_point(Point3::new(0.0, 0.0, 0.0));

            assert!(origin.to_vec().magnitude() < 1e-6);
        }
    }

    #[test]
    fn view_matrices_look_down_their_face_axis() {
        for basis in &CAPTURE_BASES {
            let view = basis.view_matrix();
            let forward = view.transform_vector(Vector3::from(basis.center));

            // look-at maps the view direction onto the negative Z axis
            assert!((forward.x).abs() < 1e-6);
            assert!((forward.y).abs() < 1e-6);
            assert!((forward.z + 1.0).abs() < 1e-6);
        }
    }
}
