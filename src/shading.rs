//! CPU reference implementation of the shading and environment math.
//!
//! These functions mirror the GLSL passes texel for texel and exist so the
//! numerical behavior of the pipeline can be validated natively, without a
//! WebGL context.

use crate::{CubeFace, EquirectImage};

/// Maps a unit direction to latitude-longitude panorama coordinates in [0, 1].
pub fn equirect_uv(direction: [f32; 3]) -> (f32, f32) {
    let [x, y, z] = direction;

    let u = z.atan2(x) * 0.1591 + 0.5;
    let v = y.asin() * 0.3183 + 0.5;

    (u, v)
}

pub fn distribution_ggx(n_dot_h: f32, roughness: f32) -> f32 {
    let a2 = (roughness * roughness).powi(2);
    let n_dot_h = n_dot_h.max(0.0);
    let denom = n_dot_h * n_dot_h * (a2 - 1.0) + 1.0;

    a2 / (std::f32::consts::PI * denom * denom)
}

pub fn geometry_schlick_ggx(n_dot_v: f32, roughness: f32) -> f32 {
    let r = roughness + 1.0;
    let k = r * r / 8.0;

    n_dot_v / (n_dot_v * (1.0 - k) + k)
}

pub fn geometry_smith(n_dot_v: f32, n_dot_l: f32, roughness: f32) -> f32 {
    geometry_schlick_ggx(n_dot_v.max(0.0), roughness) * geometry_schlick_ggx(n_dot_l.max(0.0), roughness)
}

pub fn fresnel_schlick(cos_theta: f32, f0: [f32; 3]) -> [f32; 3] {
    let weight = (1.0 - cos_theta).max(0.0).min(1.0).powi(5);

    [
        f0[0] + (1.0 - f0[0]) * weight,
        f0[1] + (1.0 - f0[1]) * weight,
        f0[2] + (1.0 - f0[2]) * weight,
    ]
}

/// Reinhard tone mapping followed by gamma encoding at 2.2.
pub fn tonemap(channel: f32) -> f32 {
    (channel / (channel + 1.0)).powf(1.0 / 2.2)
}

fn normalize(v: [f32; 3]) -> [f32; 3] {
    let length = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();

    [v[0] / length, v[1] / length, v[2] / length]
}

/// A floating-point cube map held in CPU memory, one RGB triple per texel.
///
/// Face order and texel orientation follow the GL cube map convention, so
/// results are directly comparable with what the GPU passes produce.
#[derive(Clone, Debug)]
pub struct CubeImage {
    pub face_size: usize,
    pub faces: [Vec<[f32; 3]>; 6],
}

impl CubeImage {
    pub fn constant(face_size: usize, value: [f32; 3]) -> Self {
        let face = vec![value; face_size * face_size];

        Self {
            face_size,
            faces: [
                face.clone(),
                face.clone(),
                face.clone(),
                face.clone(),
                face.clone(),
                face,
            ],
        }
    }

    /// Direction through the center of a face texel, not normalized.
    pub fn texel_direction(face: CubeFace, x: usize, y: usize, face_size: usize) -> [f32; 3] {
        let u = 2.0 * (x as f32 + 0.5) / face_size as f32 - 1.0;
        let v = 2.0 * (y as f32 + 0.5) / face_size as f32 - 1.0;

        match face {
            CubeFace::PositiveX => [1.0, -v, -u],
            CubeFace::NegativeX => [-1.0, -v, u],
            CubeFace::PositiveY => [u, 1.0, v],
            CubeFace::NegativeY => [u, -1.0, -v],
            CubeFace::PositiveZ => [u, -v, 1.0],
            CubeFace::NegativeZ => [-u, -v, -1.0],
        }
    }

    /// Projects an equirectangular panorama onto a cube of the given size.
    pub fn project(equirect: &EquirectImage, face_size: usize) -> Self {
        let mut cube = Self::constant(face_size, [0.0; 3]);

        for &face in &CubeFace::ALL {
            for y in 0..face_size {
                for x in 0..face_size {
                    let direction = normalize(Self::texel_direction(face, x, y, face_size));
                    let (u, v) = equirect_uv(direction);

                    let px = ((u * equirect.width as f32) as usize).min(equirect.width - 1);
                    let py = ((v * equirect.height as f32) as usize).min(equirect.height - 1);

                    cube.faces[face.index()][y * face_size + x] = equirect.pixel(px, py);
                }
            }
        }

        cube
    }

    /// Looks up the texel nearest to the given direction.
    pub fn sample(&self, direction: [f32; 3]) -> [f32; 3] {
        let [x, y, z] = direction;
        let (ax, ay, az) = (x.abs(), y.abs(), z.abs());

        let (face, u, v) = if ax >= ay && ax >= az {
            if x > 0.0 {
                (CubeFace::PositiveX, -z / ax, -y / ax)
            } else {
                (CubeFace::NegativeX, z / ax, -y / ax)
            }
        } else if ay >= az {
            if y > 0.0 {
                (CubeFace::PositiveY, x / ay, z / ay)
            } else {
                (CubeFace::NegativeY, x / ay, -z / ay)
            }
        } else if z > 0.0 {
            (CubeFace::PositiveZ, x / az, -y / az)
        } else {
            (CubeFace::NegativeZ, -x / az, -y / az)
        };

        let size = self.face_size as f32;

        let px = (((u + 1.0) * 0.5 * size) as usize).min(self.face_size - 1);
        let py = (((v + 1.0) * 0.5 * size) as usize).min(self.face_size - 1);

        self.faces[face.index()][py * self.face_size + px]
    }

    /// Convolves this cube map into a diffuse irradiance cube map.
    pub fn convolve(&self, face_size: usize, sample_delta: f32) -> Self {
        let mut output = Self::constant(face_size, [0.0; 3]);

        for &face in &CubeFace::ALL {
            for y in 0..face_size {
                for x in 0..face_size {
                    let normal = normalize(Self::texel_direction(face, x, y, face_size));

                    output.faces[face.index()][y * face_size + x] =
                        self.convolve_direction(normal, sample_delta);
                }
            }
        }

        output
    }

    /// Integrates incoming radiance over the hemisphere around one normal,
    /// weighted by the projected solid angle.
    pub fn convolve_direction(&self, normal: [f32; 3], sample_delta: f32) -> [f32; 3] {
        // tangent frame; fall back to the Z axis near the poles
        let up = if normal[1].abs() < 0.999 {
            [0.0, 1.0, 0.0]
        } else {
            [0.0, 0.0, 1.0]
        };

        let right = normalize(cross(up, normal));
        let up = normalize(cross(normal, right));

        let mut irradiance = [0.0f32; 3];
        let mut sample_count = 0.0f32;

        let mut phi = 0.0;

        while phi < 2.0 * std::f32::consts::PI {
            let mut theta = 0.0;

            while theta < 0.5 * std::f32::consts::PI {
                let tangent = [
                    theta.sin() * phi.cos(),
                    theta.sin() * phi.sin(),
                    theta.cos(),
                ];

                let direction = [
                    tangent[0] * right[0] + tangent[1] * up[0] + tangent[2] * normal[0],
                    tangent[0] * right[1] + tangent[1] * up[1] + tangent[2] * normal[1],
                    tangent[0] * right[2] + tangent[1] * up[2] + tangent[2] * normal[2],
                ];

                let radiance = self.sample(direction);
                let weight = theta.cos() * theta.sin();

                irradiance[0] += radiance[0] * weight;
                irradiance[1] += radiance[1] * weight;
                irradiance[2] += radiance[2] * weight;
                sample_count += 1.0;

                theta += sample_delta;
            }

            phi += sample_delta;
        }

        let scale = std::f32::consts::PI / sample_count;

        [
            irradiance[0] * scale,
            irradiance[1] * scale,
            irradiance[2] * scale,
        ]
    }
}

fn cross(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn equirect_uv_covers_the_cardinal_directions() {
        let (u, v) = equirect_uv([1.0, 0.0, 0.0]);
        assert!((u - 0.5).abs() < 1e-4 && (v - 0.5).abs() < 1e-4);

        let (_, v) = equirect_uv([0.0, 1.0, 0.0]);
        assert!((v - 1.0).abs() < 1e-3);

        let (_, v) = equirect_uv([0.0, -1.0, 0.0]);
        assert!(v.abs() < 1e-3);

        let (u, _) = equirect_uv([0.0, 0.0, 1.0]);
        assert!((u - 0.75).abs() < 1e-3);
    }

    #[test]
    fn ggx_distribution_peaks_at_the_normal() {
        let at_normal = distribution_ggx(1.0, 0.4);
        let off_normal = distribution_ggx(0.7, 0.4);

        assert!(at_normal > off_normal);
        assert!(off_normal > 0.0);
    }

    #[test]
    fn ggx_distribution_is_finite_over_its_domain() {
        for roughness_step in 1..=20 {
            let roughness = roughness_step as f32 / 20.0;

            for cos_step in 0..=20 {
                let n_dot_h = cos_step as f32 / 20.0;

                assert!(distribution_ggx(n_dot_h, roughness).is_finite());
            }
        }
    }

    #[test]
    fn smith_geometry_vanishes_at_grazing_incidence() {
        for &roughness in &[0.1, 0.5, 1.0] {
            assert_eq!(geometry_smith(0.0, 0.5, roughness), 0.0);
            assert_eq!(geometry_smith(0.5, 0.0, roughness), 0.0);
        }
    }

    #[test]
    fn smith_geometry_stays_in_unit_range() {
        for &(n_dot_v, n_dot_l, roughness) in &[
            (1.0, 1.0, 0.0),
            (0.5, 0.5, 0.5),
            (0.1, 0.9, 1.0),
            (0.01, 0.01, 0.2),
        ] {
            let g = geometry_smith(n_dot_v, n_dot_l, roughness);

            assert!(g >= 0.0 && g <= 1.0, "geometry term {} out of range", g);
        }
    }

    #[test]
    fn fresnel_interpolates_between_f0_and_one() {
        for &f0 in &[[0.04, 0.04, 0.04], [1.0, 0.5, 0.5], [0.0, 0.0, 0.0]] {
            let head_on = fresnel_schlick(1.0, f0);

            for channel in 0..3 {
                assert!((head_on[channel] - f0[channel]).abs() < 1e-6);
            }

            let grazing = fresnel_schlick(0.0, f0);

            for channel in 0..3 {
                assert!((grazing[channel] - 1.0).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn tonemap_is_monotonic_and_bounded() {
        assert_eq!(tonemap(0.0), 0.0);

        let mut previous = -1.0;

        for step in 0..100 {
            let mapped = tonemap(step as f32 * 10.0);

            assert!(mapped >= previous);
            assert!(mapped < 1.0);

            previous = mapped;
        }
    }

    #[test]
    fn texel_directions_map_back_to_their_own_texel() {
        let size = 16;
        let mut cube = CubeImage::constant(size, [0.0; 3]);

        for &face in &CubeFace::ALL {
            for y in 0..size {
                for x in 0..size {
                    cube.faces[face.index()][y * size + x] =
                        [face.index() as f32, x as f32, y as f32];
                }
            }
        }

        for &face in &CubeFace::ALL {
            for y in 0..size {
                for x in 0..size {
                    let direction = CubeImage::texel_direction(face, x, y, size);
                    let value = cube.sample(direction);

                    assert_eq!(value, [face.index() as f32, x as f32, y as f32]);
                }
            }
        }
    }

    #[test]
    fn sampling_covers_the_whole_sphere() {
        let cube = CubeImage::constant(8, [0.25, 0.5, 0.75]);
        let mut rng = rand::thread_rng();

        for _ in 0..10000 {
            let z: f32 = rng.gen_range(-1.0, 1.0);
            let phi: f32 = rng.gen_range(0.0, 2.0 * std::f32::consts::PI);
            let r = (1.0 - z * z).sqrt();

            let direction = [r * phi.cos(), z, r * phi.sin()];

            let (u, v) = equirect_uv(direction);

            assert!(u.is_finite() && u >= 0.0 && u <= 1.0);
            assert!(v.is_finite() && v >= 0.0 && v <= 1.0);

            assert_eq!(cube.sample(direction), [0.25, 0.5, 0.75]);
        }
    }

    #[test]
    fn projecting_a_uniform_panorama_gives_a_uniform_cube() {
        let equirect = EquirectImage::new(32, 16, vec![0.5; 32 * 16 * 3]);
        let cube = CubeImage::project(&equirect, 16);

        for face in &cube.faces {
            for texel in face {
                assert_eq!(*texel, [0.5, 0.5, 0.5]);
            }
        }
    }

    #[test]
    fn convolving_a_uniform_cube_preserves_its_radiance() {
        // constant incoming radiance L integrates back to L
        let cube = CubeImage::constant(8, [0.5, 0.5, 0.5]);
        let irradiance = cube.convolve(4, 0.1);

        for face in &irradiance.faces {
            for texel in face {
                for channel in texel {
                    assert!(
                        (channel - 0.5).abs() < 0.01,
                        "irradiance {} deviates from 0.5",
                        channel
                    );
                }
            }
        }
    }

    #[test]
    fn convolution_is_well_defined_at_the_poles() {
        let cube = CubeImage::constant(8, [0.5, 0.5, 0.5]);

        for &pole in &[[0.0, 1.0, 0.0], [0.0, -1.0, 0.0]] {
            let irradiance = cube.convolve_direction(pole, 0.025);

            for channel in &irradiance {
                assert!(channel.is_finite());
                assert!((channel - 0.5).abs() / 0.5 < 0.01);
            }
        }
    }
}
