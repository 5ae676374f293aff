//! End-to-end checks of the environment pipeline math on the CPU.

use solstice::{CubeFace, CubeImage, EquirectImage, SAMPLE_DELTA};

fn gradient_panorama(width: usize, height: usize) -> EquirectImage {
    let mut pixels = Vec::with_capacity(3 * width * height);

    for y in 0..height {
        // the up direction maps to v = 1, which samples the last row
        let value = y as f32 / (height - 1) as f32;

        for _ in 0..width {
            pixels.extend_from_slice(&[value, value, value]);
        }
    }

    EquirectImage::new(width, height, pixels)
}

#[test]
fn uniform_environment_survives_projection_and_convolution() {
    let panorama = EquirectImage::new(64, 32, vec![0.5; 64 * 32 * 3]);

    let cube = CubeImage::project(&panorama, 16);

    for face in &cube.faces {
        for texel in face {
            assert_eq!(*texel, [0.5, 0.5, 0.5]);
        }
    }

    let irradiance = cube.convolve(8, SAMPLE_DELTA);

    for face in &irradiance.faces {
        for texel in face {
            for channel in texel {
                assert!(
                    (channel - 0.5).abs() < 0.01,
                    "uniform irradiance drifted to {}",
                    channel
                );
            }
        }
    }
}

#[test]
fn irradiance_follows_the_dominant_light_direction() {
    let panorama = gradient_panorama(64, 32);
    let cube = CubeImage::project(&panorama, 16);
    let irradiance = cube.convolve(4, 0.05);

    let size = irradiance.face_size;
    let center = size / 2;

    let up = irradiance.faces[CubeFace::PositiveY.index()][center * size + center][0];
    let down = irradiance.faces[CubeFace::NegativeY.index()][center * size + center][0];

    assert!(
        up > down,
        "irradiance towards the bright pole ({}) should exceed the dark pole ({})",
        up,
        down
    );

    // a side face should land strictly between the two poles
    let side = irradiance.faces[CubeFace::PositiveX.index()][center * size + center][0];

    assert!(side > down && side < up);
}

#[test]
fn convolution_output_is_smoother_than_its_input() {
    let panorama = gradient_panorama(64, 32);
    let cube = CubeImage::project(&panorama, 16);
    let irradiance = cube.convolve(4, 0.05);

    let spread = |image: &CubeImage| {
        let mut min = std::f32::MAX;
        let mut max = std::f32::MIN;

        for face in &image.faces {
            for texel in face {
                min = min.min(texel[0]);
                max = max.max(texel[0]);
            }
        }

        max - min
    };

    assert!(spread(&irradiance) < spread(&cube));
}
