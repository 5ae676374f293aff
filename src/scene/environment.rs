use serde::{Deserialize, Serialize};

/// An equirectangular panorama with three radiance channels per pixel.
///
/// Pixel (0, 0) is the top-left corner of the panorama; rows are stored
/// top to bottom as RGB triples of linear radiance values.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct EquirectImage {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<f32>,
}

impl EquirectImage {
    pub fn new(width: usize, height: usize, pixels: Vec<f32>) -> Self {
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn validate(&self) -> Result<(), &'static str> {
        if self.width == 0 || self.height == 0 {
            return Err("environment map has zero dimension");
        }

        if self.pixels.len() != 3 * self.width * self.height {
            return Err("environment map pixel count mismatch");
        }

        if !self.pixels.iter().all(|&value| value.is_finite()) {
            return Err("environment map contains non-finite radiance");
        }

        if self.pixels.iter().any(|&value| value < 0.0) {
            return Err("environment map contains negative radiance");
        }

        Ok(())
    }

    pub fn pixel(&self, x: usize, y: usize) -> [f32; 3] {
        let index = 3 * (y * self.width + x);

        [
            self.pixels[index],
            self.pixels[index + 1],
            self.pixels[index + 2],
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_truncated_pixel_data() {
        let image = EquirectImage::new(4, 2, vec![0.5; 23]);

        assert!(image.validate().is_err());
    }

    #[test]
    fn rejects_non_finite_radiance() {
        let mut pixels = vec![0.5; 24];
        pixels[7] = std::f32::NAN;

        assert!(EquirectImage::new(4, 2, pixels).validate().is_err());
    }

    #[test]
    fn accepts_a_well_formed_image() {
        let image = EquirectImage::new(4, 2, vec![0.5; 24]);

        assert!(image.validate().is_ok());
        assert_eq!(image.pixel(3, 1), [0.5, 0.5, 0.5]);
    }
}
