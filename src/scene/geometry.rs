use serde::{Deserialize, Serialize};

/// An indexed triangle mesh with per-vertex normals and texture coordinates.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct MeshData {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub indices: Vec<u16>,
}

impl MeshData {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.positions.is_empty() {
            return Err("mesh has no vertices");
        }

        if self.positions.len() > u16::max_value() as usize + 1 {
            return Err("mesh exceeds 16-bit index range");
        }

        if self.normals.len() != self.positions.len() || self.uvs.len() != self.positions.len() {
            return Err("mesh vertex attribute counts mismatch");
        }

        if self.indices.len() % 3 != 0 {
            return Err("mesh index count is not a multiple of three");
        }

        let count = self.positions.len();

        if self.indices.iter().any(|&index| index as usize >= count) {
            return Err("mesh index out of range");
        }

        Ok(())
    }

    /// Generates a unit UV sphere centered at the origin.
    ///
    /// Vertex normals equal the positions and texture coordinates follow the
    /// latitude-longitude parametrization.
    pub fn uv_sphere(width_segments: usize, height_segments: usize) -> Self {
        let mut positions = Vec::with_capacity((width_segments + 1) * (height_segments + 1));
        let mut normals = Vec::with_capacity(positions.capacity());
        let mut uvs = Vec::with_capacity(positions.capacity());

        for y in 0..=height_segments {
            let v = y as f32 / height_segments as f32;
            let phi = v * std::f32::consts::PI;

            for x in 0..=width_segments {
                let u = x as f32 / width_segments as f32;
                let theta = u * 2.0 * std::f32::consts::PI;

                let position = [
                    theta.cos() * phi.sin(),
                    phi.cos(),
                    theta.sin() * phi.sin(),
                ];

                positions.push(position);
                normals.push(position);
                uvs.push([u, v]);
            }
        }

        let mut indices = Vec::with_capacity(6 * width_segments * height_segments);

        for y in 0..height_segments {
            for x in 0..width_segments {
                let a = (y * (width_segments + 1) + x) as u16;
                let b = ((y + 1) * (width_segments + 1) + x) as u16;
                let c = a + 1;
                let d = b + 1;

                indices.extend_from_slice(&[a, b, d]);
                indices.extend_from_slice(&[d, c, a]);
            }
        }

        Self {
            positions,
            normals,
            uvs,
            indices,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uv_sphere_is_a_valid_unit_mesh() {
        let sphere = MeshData::uv_sphere(64, 64);

        assert!(sphere.validate().is_ok());
        assert_eq!(sphere.positions.len(), 65 * 65);
        assert_eq!(sphere.indices.len(), 6 * 64 * 64);

        for position in &sphere.positions {
            let length_sq: f32 = position.iter().map(|c| c * c).sum();

            assert!((length_sq - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn validate_rejects_out_of_range_indices() {
        let mesh = MeshData {
            positions: vec![[0.0; 3]; 3],
            normals: vec![[0.0; 3]; 3],
            uvs: vec![[0.0; 2]; 3],
            indices: vec![0, 1, 3],
        };

        assert!(mesh.validate().is_err());
    }
}
