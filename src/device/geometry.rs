use crate::{Device, MeshData, VertexAttribute, VertexAttributeKind, VertexLayout};
use js_sys::Error;
use zerocopy::{AsBytes, FromBytes};

#[repr(C)]
#[derive(AsBytes, FromBytes, Clone, Copy, Debug, Default)]
pub struct CubeVertex {
    pub position: [f32; 3],
}

impl VertexLayout for CubeVertex {
    fn vertex_layout() -> Vec<VertexAttribute> {
        vec![VertexAttribute {
            index: 0,
            offset: 0,
            kind: VertexAttributeKind::Float3,
        }]
    }
}

#[repr(C)]
#[derive(AsBytes, FromBytes, Clone, Copy, Debug, Default)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl VertexLayout for MeshVertex {
    fn vertex_layout() -> Vec<VertexAttribute> {
        vec![
            VertexAttribute {
                index: 0,
                offset: 0,
                kind: VertexAttributeKind::Float3,
            },
            VertexAttribute {
                index: 1,
                offset: 12,
                kind: VertexAttributeKind::Float3,
            },
            VertexAttribute {
                index: 2,
                offset: 24,
                kind: VertexAttributeKind::Float2,
            },
        ]
    }
}

/// Triangle list for a unit cube spanning [-1, 1] on every axis, used both as
/// the capture proxy and as the sky geometry.
pub static CUBE_VERTICES: [CubeVertex; 36] = cube_vertices();

const fn cube_vertices() -> [CubeVertex; 36] {
    const P: [[f32; 3]; 8] = [
        [-1.0, -1.0, -1.0],
        [1.0, -1.0, -1.0],
        [1.0, 1.0, -1.0],
        [-1.0, 1.0, -1.0],
        [-1.0, -1.0, 1.0],
        [1.0, -1.0, 1.0],
        [1.0, 1.0, 1.0],
        [-1.0, 1.0, 1.0],
    ];

    // two triangles per face
    const I: [usize; 36] = [
        0, 2, 1, 2, 0, 3, // -Z
        4, 5, 6, 6, 7, 4, // +Z
        0, 4, 7, 7, 3, 0, // -X
        1, 6, 5, 6, 1, 2, // +X
        3, 7, 6, 6, 2, 3, // +Y
        0, 1, 5, 5, 4, 0, // -Y
    ];

    let mut vertices = [CubeVertex {
        position: [0.0; 3],
    }; 36];

    let mut index = 0;

    while index < 36 {
        vertices[index] = CubeVertex {
            position: P[I[index]],
        };
        index += 1;
    }

    vertices
}

impl Device {
    pub(crate) fn update_geometry(&mut self, mesh: &MeshData) -> Result<(), Error> {
        if let Err(reason) = mesh.validate() {
            return Err(Error::new(reason));
        }

        let mut vertices = Vec::with_capacity(mesh.positions.len());

        for index in 0..mesh.positions.len() {
            vertices.push(MeshVertex {
                position: mesh.positions[index],
                normal: mesh.normals[index],
                uv: mesh.uvs[index],
            });
        }

        self.mesh_vertices.upload_indexed(&vertices, &mesh.indices);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_vertices_span_the_unit_cube() {
        for vertex in &CUBE_VERTICES {
            for &coordinate in &vertex.position {
                assert!(coordinate == 1.0 || coordinate == -1.0);
            }
        }
    }

    #[test]
    fn cube_triangles_face_outward() {
        for triangle in CUBE_VERTICES.chunks(3) {
            let [a, b, c] = [
                triangle[0].position,
                triangle[1].position,
                triangle[2].position,
            ];

            let u = [b[0] - a[0], b[1] - a[1], b[2] - a[2]];
            let v = [c[0] - a[0], c[1] - a[1], c[2] - a[2]];

            let normal = [
                u[1] * v[2] - u[2] * v[1],
                u[2] * v[0] - u[0] * v[2],
                u[0] * v[1] - u[1] * v[0],
            ];

            let centroid = [
                (a[0] + b[0] + c[0]) / 3.0,
                (a[1] + b[1] + c[1]) / 3.0,
                (a[2] + b[2] + c[2]) / 3.0,
            ];

            let outward: f32 = normal
                .iter()
                .zip(&centroid)
                .map(|(n, c)| n * c)
                .sum();

            assert!(outward > 0.0);
        }
    }
}
