// Sphere mesh generator
// Y is the polar axis; longitude 0 (u = 0) starts on +X.

pub const SPHERE_RADIUS: f32 = 1.0;
pub const SPHERE_SEGMENTS: usize = 100;

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

impl Vertex {
    const ATTRIBS: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x2];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SphereMesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

pub fn build_sphere(radius: f32, lat: usize, lon: usize) -> SphereMesh {
    let mut vertices = Vec::with_capacity((lat + 1) * (lon + 1));
    let mut indices = Vec::with_capacity(lat * lon * 6);

    for i in 0..=lat {
        let theta = std::f32::consts::PI * (i as f32) / (lat as f32);
        let y = radius * theta.cos();
        let sin_t = theta.sin();

        for j in 0..=lon {
            let phi = 2.0 * std::f32::consts::PI * (j as f32) / (lon as f32);

            let x = radius * phi.cos() * sin_t;
            let z = radius * phi.sin() * sin_t;

            // wgpu samples v = 0 at the top row, so the north pole gets v = 0
            // and image rows upload unflipped. u grows with phi, which reads
            // left-to-right from inside the sphere.
            let u = (j as f32) / (lon as f32);
            let v = (i as f32) / (lat as f32);

            vertices.push(Vertex {
                position: [x, y, z],
                uv: [u, v],
            });
        }
    }

    for i in 0..lat {
        for j in 0..lon {
            let a = (i * (lon + 1) + j) as u32;
            let b = a + (lon + 1) as u32;

            indices.extend_from_slice(&[
                a, b, a + 1,
                b, b + 1, a + 1,
            ]);
        }
    }

    SphereMesh { vertices, indices }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_and_index_counts() {
        let mesh = build_sphere(1.0, 4, 8);
        assert_eq!(mesh.vertices.len(), 5 * 9);
        assert_eq!(mesh.indices.len(), 4 * 8 * 6);
        let max = *mesh.indices.iter().max().unwrap() as usize;
        assert!(max < mesh.vertices.len());
    }

    #[test]
    fn vertices_lie_on_the_sphere() {
        let mesh = build_sphere(2.5, 10, 20);
        for v in &mesh.vertices {
            let [x, y, z] = v.position;
            let r = (x * x + y * y + z * z).sqrt();
            assert!((r - 2.5).abs() < 1e-4);
        }
    }

    #[test]
    fn north_pole_samples_top_row() {
        let mesh = build_sphere(1.0, 10, 20);
        let first = mesh.vertices[0];
        assert!((first.position[1] - 1.0).abs() < 1e-6);
        assert_eq!(first.uv[1], 0.0);
        let last = mesh.vertices[mesh.vertices.len() - 1];
        assert!((last.position[1] + 1.0).abs() < 1e-6);
        assert_eq!(last.uv[1], 1.0);
    }

    #[test]
    fn image_centre_column_is_on_negative_x() {
        let lat = 10;
        let lon = 20;
        let mesh = build_sphere(1.0, lat, lon);
        // equator row, middle column
        let v = mesh.vertices[(lat / 2) * (lon + 1) + lon / 2];
        assert!((v.uv[0] - 0.5).abs() < 1e-6);
        assert!((v.position[0] + 1.0).abs() < 1e-5);
        assert!(v.position[2].abs() < 1e-5);
    }
}
