use glam::Vec3;

/// CPU-side mesh buffers, three floats per vertex in `positions`, `colors`
/// and `normals`, row-major `theta * radial + phi` ordering. Rebuilt whole
/// on every parameter change and swapped in as a unit, never patched.
#[derive(Clone, Debug, Default)]
pub struct FlowerMesh {
    pub positions: Vec<f32>,
    pub colors: Vec<f32>,
    pub normals: Vec<f32>,
    pub indices: Vec<u32>,
}

impl FlowerMesh {
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Smooth vertex normals: accumulate the (area-weighted) face normal of
    /// every triangle into its three corners, then normalize. Degenerate
    /// triangles contribute a zero vector and fall out on their own; a
    /// vertex that ends up with no usable normal gets +Z.
    pub fn compute_vertex_normals(&mut self) {
        let mut normals = vec![Vec3::ZERO; self.vertex_count()];

        for tri in self.indices.chunks_exact(3) {
            let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
            let pa = Vec3::from_slice(&self.positions[a * 3..a * 3 + 3]);
            let pb = Vec3::from_slice(&self.positions[b * 3..b * 3 + 3]);
            let pc = Vec3::from_slice(&self.positions[c * 3..c * 3 + 3]);

            let face = (pb - pa).cross(pc - pa);
            normals[a] += face;
            normals[b] += face;
            normals[c] += face;
        }

        self.normals.clear();
        self.normals.reserve(normals.len() * 3);
        for n in normals {
            let n = n.try_normalize().unwrap_or(Vec3::Z);
            self.normals.extend_from_slice(&n.to_array());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normals_are_unit_length_and_parallel_to_buffers() {
        // One upward-facing quad in the XY plane.
        let mut mesh = FlowerMesh {
            positions: vec![
                0.0, 0.0, 0.0, //
                1.0, 0.0, 0.0, //
                1.0, 1.0, 0.0, //
                0.0, 1.0, 0.0,
            ],
            colors: vec![0.0; 12],
            normals: Vec::new(),
            indices: vec![0, 1, 2, 0, 2, 3],
        };
        mesh.compute_vertex_normals();

        assert_eq!(mesh.normals.len(), mesh.positions.len());
        for n in mesh.normals.chunks_exact(3) {
            let v = Vec3::new(n[0], n[1], n[2]);
            assert!((v.length() - 1.0).abs() < 1e-5);
            // CCW winding in the XY plane faces +Z.
            assert!(v.z > 0.99);
        }
    }

    #[test]
    fn unreferenced_vertex_gets_fallback_normal() {
        let mut mesh = FlowerMesh {
            positions: vec![0.0, 0.0, 0.0],
            colors: vec![0.0; 3],
            normals: Vec::new(),
            indices: Vec::new(),
        };
        mesh.compute_vertex_normals();
        assert_eq!(mesh.normals, vec![0.0, 0.0, 1.0]);
    }
}
