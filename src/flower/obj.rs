use std::fmt::Write as _;

use crate::flower::mesh::FlowerMesh;

/// Serializes the mesh to Wavefront OBJ text: `v` positions, `vn` normals,
/// `f v//vn` faces with 1-based indices. If normals were never computed the
/// faces reference positions only.
pub fn export_obj(mesh: &FlowerMesh) -> String {
    let mut out = String::with_capacity(mesh.positions.len() * 12);
    out.push_str("o flower\n");

    for p in mesh.positions.chunks_exact(3) {
        let _ = writeln!(out, "v {} {} {}", p[0], p[1], p[2]);
    }
    for n in mesh.normals.chunks_exact(3) {
        let _ = writeln!(out, "vn {} {} {}", n[0], n[1], n[2]);
    }

    let with_normals = !mesh.normals.is_empty();
    for tri in mesh.indices.chunks_exact(3) {
        let (a, b, c) = (tri[0] + 1, tri[1] + 1, tri[2] + 1);
        let _ = if with_normals {
            writeln!(out, "f {a}//{a} {b}//{b} {c}//{c}")
        } else {
            writeln!(out, "f {a} {b} {c}")
        };
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flower::generator::generate;
    use crate::flower::params::Rgb;
    use crate::flower::presets::PRESETS;

    #[test]
    fn obj_structure_matches_mesh() {
        let mut params = PRESETS[0].params;
        params.vertical_resolution = 4;
        params.radial_resolution = 6;
        let mut mesh =
            generate(&params, Rgb::new(255, 0, 0), Rgb::new(0, 0, 255)).unwrap();
        mesh.compute_vertex_normals();

        let obj = export_obj(&mesh);
        let v = obj.lines().filter(|l| l.starts_with("v ")).count();
        let vn = obj.lines().filter(|l| l.starts_with("vn ")).count();
        let f = obj.lines().filter(|l| l.starts_with("f ")).count();

        assert_eq!(v, mesh.vertex_count());
        assert_eq!(vn, mesh.vertex_count());
        assert_eq!(f, mesh.triangle_count());
    }

    #[test]
    fn face_indices_are_one_based() {
        let mesh = FlowerMesh {
            positions: vec![0.0; 9],
            colors: vec![0.0; 9],
            normals: Vec::new(),
            indices: vec![0, 1, 2],
        };
        let obj = export_obj(&mesh);
        assert!(obj.contains("f 1 2 3"));
        assert!(!obj.contains("f 0"));
    }
}
