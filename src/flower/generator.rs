use std::f64::consts::TAU;

use crate::flower::mesh::FlowerMesh;
use crate::flower::params::{FlowerParams, ParamError, Rgb};

/// Builds the full flower mesh: vertex field, color field and triangle
/// indices. Pure and deterministic; the same inputs always produce
/// byte-identical buffers. Normals are left empty, the viewer derives them
/// with [`FlowerMesh::compute_vertex_normals`] after the swap.
pub fn generate(params: &FlowerParams, color1: Rgb, color2: Rgb) -> Result<FlowerMesh, ParamError> {
    params.validate()?;

    let (positions, colors) = vertex_field(params, color1, color2);
    let indices = triangulate(params.vertical_resolution, params.radial_resolution);

    Ok(FlowerMesh {
        positions,
        colors,
        normals: Vec::new(),
        indices,
    })
}

/// Position and color per grid cell `(theta, phi)`, row-major with theta as
/// the outer loop. Math in f64, stored as f32 for the GPU.
fn vertex_field(params: &FlowerParams, color1: Rgb, color2: Rgb) -> (Vec<f32>, Vec<f32>) {
    let vertical = params.vertical_resolution as usize;
    let radial = params.radial_resolution as usize;

    let mut positions = Vec::with_capacity(vertical * radial * 3);
    let mut colors = Vec::with_capacity(vertical * radial * 3);

    let c1 = color1.channels_f32();
    let c2 = color2.channels_f32();

    for theta in 0..vertical {
        // Color ramps from color1 at the pole toward color2 at the rim; the
        // rim ring sits at t = (n-1)/n and never quite reaches color2.
        let t = theta as f32 / vertical as f32;
        let color = [
            c1[0] + (c2[0] - c1[0]) * t,
            c1[1] + (c2[1] - c1[1]) * t,
            c1[2] + (c2[2] - c1[2]) * t,
        ];

        for phi in 0..radial {
            let normalized_phi = phi as f64 / radial as f64 * TAU;

            // Lobed radial profile: petal_number bulges around the circle,
            // sharpness pinches them, |sin| keeps the base non-negative.
            let lobe = (normalized_phi * params.petal_number / 2.0)
                .sin()
                .abs()
                .powf(params.petal_sharpness);
            let radial_extent = params.petal_length * lobe + params.diameter;

            // Grows linearly from the pole (theta = 0 collapses to r = 0).
            let r = radial_extent * theta as f64 / vertical as f64;

            let x = r * normalized_phi.cos();
            let y = r * normalized_phi.sin();
            let z = v_shape(params.height, r / 100.0, params.curvature1, params.curvature2)
                - 200.0
                + perturbation(params.bumpiness, r / 100.0, params.bump_number, normalized_phi);

            positions.extend_from_slice(&[x as f32, y as f32, z as f32]);
            colors.extend_from_slice(&color);
        }
    }

    (positions, colors)
}

/// Vertical profile: an amplitude-`a` bump that decays exponentially with
/// radius (rate `b`) and whose steepness near the origin is set by the
/// exponent `exp`.
fn v_shape(a: f64, r: f64, exp: f64, b: f64) -> f64 {
    a * (-b * r.abs().powf(1.5)).exp() * r.abs().powf(exp)
}

/// Periodic surface ripple with `lobes` bumps around the circle, amplitude
/// growing with the squared radius.
fn perturbation(a: f64, r: f64, lobes: f64, angle: f64) -> f64 {
    1.0 + a * r * r * (lobes * angle).sin()
}

/// Triangle index buffer over the `vertical x radial` vertex grid: two
/// triangles per quad between consecutive rings, plus the pair that closes
/// the wrap-around seam of every ring. The top ring is left open. A pure
/// function of the two resolutions.
pub fn triangulate(vertical: u32, radial: u32) -> Vec<u32> {
    if vertical < 2 || radial < 1 {
        return Vec::new();
    }

    let idx = |theta: u32, phi: u32| theta * radial + phi;
    let mut indices =
        Vec::with_capacity((vertical as usize - 1) * radial as usize * 6);

    for theta in 0..vertical - 1 {
        for phi in 0..radial - 1 {
            let v1 = idx(theta, phi);
            let v2 = idx(theta + 1, phi);
            let v3 = idx(theta + 1, phi + 1);
            let v4 = idx(theta, phi + 1);

            indices.extend_from_slice(&[v1, v2, v3]);
            indices.extend_from_slice(&[v1, v3, v4]);
        }

        // Seam: join the last column back to column 0.
        let last = radial - 1;
        indices.extend_from_slice(&[idx(theta, last), idx(theta + 1, last), idx(theta, 0)]);
        indices.extend_from_slice(&[idx(theta + 1, last), idx(theta, 0), idx(theta + 1, 0)]);
    }

    indices
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(vertical: u32, radial: u32) -> FlowerParams {
        FlowerParams {
            vertical_resolution: vertical,
            radial_resolution: radial,
            petal_number: 5.0,
            petal_length: 200.0,
            diameter: 60.0,
            petal_sharpness: 0.4,
            height: 300.0,
            curvature1: 0.8,
            curvature2: 0.2,
            bumpiness: 2.5,
            bump_number: 12.0,
        }
    }

    const WHITE: Rgb = Rgb::new(255, 255, 255);
    const BLACK: Rgb = Rgb::new(0, 0, 0);

    #[test]
    fn buffer_lengths_match_grid() {
        let p = params(12, 40);
        let mesh = generate(&p, WHITE, BLACK).unwrap();
        assert_eq!(mesh.positions.len(), 12 * 40 * 3);
        assert_eq!(mesh.colors.len(), mesh.positions.len());
        assert_eq!(mesh.indices.len(), (12 - 1) * 40 * 6);
    }

    #[test]
    fn indices_stay_in_range() {
        let p = params(7, 13);
        let mesh = generate(&p, WHITE, BLACK).unwrap();
        let max = (7 * 13) as u32;
        assert!(mesh.indices.iter().all(|&i| i < max));
    }

    #[test]
    fn seam_is_closed_on_every_ring() {
        let p = params(5, 9);
        let mesh = generate(&p, WHITE, BLACK).unwrap();
        let radial = 9u32;
        for theta in 0..4u32 {
            let last = theta * radial + (radial - 1);
            let first = theta * radial;
            let joined = mesh
                .indices
                .chunks_exact(3)
                .any(|tri| tri.contains(&last) && tri.contains(&first));
            assert!(joined, "ring {theta} has an open seam");
        }
    }

    #[test]
    fn top_ring_is_left_open() {
        let p = params(5, 9);
        let mesh = generate(&p, WHITE, BLACK).unwrap();
        // No triangle may span upward from the last ring.
        let top_start = 4 * 9u32;
        for tri in mesh.indices.chunks_exact(3) {
            assert!(
                !tri.iter().all(|&i| i >= top_start),
                "triangle {tri:?} lies entirely in the open top ring"
            );
        }
    }

    #[test]
    fn pole_ring_collapses_to_origin() {
        let mut p = params(20, 64);
        p.petal_length = -150.0; // still collapses for inverted lobes
        let mesh = generate(&p, WHITE, BLACK).unwrap();
        for phi in 0..64 {
            let base = phi * 3;
            assert_eq!(mesh.positions[base], 0.0);
            assert_eq!(mesh.positions[base + 1], 0.0);
        }
    }

    #[test]
    fn color_lerp_covers_pole_but_not_color2() {
        let p = params(10, 8);
        let c1 = Rgb::new(0x64, 0x95, 0xed);
        let c2 = Rgb::new(0x00, 0xff, 0xff);
        let mesh = generate(&p, c1, c2).unwrap();

        // theta = 0 is exactly color1.
        let f1 = c1.channels_f32();
        assert_eq!(&mesh.colors[0..3], &f1);

        // The top ring sits at t = 9/10, strictly short of color2.
        let t = 9.0f32 / 10.0;
        let top = (10 - 1) * 8 * 3;
        let f2 = c2.channels_f32();
        for ch in 0..3 {
            let expected = f1[ch] + (f2[ch] - f1[ch]) * t;
            assert_eq!(mesh.colors[top + ch], expected);
            assert_ne!(mesh.colors[top + ch], f2[ch]);
        }
    }

    #[test]
    fn generation_is_deterministic() {
        let p = params(30, 90);
        let a = generate(&p, WHITE, BLACK).unwrap();
        let b = generate(&p, WHITE, BLACK).unwrap();
        assert_eq!(a.positions, b.positions);
        assert_eq!(a.colors, b.colors);
        assert_eq!(a.indices, b.indices);
    }

    #[test]
    fn disc_fixture_two_rings_four_spokes() {
        // petal_length = 0 and sharpness = 1 reduce the radial profile to a
        // plain circle of radius `diameter`; height = 0 and bumpiness = 0
        // reduce the height terms to the constants 0 and 1.
        let p = FlowerParams {
            vertical_resolution: 2,
            radial_resolution: 4,
            petal_number: 1.0,
            petal_length: 0.0,
            diameter: 100.0,
            petal_sharpness: 1.0,
            height: 0.0,
            curvature1: 1.0,
            curvature2: 0.0,
            bumpiness: 0.0,
            bump_number: 0.0,
        };
        let mesh = generate(&p, WHITE, BLACK).unwrap();

        // Ring 1: radius diameter * theta / vertical = 100 * 1/2 = 50,
        // spaced 90 degrees apart, z = 0 - 200 + 1.
        let expected = [
            [50.0f32, 0.0, -199.0],
            [0.0, 50.0, -199.0],
            [-50.0, 0.0, -199.0],
            [0.0, -50.0, -199.0],
        ];
        for (phi, want) in expected.iter().enumerate() {
            let base = (4 + phi) * 3;
            let got = &mesh.positions[base..base + 3];
            for ch in 0..3 {
                assert!(
                    (got[ch] - want[ch]).abs() < 1e-4,
                    "phi {phi}: got {got:?}, want {want:?}"
                );
            }
        }
    }

    #[test]
    fn degenerate_resolutions_are_rejected_not_crashed() {
        for (v, r) in [(1, 360), (0, 360), (60, 0), (60, 2)] {
            let p = params(v, r);
            assert!(matches!(
                generate(&p, WHITE, BLACK),
                Err(ParamError::InvalidResolution { .. })
            ));
        }
    }

    #[test]
    fn triangulate_handles_degenerate_grids() {
        assert!(triangulate(1, 10).is_empty());
        assert!(triangulate(10, 0).is_empty());
        // A 2x1 grid degenerates to seam triangles on a single column.
        assert_eq!(triangulate(2, 1).len(), 6);
    }
}
