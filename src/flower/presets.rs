use crate::flower::params::{FlowerParams, Rgb};

pub struct FlowerPreset {
    pub name: &'static str,
    pub description: &'static str,
    pub params: FlowerParams,
    pub color1: Rgb,
    pub color2: Rgb,
}

/// Read-only preset table. These tuples double as the canonical fixtures
/// for the file round-trip tests, so the values must not drift.
pub const PRESETS: &[FlowerPreset] = &[
    FlowerPreset {
        name: "Hibiscus",
        description: "Five broad petals, tall center",
        params: FlowerParams {
            vertical_resolution: 60,
            radial_resolution: 360,
            petal_number: 5.0,
            petal_length: 200.0,
            diameter: 60.0,
            petal_sharpness: 0.4,
            height: 300.0,
            curvature1: 0.8,
            curvature2: 0.2,
            bumpiness: 2.5,
            bump_number: 12.0,
        },
        color1: Rgb::new(0x87, 0xCE, 0xEB),
        color2: Rgb::new(0xCC, 0x31, 0x68),
    },
    FlowerPreset {
        name: "Forget-me-not",
        description: "Flat rosette, strong ripple",
        params: FlowerParams {
            vertical_resolution: 60,
            radial_resolution: 360,
            petal_number: 5.0,
            petal_length: 110.0,
            diameter: 130.0,
            petal_sharpness: 1.0,
            height: 30.0,
            curvature1: 2.7,
            curvature2: 0.4,
            bumpiness: 5.0,
            bump_number: 8.0,
        },
        color1: Rgb::new(0x64, 0x95, 0xED),
        color2: Rgb::new(0x00, 0xFF, 0xFF),
    },
    FlowerPreset {
        name: "Morning glory",
        description: "Deep trumpet, six lobes",
        params: FlowerParams {
            vertical_resolution: 60,
            radial_resolution: 360,
            petal_number: 6.0,
            petal_length: 80.0,
            diameter: 130.0,
            petal_sharpness: 1.4,
            height: 500.0,
            curvature1: 0.5,
            curvature2: 0.3,
            bumpiness: 1.5,
            bump_number: 12.0,
        },
        color1: Rgb::new(0x41, 0x69, 0xE1),
        color2: Rgb::new(0x87, 0xCE, 0xEB),
    },
    FlowerPreset {
        name: "Lily",
        description: "Narrow spiked petals",
        params: FlowerParams {
            vertical_resolution: 60,
            radial_resolution: 360,
            petal_number: 5.0,
            petal_length: 140.0,
            diameter: 20.0,
            petal_sharpness: 3.0,
            height: 400.0,
            curvature1: 0.6,
            curvature2: 0.2,
            bumpiness: 1.5,
            bump_number: 12.0,
        },
        color1: Rgb::new(0x8B, 0x00, 0x8B),
        color2: Rgb::new(0xFF, 0xFF, 0x00),
    },
    FlowerPreset {
        name: "Buttercup",
        description: "Shallow cup, soft lobes",
        params: FlowerParams {
            vertical_resolution: 60,
            radial_resolution: 360,
            petal_number: 5.0,
            petal_length: 160.0,
            diameter: 40.0,
            petal_sharpness: 0.8,
            height: 20.0,
            curvature1: 2.9,
            curvature2: 0.0,
            bumpiness: 1.5,
            bump_number: 8.0,
        },
        color1: Rgb::new(0xFF, 0xD7, 0x00),
        color2: Rgb::new(0xFF, 0x8C, 0x00),
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flower::generator::generate;

    #[test]
    fn every_preset_validates_and_generates() {
        for preset in PRESETS {
            assert!(
                preset.params.validate().is_ok(),
                "preset {} fails validation",
                preset.name
            );
            let mesh = generate(&preset.params, preset.color1, preset.color2)
                .unwrap_or_else(|e| panic!("preset {}: {e}", preset.name));
            assert_eq!(mesh.vertex_count(), 60 * 360);
        }
    }

    #[test]
    fn preset_names_are_unique() {
        for (i, a) in PRESETS.iter().enumerate() {
            for b in &PRESETS[i + 1..] {
                assert_ne!(a.name, b.name);
            }
        }
    }
}
