use rand::Rng;

use crate::flower::params::{FlowerParams, Rgb};

/// UI slider bounds. The randomizer draws inside these and the panel uses
/// them as slider ranges, so the two can never disagree.
pub struct SliderRanges {
    pub vertical_resolution: (u32, u32),
    pub radial_resolution: (u32, u32),
    pub petal_number: (f64, f64),
    pub petal_length: (f64, f64),
    pub diameter: (f64, f64),
    pub petal_sharpness: (f64, f64),
    pub height: (f64, f64),
    pub curvature1: (f64, f64),
    pub curvature2: (f64, f64),
    pub bumpiness: (f64, f64),
    pub bump_number: (f64, f64),
}

pub const SLIDER_RANGES: SliderRanges = SliderRanges {
    vertical_resolution: (10, 100),
    radial_resolution: (45, 720),
    petal_number: (1.0, 20.0),
    petal_length: (0.0, 300.0),
    diameter: (20.0, 250.0),
    petal_sharpness: (0.0, 10.0),
    height: (0.0, 600.0),
    curvature1: (0.0, 4.0),
    curvature2: (0.0, 1.0),
    bumpiness: (0.0, 5.0),
    bump_number: (0.0, 20.0),
};

/// Per-control "keep" flags: a locked control survives a randomize pass
/// untouched. `keep_resolution` additionally pins both resolutions at once.
#[derive(Clone, Copy, Default)]
pub struct RandomizeLocks {
    pub keep_resolution: bool,
    pub vertical_resolution: bool,
    pub radial_resolution: bool,
    pub petal_number: bool,
    pub petal_length: bool,
    pub diameter: bool,
    pub petal_sharpness: bool,
    pub height: bool,
    pub curvature1: bool,
    pub curvature2: bool,
    pub bumpiness: bool,
    pub bump_number: bool,
    pub color1: bool,
    pub color2: bool,
}

impl RandomizeLocks {
    pub const ALL_LOCKED: Self = Self {
        keep_resolution: true,
        vertical_resolution: true,
        radial_resolution: true,
        petal_number: true,
        petal_length: true,
        diameter: true,
        petal_sharpness: true,
        height: true,
        curvature1: true,
        curvature2: true,
        bumpiness: true,
        bump_number: true,
        color1: true,
        color2: true,
    };
}

/// Draws fresh values for every unlocked control, uniform over the slider
/// ranges. Resolutions and the two count-like parameters come out as whole
/// numbers; the rest are continuous. Deliberately non-deterministic in the
/// app (callers pass `rand::rng()`), seedable in tests.
pub fn randomize(
    params: &mut FlowerParams,
    color1: &mut Rgb,
    color2: &mut Rgb,
    locks: &RandomizeLocks,
    rng: &mut impl Rng,
) {
    let r = &SLIDER_RANGES;

    if !locks.keep_resolution {
        if !locks.vertical_resolution {
            params.vertical_resolution =
                rng.random_range(r.vertical_resolution.0..=r.vertical_resolution.1);
        }
        if !locks.radial_resolution {
            params.radial_resolution =
                rng.random_range(r.radial_resolution.0..=r.radial_resolution.1);
        }
    }

    if !locks.petal_number {
        params.petal_number =
            rng.random_range(r.petal_number.0 as u32..=r.petal_number.1 as u32) as f64;
    }
    if !locks.petal_length {
        params.petal_length = rng.random_range(r.petal_length.0..=r.petal_length.1);
    }
    if !locks.diameter {
        params.diameter = rng.random_range(r.diameter.0..=r.diameter.1);
    }
    if !locks.petal_sharpness {
        params.petal_sharpness = rng.random_range(r.petal_sharpness.0..=r.petal_sharpness.1);
    }
    if !locks.height {
        params.height = rng.random_range(r.height.0..=r.height.1);
    }
    if !locks.curvature1 {
        params.curvature1 = rng.random_range(r.curvature1.0..=r.curvature1.1);
    }
    if !locks.curvature2 {
        params.curvature2 = rng.random_range(r.curvature2.0..=r.curvature2.1);
    }
    if !locks.bumpiness {
        params.bumpiness = rng.random_range(r.bumpiness.0..=r.bumpiness.1);
    }
    if !locks.bump_number {
        params.bump_number =
            rng.random_range(r.bump_number.0 as u32..=r.bump_number.1 as u32) as f64;
    }

    if !locks.color1 {
        *color1 = random_color(rng);
    }
    if !locks.color2 {
        *color2 = random_color(rng);
    }
}

fn random_color(rng: &mut impl Rng) -> Rgb {
    Rgb::new(rng.random(), rng.random(), rng.random())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn base() -> (FlowerParams, Rgb, Rgb) {
        let preset = &crate::flower::presets::PRESETS[0];
        (preset.params, preset.color1, preset.color2)
    }

    #[test]
    fn fully_locked_randomize_is_a_no_op() {
        let (mut params, mut c1, mut c2) = base();
        let before = (params, c1, c2);
        let mut rng = StdRng::seed_from_u64(7);
        randomize(
            &mut params,
            &mut c1,
            &mut c2,
            &RandomizeLocks::ALL_LOCKED,
            &mut rng,
        );
        assert_eq!((params, c1, c2), before);
    }

    #[test]
    fn keep_resolution_pins_both_resolutions() {
        let (mut params, mut c1, mut c2) = base();
        let locks = RandomizeLocks {
            keep_resolution: true,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(42);
        randomize(&mut params, &mut c1, &mut c2, &locks, &mut rng);
        assert_eq!(params.vertical_resolution, 60);
        assert_eq!(params.radial_resolution, 360);
    }

    #[test]
    fn draws_stay_within_slider_ranges() {
        let (mut params, mut c1, mut c2) = base();
        let locks = RandomizeLocks::default();
        let mut rng = StdRng::seed_from_u64(1234);

        for _ in 0..200 {
            randomize(&mut params, &mut c1, &mut c2, &locks, &mut rng);
            let r = &SLIDER_RANGES;
            assert!(
                (r.vertical_resolution.0..=r.vertical_resolution.1)
                    .contains(&params.vertical_resolution)
            );
            assert!(
                (r.radial_resolution.0..=r.radial_resolution.1)
                    .contains(&params.radial_resolution)
            );
            assert!((r.petal_number.0..=r.petal_number.1).contains(&params.petal_number));
            assert!((r.petal_length.0..=r.petal_length.1).contains(&params.petal_length));
            assert!((r.diameter.0..=r.diameter.1).contains(&params.diameter));
            assert!(
                (r.petal_sharpness.0..=r.petal_sharpness.1).contains(&params.petal_sharpness)
            );
            assert!((r.height.0..=r.height.1).contains(&params.height));
            assert!((r.curvature1.0..=r.curvature1.1).contains(&params.curvature1));
            assert!((r.curvature2.0..=r.curvature2.1).contains(&params.curvature2));
            assert!((r.bumpiness.0..=r.bumpiness.1).contains(&params.bumpiness));
            assert!((r.bump_number.0..=r.bump_number.1).contains(&params.bump_number));

            // Randomized output must always be generatable.
            assert!(params.validate().is_ok());
        }
    }

    #[test]
    fn count_parameters_come_out_whole() {
        let (mut params, mut c1, mut c2) = base();
        let locks = RandomizeLocks::default();
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..50 {
            randomize(&mut params, &mut c1, &mut c2, &locks, &mut rng);
            assert_eq!(params.petal_number.fract(), 0.0);
            assert_eq!(params.bump_number.fract(), 0.0);
        }
    }
}
