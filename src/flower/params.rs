use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

pub const MIN_VERTICAL_RESOLUTION: u32 = 2;
pub const MIN_RADIAL_RESOLUTION: u32 = 3;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParamError {
    #[error(
        "invalid mesh resolution {vertical}x{radial} (vertical must be >= {MIN_VERTICAL_RESOLUTION}, radial >= {MIN_RADIAL_RESOLUTION})"
    )]
    InvalidResolution { vertical: u32, radial: u32 },

    #[error("shape parameter `{0}` is not a finite number")]
    NonFinite(&'static str),

    #[error("invalid color `{0}`, expected #RRGGBB")]
    BadColor(String),
}

/// The eleven scalars that fully describe one flower. Immutable per
/// generation: the generator takes it by reference and never writes back.
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowerParams {
    pub vertical_resolution: u32,
    pub radial_resolution: u32,
    pub petal_number: f64,
    pub petal_length: f64,
    pub diameter: f64,
    pub petal_sharpness: f64,
    pub height: f64,
    pub curvature1: f64,
    pub curvature2: f64,
    pub bumpiness: f64,
    pub bump_number: f64,
}

impl FlowerParams {
    /// Fail-fast validation before any buffer is touched. Resolutions below
    /// the minimums (including the degenerate `vertical_resolution = 1`
    /// cone) are outside the supported domain; every other scalar only has
    /// to be finite. Values far outside the UI slider bounds are fine, the
    /// formulas are defined for any real input.
    pub fn validate(&self) -> Result<(), ParamError> {
        if self.vertical_resolution < MIN_VERTICAL_RESOLUTION
            || self.radial_resolution < MIN_RADIAL_RESOLUTION
        {
            return Err(ParamError::InvalidResolution {
                vertical: self.vertical_resolution,
                radial: self.radial_resolution,
            });
        }

        let scalars = [
            ("petalNumber", self.petal_number),
            ("petalLength", self.petal_length),
            ("diameter", self.diameter),
            ("petalSharpness", self.petal_sharpness),
            ("height", self.height),
            ("curvature1", self.curvature1),
            ("curvature2", self.curvature2),
            ("bumpiness", self.bumpiness),
            ("bumpNumber", self.bump_number),
        ];
        for (name, value) in scalars {
            if !value.is_finite() {
                return Err(ParamError::NonFinite(name));
            }
        }
        Ok(())
    }

    pub fn vertex_count(&self) -> usize {
        self.vertical_resolution as usize * self.radial_resolution as usize
    }
}

/// One color endpoint, 8 bits per channel. Bytes rather than floats so the
/// `#RRGGBB` file round trip is bit-exact and the egui sRGB picker can edit
/// it directly.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn from_hex(s: &str) -> Result<Self, ParamError> {
        let bad = || ParamError::BadColor(s.to_string());
        let digits = s.strip_prefix('#').ok_or_else(bad)?;
        // from_str_radix alone would also accept a leading sign.
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(bad());
        }
        let n = u32::from_str_radix(digits, 16).map_err(|_| bad())?;
        Ok(Self::new((n >> 16) as u8, (n >> 8) as u8, n as u8))
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    pub fn from_array([r, g, b]: [u8; 3]) -> Self {
        Self::new(r, g, b)
    }

    pub fn channels_f32(self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Rgb::from_hex(&s).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_params() -> FlowerParams {
        FlowerParams {
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
        }
    }

    #[test]
    fn valid_params_pass() {
        assert!(base_params().validate().is_ok());
    }

    #[test]
    fn small_resolutions_are_rejected() {
        let mut p = base_params();
        p.vertical_resolution = 1;
        assert_eq!(
            p.validate(),
            Err(ParamError::InvalidResolution {
                vertical: 1,
                radial: 360
            })
        );

        let mut p = base_params();
        p.radial_resolution = 0;
        assert!(matches!(
            p.validate(),
            Err(ParamError::InvalidResolution { .. })
        ));
    }

    #[test]
    fn non_finite_scalars_are_rejected() {
        let mut p = base_params();
        p.height = f64::NAN;
        assert_eq!(p.validate(), Err(ParamError::NonFinite("height")));

        let mut p = base_params();
        p.curvature2 = f64::INFINITY;
        assert_eq!(p.validate(), Err(ParamError::NonFinite("curvature2")));
    }

    #[test]
    fn negative_petal_length_is_allowed() {
        let mut p = base_params();
        p.petal_length = -80.0;
        p.diameter = -10.0;
        assert!(p.validate().is_ok());
    }

    #[test]
    fn hex_round_trip() {
        for hex in ["#000000", "#ffffff", "#cc3168", "#87ceeb"] {
            let c = Rgb::from_hex(hex).unwrap();
            assert_eq!(c.to_hex(), hex);
        }
        // Uppercase input parses, output is canonical lowercase.
        assert_eq!(Rgb::from_hex("#CC3168").unwrap().to_hex(), "#cc3168");
    }

    #[test]
    fn bad_hex_is_rejected() {
        for bad in [
            "cc3168", "#cc316", "#cc31689", "#gggggg", "", "#", "#+12345", "#-12345",
        ] {
            assert!(Rgb::from_hex(bad).is_err(), "{bad:?} should not parse");
        }
    }
}
