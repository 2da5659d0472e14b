use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::flower::params::{FlowerParams, ParamError, Rgb};

#[derive(Debug, Error)]
pub enum ImportError {
    /// Missing wrapper key, missing fields, non-numeric fields, bad color
    /// strings. Parsing is strict standard JSON; nothing gets repaired or
    /// defaulted.
    #[error("malformed flower file: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The file parsed but describes parameters outside the supported
    /// domain (degenerate resolutions).
    #[error(transparent)]
    Invalid(#[from] ParamError),
}

/// On-disk layout: a single `proceduralFlower` object holding the eleven
/// camelCase parameters plus two `#RRGGBB` color strings.
#[derive(Serialize, Deserialize)]
struct FlowerFile {
    #[serde(rename = "proceduralFlower")]
    procedural_flower: FlowerDoc,
}

#[derive(Serialize, Deserialize)]
struct FlowerDoc {
    #[serde(flatten)]
    params: FlowerParams,
    color1: Rgb,
    color2: Rgb,
}

pub fn export_json(
    params: &FlowerParams,
    color1: Rgb,
    color2: Rgb,
) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&FlowerFile {
        procedural_flower: FlowerDoc {
            params: *params,
            color1,
            color2,
        },
    })
}

pub fn import_json(data: &str) -> Result<(FlowerParams, Rgb, Rgb), ImportError> {
    let file: FlowerFile = serde_json::from_str(data)?;
    let doc = file.procedural_flower;
    doc.params.validate()?;
    Ok((doc.params, doc.color1, doc.color2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flower::presets::PRESETS;

    #[test]
    fn round_trip_is_bit_identical() {
        for preset in PRESETS {
            let json = export_json(&preset.params, preset.color1, preset.color2).unwrap();
            let (params, c1, c2) = import_json(&json).unwrap();
            assert_eq!(params, preset.params, "{}", preset.name);
            assert_eq!(c1, preset.color1);
            assert_eq!(c2, preset.color2);
        }
    }

    #[test]
    fn exported_json_uses_the_conventional_field_names() {
        let p = &PRESETS[0];
        let json = export_json(&p.params, p.color1, p.color2).unwrap();
        for key in [
            "proceduralFlower",
            "verticalResolution",
            "radialResolution",
            "petalNumber",
            "petalLength",
            "diameter",
            "petalSharpness",
            "height",
            "curvature1",
            "curvature2",
            "bumpiness",
            "bumpNumber",
            "color1",
            "color2",
        ] {
            assert!(json.contains(&format!("\"{key}\"")), "missing key {key}");
        }
    }

    #[test]
    fn missing_wrapper_key_is_an_error() {
        let err = import_json(r#"{"verticalResolution": 60}"#).unwrap_err();
        assert!(matches!(err, ImportError::Malformed(_)));
    }

    #[test]
    fn missing_field_is_an_error_not_a_default() {
        // height is absent.
        let json = r##"{"proceduralFlower":{
            "verticalResolution":60,"radialResolution":360,
            "petalNumber":5,"petalLength":200,"diameter":60,
            "petalSharpness":0.4,"curvature1":0.8,"curvature2":0.2,
            "bumpiness":2.5,"bumpNumber":12,
            "color1":"#87ceeb","color2":"#cc3168"}}"##;
        assert!(matches!(
            import_json(json).unwrap_err(),
            ImportError::Malformed(_)
        ));
    }

    #[test]
    fn non_numeric_field_is_an_error() {
        let json = r##"{"proceduralFlower":{
            "verticalResolution":60,"radialResolution":360,
            "petalNumber":"five","petalLength":200,"diameter":60,
            "petalSharpness":0.4,"height":300,"curvature1":0.8,"curvature2":0.2,
            "bumpiness":2.5,"bumpNumber":12,
            "color1":"#87ceeb","color2":"#cc3168"}}"##;
        assert!(matches!(
            import_json(json).unwrap_err(),
            ImportError::Malformed(_)
        ));
    }

    #[test]
    fn bad_color_string_is_an_error() {
        let json = r##"{"proceduralFlower":{
            "verticalResolution":60,"radialResolution":360,
            "petalNumber":5,"petalLength":200,"diameter":60,
            "petalSharpness":0.4,"height":300,"curvature1":0.8,"curvature2":0.2,
            "bumpiness":2.5,"bumpNumber":12,
            "color1":"87ceeb","color2":"#cc3168"}}"##;
        assert!(matches!(
            import_json(json).unwrap_err(),
            ImportError::Malformed(_)
        ));
    }

    #[test]
    fn degenerate_resolution_in_file_is_rejected() {
        let json = r##"{"proceduralFlower":{
            "verticalResolution":1,"radialResolution":360,
            "petalNumber":5,"petalLength":200,"diameter":60,
            "petalSharpness":0.4,"height":300,"curvature1":0.8,"curvature2":0.2,
            "bumpiness":2.5,"bumpNumber":12,
            "color1":"#87ceeb","color2":"#cc3168"}}"##;
        assert!(matches!(
            import_json(json).unwrap_err(),
            ImportError::Invalid(ParamError::InvalidResolution { .. })
        ));
    }

    #[test]
    fn file_round_trip_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flower.json");

        let p = &PRESETS[3];
        let json = export_json(&p.params, p.color1, p.color2).unwrap();
        std::fs::write(&path, &json).unwrap();

        let read_back = std::fs::read_to_string(&path).unwrap();
        let (params, c1, c2) = import_json(&read_back).unwrap();
        assert_eq!(params, p.params);
        assert_eq!((c1, c2), (p.color1, p.color2));
    }
}
