use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use log::{debug, info};
use serde::Deserialize;

use crate::error::ConfigError;
use crate::stats::{clamp_input, Attribute, PerStat, MAX_INPUT};

const EMBEDDED_PRESET_JSON: &str = include_str!("../data/default_preset.json");

/// Start-up values for a session. Missing fields take their defaults.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct FormationPreset {
    pub points: u32,
    pub weights: PerStat<u32>,
    pub base: PerStat<u32>,
    pub nature: String,
}

impl Default for FormationPreset {
    fn default() -> Self {
        Self {
            points: 0,
            weights: PerStat::default(),
            base: PerStat::default(),
            nature: "Neutral".to_string(),
        }
    }
}

pub fn parse_preset(json: &str) -> Result<FormationPreset, ConfigError> {
    Ok(serde_json::from_str(json)?)
}

pub fn embedded_preset() -> Result<FormationPreset, ConfigError> {
    parse_preset(EMBEDDED_PRESET_JSON)
}

/// Reads a preset file, using the embedded default when the file is absent.
pub fn load_preset(path: &Path) -> Result<FormationPreset, ConfigError> {
    match fs::read_to_string(path) {
        Ok(data) => {
            info!("loaded preset from {}", path.display());
            parse_preset(&data)
        }
        Err(err) if err.kind() == ErrorKind::NotFound => {
            debug!("{} not found, using embedded preset", path.display());
            embedded_preset()
        }
        Err(source) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Parses `a,b,c,d,e` into one value per attribute, in declared order. Each
/// entry gets the numeric text-field treatment of [`clamp_input`]; only the
/// entry count is strict.
pub fn parse_stat_list(text: &str) -> Result<PerStat<u32>, ConfigError> {
    let values: Vec<u32> = text
        .split(',')
        .map(|part| clamp_input(part, MAX_INPUT))
        .collect();
    let values: [u32; Attribute::COUNT] = values
        .try_into()
        .map_err(|_| ConfigError::BadList(text.to_string()))?;
    Ok(PerStat::from_array(values))
}
