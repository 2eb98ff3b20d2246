use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::stats::Attribute;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AllocationError {
    #[error("{attribute} weight {value} is outside 0..=100")]
    WeightOutOfRange { attribute: Attribute, value: u32 },
    #[error("setting {attribute} to {requested} would bring the total to {total}% (limit 100%)")]
    CapacityExceeded {
        attribute: Attribute,
        requested: u32,
        total: u32,
    },
}

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("no clipboard backend is available")]
    Unavailable,
    #[error("failed to launch `{program}`: {source}")]
    Spawn {
        program: &'static str,
        #[source]
        source: io::Error,
    },
    #[error("clipboard write failed: {0}")]
    Io(#[from] io::Error),
    #[error("`{program}` exited with {status}")]
    ToolFailed {
        program: &'static str,
        status: std::process::ExitStatus,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read preset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse preset: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("preset weights rejected: {0}")]
    WeightCap(#[from] AllocationError),
    #[error("expected five comma-separated integers, got `{0}`")]
    BadList(String),
}
