use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to load circuit image {}", path.display())]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to read config {}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },

    #[error("config field `{field}` = {value} is not a usable number of seconds")]
    ConfigValue { field: &'static str, value: f64 },

    #[error("wire id {id} out of range ({len} wires)")]
    WireOutOfRange { id: usize, len: usize },

    #[error("gate id {id} out of range ({len} gates)")]
    GateOutOfRange { id: usize, len: usize },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
